pub mod file;
pub mod traits;

// Re-export
pub use file::FileTaskSource;
pub use traits::TaskSource;
