use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::model::task::Task;
use crate::repository::traits::TaskSource;

const DEFAULT_DIR_NAME: &str = ".tasklens";
const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Reads tasks from a JSON array on disk. Never writes.
#[derive(Clone, Debug)]
pub struct FileTaskSource {
    file_path: PathBuf,
}

impl FileTaskSource {
    pub fn new(file_path: Option<PathBuf>) -> Result<Self> {
        let file_path = match file_path {
            Some(path) => path,
            None => default_file_path()?,
        };
        Ok(FileTaskSource { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// `~/.tasklens/tasks.json`
pub fn default_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME))
}

impl TaskSource for FileTaskSource {
    fn list(&self) -> Result<Vec<Task>> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "task file missing, treating as empty");
            return Ok(Vec::new());
        }

        let file = File::open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tasks: Vec<Task> = serde_json::from_reader(reader)
            .with_context(|| format!("Invalid task file {}", self.file_path.display()))?;

        debug!(path = %self.file_path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }
}
