use crate::model::task::Task;
use anyhow::Result;

/// Read-only provider of the task collection the query engine works on.
pub trait TaskSource {
    fn list(&self) -> Result<Vec<Task>>;
}
