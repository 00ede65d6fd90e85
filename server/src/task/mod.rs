pub mod api;
pub mod store;

use store::TaskStore;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Task {
    id: u32,
    name: String,
}

impl Task {
    pub fn new(id: u32, name: String) -> Self {
        Self { id, name }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the name of the task.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Payload accepted by the save operation.
///
/// Both fields are optional: a missing `id` requests creation, a present `id`
/// requests an update of that entry, and `name` is validated before any
/// store access.
#[derive(Debug, Clone, Default)]
pub struct SaveTaskRequest {
    pub id: Option<u32>,
    pub name: Option<String>,
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents a save payload whose name is missing or empty.
    #[error("Task name must be a non-empty string")]
    InvalidTaskName,
    /// Represents a task not found error.
    #[error("Task with ID {0} not found")]
    TaskNotFound(u32),
    /// Represents a store failure while saving, carrying the underlying cause.
    #[error("Failed to save task: {0}")]
    SaveFailed(#[source] sea_orm::DbErr),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct TaskService<'a, STORE: TaskStore> {
    store: &'a STORE,
}

impl<'a, STORE: TaskStore> TaskService<'a, STORE> {
    pub fn new(store: &'a STORE) -> Self {
        Self { store }
    }

    /// Saves a task entry, creating or updating depending on the payload.
    ///
    /// The payload's name is validated first; an invalid name fails the
    /// operation before the store is touched. A payload without an ID inserts
    /// a new entry, a payload with an ID (zero included) updates that entry.
    ///
    /// # Arguments
    ///
    /// * `request` - The save payload with an optional ID and name.
    ///
    /// # Returns
    ///
    /// A `Result` containing the saved `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn save_task(&self, request: SaveTaskRequest) -> Result<Task, TaskServiceError> {
        let name = match request.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(TaskServiceError::InvalidTaskName),
        };

        let saved = match request.id {
            Some(id) => self.store.update_by_id(id, name).await,
            None => self.store.insert(name).await,
        };
        saved.map_err(|err| match err {
            TaskServiceError::Database(cause) => TaskServiceError::SaveFailed(cause),
            other => other,
        })
    }

    /// Retrieves all task entries from the store.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        self.store.find_all().await
    }

    /// Deletes a task entry by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task entry to delete.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deleted `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task_by_id(&self, id: u32) -> Result<Task, TaskServiceError> {
        self.store.delete_by_id(id).await
    }
}
