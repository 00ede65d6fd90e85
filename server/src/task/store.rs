//! Persistence boundary for task entries, backed by the application database.

use async_trait::async_trait;

use crate::entities::*;
use sea_orm::*;

use super::{Task, TaskServiceError};

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(model.id as u32, model.name)
    }
}

/// Trait defining the store operations the task service relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore {
    /// Retrieves every task entry, ordered by ID.
    async fn find_all(&self) -> Result<Vec<Task>, TaskServiceError>;

    /// Inserts a new task entry; the store assigns its ID.
    async fn insert(&self, name: &str) -> Result<Task, TaskServiceError>;

    /// Replaces the name of the entry with the given ID.
    async fn update_by_id(&self, id: u32, name: &str) -> Result<Task, TaskServiceError>;

    /// Deletes the entry with the given ID, returning the deleted record.
    async fn delete_by_id(&self, id: u32) -> Result<Task, TaskServiceError>;
}

/// `TaskStore` implementation issuing ORM calls against the database.
pub struct DbTaskStore<'a> {
    db: &'a DatabaseConnection,
}

impl DbTaskStore<'_> {
    pub fn new(db: &DatabaseConnection) -> DbTaskStore {
        DbTaskStore { db }
    }
}

#[async_trait]
impl TaskStore for DbTaskStore<'_> {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn insert(&self, name: &str) -> Result<Task, TaskServiceError> {
        let active_model = task::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    #[tracing::instrument(skip(self))]
    async fn update_by_id(&self, id: u32, name: &str) -> Result<Task, TaskServiceError> {
        let task_to_update = task::Entity::find_by_id(id as i32)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let mut active_model: task::ActiveModel = task_to_update.into();
        active_model.name = ActiveValue::Set(name.to_string());
        let updated_model = active_model.update(self.db).await?;

        Ok(Task::from(updated_model))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: u32) -> Result<Task, TaskServiceError> {
        let task_to_delete = task::Entity::find_by_id(id as i32)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let deleted_task = Task::from(task_to_delete);
        task::Entity::delete_by_id(id as i32).exec(self.db).await?;
        Ok(deleted_task)
    }
}
