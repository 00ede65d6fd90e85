use crate::task::store::DbTaskStore;
use crate::task::{SaveTaskRequest, Task, TaskService, TaskServiceError};
use crate::web::api::ErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: u32,
    /// Human-readable task name
    name: String,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().to_string(),
        }
    }
}

/// Request body accepted by the save endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveTaskBody {
    /// ID of the task entry to update; omit to create a new one
    #[serde(default)]
    id: Option<u32>,
    /// Name for the task entry
    #[serde(default)]
    name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

/// Custom error type translating task service failures into JSON responses.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] TaskServiceError);

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, user_facing_error_message) = match &self.0 {
            TaskServiceError::InvalidTaskName => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
            }
            TaskServiceError::TaskNotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            TaskServiceError::SaveFailed(_) | TaskServiceError::Database(_) => {
                tracing::error!("Task operation failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred while processing your request. Please try again later."
                        .to_string(),
                )
            }
        };

        (status_code, Json(ErrorResponse::new(user_facing_error_message))).into_response()
    }
}

/// Handler for GET /tasks - Returns all tasks in JSON format.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = [TaskJson]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<TaskJson>>, ApiError> {
    let store = DbTaskStore::new(&state.db);
    let service = TaskService::new(&store);

    let tasks = service.get_all_tasks().await?;
    Ok(Json(tasks.into_iter().map(TaskJson::from).collect()))
}

/// Handler for POST /tasks - Saves the payload, creating a task when it has no ID.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = SaveTaskBody,
    responses(
        (status = 201, description = "Task created", body = TaskJson),
        (status = 200, description = "Existing task updated", body = TaskJson),
        (status = 404, description = "No task with the given ID", body = ErrorResponse),
        (status = 422, description = "Invalid task name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn save_task_handler(
    State(state): State<Arc<TaskState>>,
    Json(body): Json<SaveTaskBody>,
) -> Result<(StatusCode, Json<TaskJson>), ApiError> {
    let store = DbTaskStore::new(&state.db);
    let service = TaskService::new(&store);

    let status_code = if body.id.is_none() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let task = service
        .save_task(SaveTaskRequest {
            id: body.id,
            name: body.name,
        })
        .await?;
    Ok((status_code, Json(TaskJson::from(task))))
}

/// Handler for PATCH /tasks/{id} - Updates the task with the path ID, overriding any ID in the body.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    patch,
    path = "/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task entry to update")
    ),
    request_body = SaveTaskBody,
    responses(
        (status = 200, description = "Task updated", body = TaskJson),
        (status = 404, description = "No task with the given ID", body = ErrorResponse),
        (status = 422, description = "Invalid task name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
    Json(body): Json<SaveTaskBody>,
) -> Result<Json<TaskJson>, ApiError> {
    let store = DbTaskStore::new(&state.db);
    let service = TaskService::new(&store);

    let task = service
        .save_task(SaveTaskRequest {
            id: Some(id),
            name: body.name,
        })
        .await?;
    Ok(Json(TaskJson::from(task)))
}

/// Handler for DELETE /tasks/{id} - Deletes the task with the given ID and returns it.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(
        ("id" = u32, Path, description = "ID of the task entry to delete")
    ),
    responses(
        (status = 200, description = "Task deleted", body = TaskJson),
        (status = 404, description = "No task with the given ID", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
) -> Result<Json<TaskJson>, ApiError> {
    let store = DbTaskStore::new(&state.db);
    let service = TaskService::new(&store);

    let task = service.delete_task_by_id(id).await?;
    Ok(Json(TaskJson::from(task)))
}

/// Creates and returns the tasks API router.
pub fn create_task_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/tasks", get(get_tasks_handler).post(save_task_handler))
        .route(
            "/tasks/{id}",
            patch(update_task_handler).delete(delete_task_handler),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn can_handle_save_failure_with_internal_server_error() {
        // Simulate a database write failure using sea_orm::DbErr::Custom
        let db_error = sea_orm::DbErr::Custom("Simulated connection failure".to_string());

        let api_error = ApiError::from(TaskServiceError::SaveFailed(db_error));
        let response = axum::response::IntoResponse::into_response(api_error);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            body_json,
            json!({
                "error": "An unexpected error occurred while processing your request. Please try again later."
            })
        );
    }

    #[tokio::test]
    async fn can_handle_database_error_with_internal_server_error() {
        // Simulate a database lookup failure using sea_orm::DbErr::Custom
        let db_error = sea_orm::DbErr::Custom("Simulated query failure".to_string());

        let api_error = ApiError::from(TaskServiceError::Database(db_error));
        let response = axum::response::IntoResponse::into_response(api_error);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            body_json,
            json!({
                "error": "An unexpected error occurred while processing your request. Please try again later."
            })
        );
    }
}
