use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use std::fmt;

/// Errors surfaced by the lifecycle logic and translated to HTTP at the edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusinessError {
    /// Validation errors for user input (422 Unprocessable Entity)
    ValidationError { field: String, message: String },
    /// Resource not found (404 Not Found)
    NotFound { resource: String, id: String },
    /// Unrecovered store or application failure (500 Internal Server Error)
    InternalError { message: String },
}

impl fmt::Display for BusinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessError::ValidationError { field, message } => {
                write!(f, "Validation error in field '{field}': {message}")
            }
            BusinessError::NotFound { resource, id } => {
                write!(f, "{resource} with id {id} not found")
            }
            BusinessError::InternalError { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for BusinessError {}

impl BusinessError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            BusinessError::ValidationError { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            BusinessError::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
            BusinessError::InternalError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            BusinessError::ValidationError { .. } => "ValidationError",
            BusinessError::NotFound { .. } => "NotFound",
            BusinessError::InternalError { .. } => "InternalError",
        }
    }
}

impl IntoResponse for BusinessError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        // Store details stay in the logs
        let message = match &self {
            BusinessError::InternalError { message } => {
                tracing::error!(%message, "Request failed with an internal error");
                "An unexpected error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "detail": message,
            "error": {
                "code": error_code,
                "message": message,
                "type": self.type_name(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<DbErr> for BusinessError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => BusinessError::NotFound {
                resource: "Record".to_string(),
                id: msg,
            },
            _ => BusinessError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

#[macro_export]
macro_rules! validation_error {
    ($field:expr, $message:expr) => {
        $crate::common::errors::BusinessError::ValidationError {
            field: $field.to_string(),
            message: $message.to_string(),
        }
    };
}

#[macro_export]
macro_rules! not_found {
    ($resource:expr, $id:expr) => {
        $crate::common::errors::BusinessError::NotFound {
            resource: $resource.to_string(),
            id: $id.to_string(),
        }
    };
}

/// Rejects empty or whitespace-only strings for a required field
pub fn require_non_blank(field: &str, value: &str) -> BusinessResult<()> {
    if value.trim().is_empty() {
        return Err(validation_error!(field, "must not be empty"));
    }
    Ok(())
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[test]
    fn test_validation_error_creation() {
        let err = validation_error!("limit", "must be between 1 and 100");
        assert!(matches!(err, BusinessError::ValidationError { .. }));
        assert_eq!(
            err.to_string(),
            "Validation error in field 'limit': must be between 1 and 100"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = not_found!("BioSample", 42);
        assert_eq!(err.to_string(), "BioSample with id 42 not found");
    }

    #[test]
    fn test_db_record_not_found_maps_to_not_found() {
        let err: BusinessError = DbErr::RecordNotFound("7".to_string()).into();
        assert!(matches!(err, BusinessError::NotFound { .. }));
    }

    #[test]
    fn test_other_db_errors_map_to_internal() {
        let err: BusinessError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, BusinessError::InternalError { .. }));
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("author", "Anna").is_ok());
        assert!(require_non_blank("author", "").is_err());
        assert!(require_non_blank("author", "   ").is_err());
    }

    #[tokio::test]
    async fn test_error_response_status_and_body() {
        let response = not_found!("BioSample", 9999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "BioSample with id 9999 not found");
        assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(body["error"]["type"], "NotFound");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = BusinessError::InternalError {
            message: "connection refused".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(!body["detail"].as_str().unwrap().contains("connection refused"));
    }
}
