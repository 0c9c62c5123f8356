use std::collections::BTreeMap;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Per-field validation messages, keyed by the payload field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns `value` when no field failed, otherwise the collected errors.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, DomainError> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("authentication credentials were not provided or are invalid")]
    Unauthenticated,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("malformed request body")]
    MalformedBody(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: i64 },
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn recipe_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "recipe",
            id,
        }
    }

    pub fn tag_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "tag",
            id,
        }
    }

    pub fn ingredient_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "ingredient",
            id,
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Internal(format!("database error: {err}"))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Unauthenticated | DomainError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::Validation(_)
            | DomainError::MalformedBody(_)
            | DomainError::EmailTaken => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            DomainError::Internal(reason) => {
                error!(%reason, "request failed with internal error");
                "internal error".to_owned()
            }
            other => other.to_string(),
        };
        let details = match self {
            DomainError::Validation(fields) => serde_json::to_value(fields).ok(),
            DomainError::MalformedBody(reason) => Some(json!({ "message": reason })),
            DomainError::EmailTaken => {
                Some(json!({ "email": ["user with this email already exists."] }))
            }
            DomainError::NotFound { id, .. } => Some(json!({ "id": id })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
