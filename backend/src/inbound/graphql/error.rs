//! Mapping from domain errors to GraphQL errors.
//!
//! The domain error code lands in `extensions.code` and the request trace id
//! in `extensions.traceId`. Internal failures are logged in full and reach
//! the client only as a generic message.

use async_graphql::{ErrorExtensions, Value};
use tracing::{error, warn};

use crate::domain::{BookValidationError, Error, ErrorCode, UserValidationError};

const REDACTED_MESSAGE: &str = "Internal server error";

/// Convert a domain error into a GraphQL error with a stable `code` extension.
///
/// # Examples
/// ```
/// use bookshelf::domain::Error;
/// use bookshelf::inbound::graphql::into_graphql_error;
///
/// let err = into_graphql_error(Error::internal("database exploded"));
/// assert_eq!(err.message, "Internal server error");
/// ```
pub fn into_graphql_error(err: Error) -> async_graphql::Error {
    let code = err.code();
    let message = match code {
        ErrorCode::InternalError => {
            error!(error = %err, trace_id = ?err.trace_id(), "internal error in GraphQL resolver");
            REDACTED_MESSAGE.to_owned()
        }
        ErrorCode::ServiceUnavailable => {
            warn!(error = %err, trace_id = ?err.trace_id(), "dependency unavailable");
            err.message().to_owned()
        }
        _ => err.message().to_owned(),
    };
    let trace_id = err.trace_id().map(str::to_owned);
    let details = if code == ErrorCode::InternalError {
        None
    } else {
        err.details().and_then(|details| Value::from_json(details.clone()).ok())
    };

    async_graphql::Error::new(message).extend_with(|_, extensions| {
        extensions.set("code", code.as_str());
        if let Some(trace_id) = &trace_id {
            extensions.set("traceId", trace_id.as_str());
        }
        if let Some(details) = &details {
            extensions.set("details", details.clone());
        }
    })
}

fn user_field(err: &UserValidationError) -> Option<&'static str> {
    match err {
        UserValidationError::EmptyUsername | UserValidationError::UsernameTooLong { .. } => {
            Some("username")
        }
        UserValidationError::EmptyEmail | UserValidationError::InvalidEmail => Some("email"),
        UserValidationError::EmptyPassword | UserValidationError::PasswordTooLong { .. } => {
            Some("password")
        }
        UserValidationError::EmptyId | UserValidationError::InvalidId => None,
    }
}

/// Map an input validation failure to an `INVALID_REQUEST` error naming the field.
pub(crate) fn user_validation_error(err: &UserValidationError) -> async_graphql::Error {
    let mut domain = Error::invalid_request(err.to_string());
    if let Some(field) = user_field(err) {
        domain = domain.with_details(serde_json::json!({ "field": field }));
    }
    into_graphql_error(domain)
}

pub(crate) fn book_validation_error(err: &BookValidationError) -> async_graphql::Error {
    into_graphql_error(
        Error::invalid_request(err.to_string())
            .with_details(serde_json::json!({ "field": "bookId" })),
    )
}
