//! Application Error
//!
//! [`AppError`] is where every crate error ends up before it reaches the
//! client. It carries the kind, a client-facing message, an optional hint
//! and the underlying error, which only ever goes to the logs.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

type Message = Cow<'static, str>;

pub struct AppError {
    kind: ErrorKind,
    message: Message,
    action: Option<Message>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

/// RFC 7807 problem document, the body of every error response
#[derive(Debug, Serialize)]
pub struct Problem<'a> {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: &'static str,
    pub status: u16,
    pub detail: &'a str,
    pub action: Option<&'a str>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Message>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn bad_gateway(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::BadGateway, message)
    }

    pub fn service_unavailable(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Hint telling the client what to do next
    pub fn with_action(mut self, action: impl Into<Message>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Keep the underlying error for logs
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    pub fn problem(&self) -> Problem<'_> {
        let status = self.status_code();
        Problem {
            type_uri: format!("https://httpstatuses.io/{status}"),
            title: self.kind.title(),
            status,
            detail: &self.message,
            action: self.action(),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_document() {
        let err = AppError::bad_gateway("Payment provider unavailable")
            .with_action("Retry the payment in a moment");
        let json = serde_json::to_value(err.problem()).unwrap();

        assert_eq!(json["type"], "https://httpstatuses.io/502");
        assert_eq!(json["title"], "Bad Gateway");
        assert_eq!(json["status"], 502);
        assert_eq!(json["detail"], "Payment provider unavailable");
        assert_eq!(json["action"], "Retry the payment in a moment");
    }

    #[test]
    fn test_action_is_null_when_absent() {
        let json = serde_json::to_value(AppError::not_found("Order not found").problem()).unwrap();
        assert!(json["action"].is_null());
    }

    #[test]
    fn test_source_stays_out_of_display() {
        let io = std::io::Error::other("socket closed");
        let err = AppError::internal("Database error").with_source(io);

        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Internal Server Error: Database error");
    }
}
