//! Error classification

use serde::Serialize;

/// What went wrong, as far as the HTTP client is concerned. The kind alone
/// picks the response status.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::NotFound.status_code(), 404);
/// assert_eq!(ErrorKind::NotFound.title(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Invalid input, malformed request or rejected by a store constraint
    BadRequest,
    Unauthorized,
    /// Authenticated but lacking the role
    Forbidden,
    NotFound,
    InternalServerError,
    /// Payment provider failed or timed out
    BadGateway,
    /// Database unreachable or out of connections
    ServiceUnavailable,
}

impl ErrorKind {
    const fn parts(&self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::BadGateway => (502, "Bad Gateway"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    pub const fn status_code(&self) -> u16 {
        self.parts().0
    }

    /// Reason phrase, the `title` of a problem document
    pub const fn title(&self) -> &'static str {
        self.parts().1
    }

    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors() {
        let server: Vec<_> = [
            ErrorKind::BadRequest,
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::InternalServerError,
            ErrorKind::BadGateway,
            ErrorKind::ServiceUnavailable,
        ]
        .into_iter()
        .filter(ErrorKind::is_server_error)
        .collect();

        assert_eq!(
            server,
            vec![
                ErrorKind::InternalServerError,
                ErrorKind::BadGateway,
                ErrorKind::ServiceUnavailable
            ]
        );
    }

    #[test]
    fn test_serialized_name() {
        assert_eq!(
            serde_json::to_value(ErrorKind::BadGateway).unwrap(),
            "BAD_GATEWAY"
        );
    }
}
