/*
[INPUT]:  Error sources (HTTP transport, API responses, credentials, arguments)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the ABCP adapter
#[derive(Error, Debug)]
pub enum AbcpError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error [{status}] (code {code}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// Search-type method found nothing (the API signals this with 404)
    #[error("nothing found: {message}")]
    NotFound { message: String },

    /// The API answered 418; it uses the status as an anti-abuse signal
    #[error("RFC 2324 section 2.3.2: 418 I'm a teapot")]
    TeaPot,

    /// Response was not the JSON the API is expected to produce
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Host does not match the `idNNN.…` scheme the API serves
    #[error("unsupported host {0}; expected something like id200.public.api.abcp.ru")]
    UnsupportedHost(String),

    /// Login is neither an api@ admin login, a client code, nor an e-mail
    #[error("unsupported login {0}")]
    UnsupportedLogin(String),

    /// Password must be supplied as a 32-character md5 hex digest
    #[error("password must be an md5 hex digest")]
    PasswordType,

    /// Operation requires administrator credentials
    #[error("not enough rights: {message}")]
    NotEnoughRights { message: String },

    /// An argument does not satisfy the endpoint's documented constraints
    #[error("wrong parameter {name}: {message}")]
    WrongParameter {
        name: &'static str,
        message: String,
    },

    /// A required argument (or combination of arguments) is missing
    #[error("parameter required: {0}")]
    ParameterRequired(String),
}

impl AbcpError {
    /// Check if the error is retryable (transport failures only; the API's own
    /// business errors never are)
    pub fn is_retryable(&self) -> bool {
        matches!(self, AbcpError::Network(_))
    }

    /// Check if error indicates a credentials problem
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            AbcpError::UnsupportedHost(_)
                | AbcpError::UnsupportedLogin(_)
                | AbcpError::PasswordType
                | AbcpError::NotEnoughRights { .. }
        )
    }

    pub(crate) fn not_enough_rights(message: impl Into<String>) -> Self {
        AbcpError::NotEnoughRights {
            message: message.into(),
        }
    }

    pub(crate) fn wrong_parameter(name: &'static str, message: impl Into<String>) -> Self {
        AbcpError::WrongParameter {
            name,
            message: message.into(),
        }
    }
}

/// Result type alias for ABCP operations
pub type Result<T> = std::result::Result<T, AbcpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let api_err = AbcpError::Api {
            status: 400,
            code: 301,
            message: "bad brand".into(),
        };
        assert!(!api_err.is_retryable());
        assert!(!AbcpError::TeaPot.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(AbcpError::PasswordType.is_auth_error());
        assert!(AbcpError::not_enough_rights("admin only").is_auth_error());
        assert!(!AbcpError::TeaPot.is_auth_error());
    }

    #[test]
    fn test_wrong_parameter_display() {
        let err = AbcpError::wrong_parameter("limit", "must be within 1..=1000");
        assert_eq!(
            err.to_string(),
            "wrong parameter limit: must be within 1..=1000"
        );
    }
}
