use thiserror::Error;

/// Failure of a catalog API call as seen by the views
///
/// The display text is what a view shows to the user; for server-side
/// failures that is the server's own `message`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    /// The request could not be built from local input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// HTTP status for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = ClientError::Api {
            status: 404,
            message: "Product 7 not found".to_string(),
        };
        assert_eq!(err.to_string(), "Product 7 not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_invalid_response_has_no_status() {
        let err = ClientError::InvalidResponse("missing data".to_string());
        assert_eq!(err.status(), None);
    }
}
