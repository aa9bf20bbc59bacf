/// Console-level errors
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned status {status}")]
    Api {
        status: u16,
        /// `message` field of the JSON error body, when the service sent one
        message: Option<String>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unknown result row: {0}")]
    UnknownRow(usize),
}

impl ClientError {
    /// Text shown in the flash message area for this failure
    pub fn flash_message(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Api {
                status,
                message: None,
            } => format!("Server error! (HTTP {})", status),
            ClientError::Http(e) => format!("Server error! {}", e),
            ClientError::InvalidUrl(msg) => format!("Invalid URL: {}", msg),
            ClientError::MissingField(field) => format!("{} is required", field),
            ClientError::UnknownRow(row) => format!("No result in row {}", row),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_surfaced() {
        let err = ClientError::Api {
            status: 404,
            message: Some("Recommendation with id '7' was not found.".to_string()),
        };
        assert_eq!(
            err.flash_message(),
            "Recommendation with id '7' was not found."
        );
    }

    #[test]
    fn test_missing_error_body_falls_back_to_status() {
        let err = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.flash_message(), "Server error! (HTTP 500)");
    }

    #[test]
    fn test_missing_field_message() {
        assert_eq!(
            ClientError::MissingField("rec_id").flash_message(),
            "rec_id is required"
        );
    }
}
