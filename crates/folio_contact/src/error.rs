//! Error types for folio_contact

use thiserror::Error;

/// Shown when delivery fails without a usable message
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Shown when the delivery service answers with anything but 200
pub const SEND_FAILED: &str = "Failed to send email";

/// Errors raised while delivering a contact message
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Request could not be sent or its response not read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Client settings are unusable
    #[error("delivery client misconfigured: {0}")]
    Config(String),

    /// Any other fault raised by a delivery service
    #[error("{0}")]
    Fault(String),
}

impl DeliveryError {
    /// Text for the failure banner
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNEXPECTED_ERROR.to_string()
        } else {
            message
        }
    }
}

/// Result type for delivery operations
pub type Result<T> = std::result::Result<T, DeliveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_without_message_falls_back() {
        assert_eq!(DeliveryError::Fault(String::new()).user_message(), UNEXPECTED_ERROR);
        assert_eq!(DeliveryError::Fault("quota exceeded".into()).user_message(), "quota exceeded");
    }
}
