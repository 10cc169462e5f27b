//! Error types for the inventory client.

use thiserror::Error;

/// Errors that can occur while talking to the inventory service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// The request never produced a response (connection refused, reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response without a structured body.
    #[error("Server error: HTTP {status}")]
    Server { status: u16 },

    /// Non-2xx response carrying `{"information": ...}`: a business-rule
    /// rejection such as insufficient stock.
    #[error("Request rejected (HTTP {status}): {information}")]
    Application { status: u16, information: String },

    /// 2xx response whose body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The configured host/path could not form a URL, or the HTTP client
    /// could not be built.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// `information` the service sends for an unknown identifier, on every
/// endpoint and always with HTTP 400.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// `information` the service sends when a created product's identifier is taken.
pub const DUPLICATE_IDENTIFIER: &str =
    "A product with the same business identifier is already registered";

/// Classification of an [`InventoryError::Application`] rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotFound,
    Validation,
    Conflict,
    Other,
}

impl InventoryError {
    /// Server-provided description, if the failure carried one.
    pub fn information(&self) -> Option<&str> {
        match self {
            InventoryError::Application { information, .. } => Some(information),
            _ => None,
        }
    }

    /// Text suitable for an alert banner.
    pub fn user_message(&self) -> String {
        match self.information() {
            Some(information) => information.to_string(),
            None => self.to_string(),
        }
    }

    /// Classifies a structured rejection.
    ///
    /// The service reports most rejections as a bare HTTP 400, so its
    /// `information` text is checked before the status code.
    pub fn rejection(&self) -> Option<Rejection> {
        let InventoryError::Application {
            status,
            information,
        } = self
        else {
            return None;
        };
        if information.eq_ignore_ascii_case(PRODUCT_NOT_FOUND) {
            return Some(Rejection::NotFound);
        }
        if information == DUPLICATE_IDENTIFIER {
            return Some(Rejection::Conflict);
        }
        Some(match status {
            404 => Rejection::NotFound,
            400 | 422 => Rejection::Validation,
            409 => Rejection::Conflict,
            _ => Rejection::Other,
        })
    }
}
