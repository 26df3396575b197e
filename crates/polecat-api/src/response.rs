//! Success bodies: what happened, where to go next, and optionally the entity touched.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Flash<T = ()> {
    pub message: String,
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Flash {
    pub fn new(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect: redirect.into(),
            data: None,
        }
    }
}

impl<T> Flash<T> {
    pub fn with(message: impl Into<String>, redirect: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            redirect: redirect.into(),
            data: Some(data),
        }
    }
}
