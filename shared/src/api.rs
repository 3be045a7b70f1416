use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{hhmm, Event, EventColor};

// ============================================================================
// Event Form Types
// ============================================================================

/// Raw form state backing the create/edit dialog.
///
/// Times are kept as the strings the user typed; they are parsed only on
/// submit so half-typed values never leave the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventFormData {
    #[validate(custom = "not_blank")]
    pub title: String,

    pub description: String,

    #[validate(custom = "not_blank")]
    pub start_time: String,

    #[validate(custom = "not_blank")]
    pub end_time: String,

    pub color: EventColor,
}

impl EventFormData {
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            start_time: event.start_time.format(hhmm::FORMAT).to_string(),
            end_time: event.end_time.format(hhmm::FORMAT).to_string(),
            color: event.color,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// User-facing failure notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}
