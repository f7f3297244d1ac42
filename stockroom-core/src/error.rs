//! Unified error handling
//!
//! Structured error types with context and recovery suggestions. The access
//! predicate and menu filter never produce these: they are total and fail
//! closed. Errors only come from loading configuration or the menu model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub type StockroomResult<T> = Result<T, StockroomError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the navigation core
#[derive(Error, Debug)]
pub enum StockroomError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Invalid menu model: {message}")]
    InvalidMenu {
        message: String,
        /// Identifier of the offending section or entry
        id: Option<String>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StockroomError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            StockroomError::Config { context, .. } => Some(context),
            StockroomError::InvalidMenu { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Log the error with its tracking id
    pub fn log(&self) {
        error!(
            error_id = ?self.context().map(|c| &c.error_id),
            component = ?self.context().map(|c| &c.component),
            error = %self,
            "Stockroom error"
        );
    }
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::StockroomError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file"),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::StockroomError::Config {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file"),
        }
    };
}

#[macro_export]
macro_rules! invalid_menu_error {
    ($msg:expr, $id:expr) => {
        $crate::StockroomError::InvalidMenu {
            message: $msg.to_string(),
            id: Some($id.to_string()),
            context: $crate::ErrorContext::new("menu")
                .with_operation("validate")
                .with_suggestion("Section and entry ids must be non-empty and unique among siblings"),
        }
    };
}
