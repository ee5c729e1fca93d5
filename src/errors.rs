use std::fmt;

/// Errors raised while building or dispatching Marketo SOAP requests.
#[derive(Debug, Clone)]
pub enum MarketoError {
    /// Malformed or contradictory caller input.
    InvalidArgument(String),
    /// A dependent parameter was absent.
    MissingKey(String),
    /// Failure reported by the SOAP transport collaborator.
    Transport(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<MarketoError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for MarketoError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketoError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            MarketoError::MissingKey(msg) => write!(f, "Missing key: {}", msg),
            MarketoError::Transport(msg) => write!(f, "SOAP transport error: {}", msg),
            MarketoError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for MarketoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MarketoError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `MarketoError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, MarketoError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    fn with_context<F>(self, f: F) -> Result<T, MarketoError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, MarketoError> {
    fn context(self, context: impl Into<String>) -> Result<T, MarketoError> {
        self.map_err(|e| MarketoError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, MarketoError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| MarketoError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_chain_display() {
        let err: Result<(), MarketoError> =
            Err(MarketoError::Transport("connection reset".to_string()));
        let wrapped = err.context("SOAP call request_campaign failed").unwrap_err();
        assert_eq!(
            wrapped.to_string(),
            "SOAP call request_campaign failed: SOAP transport error: connection reset"
        );
    }
}
