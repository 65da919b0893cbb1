/// Error type for widget construction and control calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResizeError {
    #[error("No element matches selector: '{0}'")]
    NotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unknown event name: '{0}'")]
    UnknownEvent(String),
    #[error("Unknown handle direction: '{0}'")]
    UnknownDirection(String),
    #[error("Widget is busy (called from inside one of its own callbacks)")]
    Busy,
    #[error("DOM operation failed: {0}")]
    Dom(String),
}
