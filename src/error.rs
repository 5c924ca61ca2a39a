use thiserror::Error;

/// Timeouts are not errors: a menu that times out finishes normally with no result.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("invalid menu configuration: {0}")]
    Configuration(String),
    #[error("chat service request failed: {0}")]
    Network(#[from] serenity::Error),
}

impl MenuError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        MenuError::Configuration(msg.into())
    }
}

pub type MenuResult<T> = Result<T, MenuError>;
