use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupingError {
    #[error("invalid argument {name}={value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },
}

impl GroupingError {
    pub(crate) fn invalid(name: &'static str, value: usize, reason: &'static str) -> Self {
        GroupingError::InvalidArgument { name, value, reason }
    }
}
