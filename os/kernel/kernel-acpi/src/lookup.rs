/// Why a firmware object could not be evaluated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// The object exists but evaluated to an unexpected type.
    #[error("unexpected object type")]
    TypeMismatch,
    /// The interpreter failed while evaluating the object.
    #[error("evaluation failed: {0}")]
    Failed(&'static str),
}

/// Result of evaluating an optional firmware object such as `_ADR` or `_SEG`.
///
/// Firmware routinely omits these objects, so callers usually collapse a
/// lookup to a default with [`Lookup::unwrap_or`]. Keeping the three outcomes
/// apart lets diagnostics tell "not provided" from "broken".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotPresent,
    Failed(EvaluationError),
}

impl<T> Lookup<T> {
    #[inline]
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotPresent | Self::Failed(_) => None,
        }
    }

    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        self.found().unwrap_or(default)
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotPresent, Self::Found)
    }
}
