pub type FloeResult<T> = Result<T, FloeError>;

#[derive(thiserror::Error, Debug)]
pub enum FloeError {
    #[error("structure mismatch: {0}")]
    StructureMismatch(String),

    #[error("domain range error: {0}")]
    DomainRange(String),

    #[error("empty path: {0}")]
    EmptyPath(String),

    #[error("child not found: {0}")]
    ChildNotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FloeError {
    pub fn structure_mismatch(msg: impl Into<String>) -> Self {
        Self::StructureMismatch(msg.into())
    }

    pub fn domain_range(msg: impl Into<String>) -> Self {
        Self::DomainRange(msg.into())
    }

    pub fn empty_path(msg: impl Into<String>) -> Self {
        Self::EmptyPath(msg.into())
    }

    pub fn child_not_found(msg: impl Into<String>) -> Self {
        Self::ChildNotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Prefix a tree location onto a structure mismatch; other variants pass through.
    pub fn within(self, segment: impl std::fmt::Display) -> Self {
        match self {
            Self::StructureMismatch(msg) => Self::StructureMismatch(format!("{segment}.{msg}")),
            other => other,
        }
    }

    pub fn is_structure_mismatch(&self) -> bool {
        matches!(self, Self::StructureMismatch(_))
    }

    pub fn is_domain_range(&self) -> bool {
        matches!(self, Self::DomainRange(_))
    }
}

impl From<serde_json::Error> for FloeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
