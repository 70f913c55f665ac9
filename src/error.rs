use std::fmt;

/// Errors that can occur when reading or dispatching over a variant container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// Failed to acquire the lock guarding a shared container
    LockError,
    /// No alternative has ever been written to the container
    NoActiveAlternative,
    /// The requested alternative exists but another one was written more recently
    InactiveAlternative {
        /// Index of the alternative that was asked for
        requested: usize,
        /// Index of the alternative that is currently active
        active: usize,
    },
}

impl fmt::Display for VariantError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VariantError::LockError => write!(f, "Failed to acquire lock"),
            VariantError::NoActiveAlternative => {
                write!(f, "No alternative has been written to the container")
            }
            VariantError::InactiveAlternative { requested, active } => write!(
                f,
                "Alternative {} is not active (active alternative is {})",
                requested, active
            ),
        }
    }
}

impl std::error::Error for VariantError {}
