//! Error types returned by the pool, the process table and `MemoryState`.
//!
//! Every error leaves the state exactly as it was before the call.

use thiserror::Error;

use crate::process::ProcessId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Empty, at least `MAX_NAME_LENGTH` bytes long, or containing whitespace
    #[error("invalid process name '{0}'")]
    InvalidName(String),

    #[error("process '{0}' is already registered")]
    DuplicateName(String),

    #[error("invalid size {size}: must be between {min} and {max}")]
    InvalidSize { size: i64, min: usize, max: usize },

    #[error("process table is full ({max_processes} processes)")]
    CapacityExceeded { max_processes: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationError {
    #[error("not enough memory: {requested} frames requested, {available} available")]
    InsufficientMemory { requested: usize, available: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("unknown process {0}")]
    UnknownProcess(ProcessId),

    #[error("process '{0}' is already loaded")]
    AlreadyLoaded(String),

    #[error("not enough memory: {requested} frames requested, {available} available")]
    InsufficientMemory { requested: usize, available: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("unknown process {0}")]
    UnknownProcess(ProcessId),

    #[error("process '{0}' is not loaded")]
    ProcessNotLoaded(String),
}

impl From<AllocationError> for LoadError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::InsufficientMemory { requested, available } => {
                LoadError::InsufficientMemory { requested, available }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_error_converts_to_load_error() {
        let err: LoadError = AllocationError::InsufficientMemory { requested: 3, available: 1 }.into();
        assert_eq!(err, LoadError::InsufficientMemory { requested: 3, available: 1 });
        assert_eq!(err.to_string(), "not enough memory: 3 frames requested, 1 available");
    }

    #[test]
    fn test_display_messages() {
        let err = RegistrationError::InvalidSize { size: -3, min: 1, max: 500_000 };
        assert_eq!(err.to_string(), "invalid size -3: must be between 1 and 500000");

        let err = RegistrationError::CapacityExceeded { max_processes: 25 };
        assert_eq!(err.to_string(), "process table is full (25 processes)");

        let err = LoadError::UnknownProcess(ProcessId::from_index(7));
        assert_eq!(err.to_string(), "unknown process #7");

        let err = AccessError::ProcessNotLoaded("P1".to_string());
        assert_eq!(err.to_string(), "process 'P1' is not loaded");
    }

    #[test]
    fn test_errors_are_std_errors() {
        let err: Box<dyn std::error::Error> = Box::new(RegistrationError::DuplicateName("P0".to_string()));
        assert_eq!(err.to_string(), "process 'P0' is already registered");
    }
}
