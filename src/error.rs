//! Error handling for the dsakit library
//!
//! Every contract violation detected by a container or algorithm is surfaced
//! as a [`DsaError`] value local to the failing call. Callers decide whether
//! to abort, recover or propagate.

use thiserror::Error;

/// Main error type for the dsakit library
#[derive(Error, Debug)]
pub enum DsaError {
    /// Backing storage could not be obtained from the allocator
    #[error("Allocation failed: requested {size} bytes")]
    AllocationFailure {
        /// Number of bytes requested
        size: usize,
    },

    /// Requested capacity times element size exceeds the addressable range
    #[error("Capacity overflow: {requested} elements of {element_size} bytes")]
    CapacityOverflow {
        /// Requested number of elements
        requested: usize,
        /// Size of a single element in bytes
        element_size: usize,
    },

    /// Index outside the valid bounds of a container
    #[error("Out of range: index {index}, size {size}")]
    OutOfRange {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Read or removal attempted on an empty container
    #[error("Empty container: cannot {operation} on empty {container}")]
    EmptyContainer {
        /// Container type name
        container: &'static str,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Lookup of a key that is not present
    #[error("Key not found: '{key}'")]
    KeyNotFound {
        /// Lossy UTF-8 rendering of the key
        key: String,
    },

    /// Malformed `[start, end)` argument
    #[error("Invalid range: [{start}, {end}) for size {size}")]
    InvalidRange {
        /// Range start
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Size of the container or bound the range was checked against
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// I/O errors from configuration files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DsaError {
    /// Create an allocation failure error
    pub fn allocation_failure(size: usize) -> Self {
        Self::AllocationFailure { size }
    }

    /// Create a capacity overflow error
    pub fn capacity_overflow(requested: usize, element_size: usize) -> Self {
        Self::CapacityOverflow {
            requested,
            element_size,
        }
    }

    /// Create an out of range error
    pub fn out_of_range(index: usize, size: usize) -> Self {
        Self::OutOfRange { index, size }
    }

    /// Create an empty container error
    pub fn empty_container(container: &'static str, operation: &'static str) -> Self {
        Self::EmptyContainer {
            container,
            operation,
        }
    }

    /// Create a key not found error from raw key bytes
    pub fn key_not_found(key: &[u8]) -> Self {
        Self::KeyNotFound {
            key: String::from_utf8_lossy(key).into_owned(),
        }
    }

    /// Create an invalid range error
    pub fn invalid_range(start: usize, end: usize, size: usize) -> Self {
        Self::InvalidRange { start, end, size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Allocation failures may succeed on retry once memory is released;
    /// everything else is a caller bug that retrying will not fix.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AllocationFailure { .. } => true,
            Self::Io(_) => true,
            Self::CapacityOverflow { .. } => false,
            Self::OutOfRange { .. } => false,
            Self::EmptyContainer { .. } => false,
            Self::KeyNotFound { .. } => false,
            Self::InvalidRange { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::AllocationFailure { .. } => "allocation",
            Self::CapacityOverflow { .. } => "capacity",
            Self::OutOfRange { .. } => "range",
            Self::EmptyContainer { .. } => "empty",
            Self::KeyNotFound { .. } => "key",
            Self::InvalidRange { .. } => "invalid_range",
            Self::Configuration { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DsaError>;

/// Assert that an index addresses a live element
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(DsaError::out_of_range(index, size))
    } else {
        Ok(())
    }
}

/// Assert that an index is a valid insertion point (`index <= size`)
#[inline]
pub fn check_insert_position(index: usize, size: usize) -> Result<()> {
    if index > size {
        Err(DsaError::out_of_range(index, size))
    } else {
        Ok(())
    }
}

/// Assert that `[start, end)` is a well-formed range inside `[0, size]`
#[inline]
pub fn check_range(start: usize, end: usize, size: usize) -> Result<()> {
    if start > end || end > size {
        return Err(DsaError::invalid_range(start, end, size));
    }
    Ok(())
}
