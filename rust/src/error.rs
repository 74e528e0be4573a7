//! Error handling and result types for AvlTreeMap operations.
//!
//! Every failure is reported synchronously at the call that caused it. Lookups
//! report a missing key, cursor operations report misuse of a position, and
//! allocator exhaustion is surfaced before anything is linked into the tree.

/// Error type for AVL tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvlTreeError {
    /// Key not found in the tree.
    KeyNotFound,
    /// A cursor or position was used where it has no element to refer to:
    /// dereferencing or advancing past the end, stepping before the first
    /// element, or using a position whose node has been erased.
    InvalidIterator(String),
    /// The node allocator refused to hand out a new slot.
    AllocationError(String),
    /// Internal data structure integrity violation.
    DataIntegrityError(String),
    /// Tree corruption detected.
    CorruptedTree(String),
}

impl AvlTreeError {
    /// Create an InvalidIterator error with context
    pub fn invalid_iterator(operation: &str, details: &str) -> Self {
        Self::InvalidIterator(format!("cannot {}: {}", operation, details))
    }

    /// Create an AllocationError with context
    pub fn allocation_error(resource: &str, reason: &str) -> Self {
        Self::AllocationError(format!("Failed to allocate {}: {}", resource, reason))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Check if this error is a missing key
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound)
    }

    /// Check if this error is a cursor misuse
    pub fn is_invalid_iterator(&self) -> bool {
        matches!(self, Self::InvalidIterator(_))
    }

    /// Check if this error is an allocation failure
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationError(_))
    }
}

impl std::fmt::Display for AvlTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvlTreeError::KeyNotFound => write!(f, "Key not found in tree"),
            AvlTreeError::InvalidIterator(msg) => write!(f, "Invalid iterator use: {}", msg),
            AvlTreeError::AllocationError(msg) => write!(f, "Allocation error: {}", msg),
            AvlTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            AvlTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for AvlTreeError {}

/// Public result type for tree operations that may fail
pub type AvlResult<T> = Result<T, AvlTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, AvlTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, AvlTreeError>;

/// Result type for cursor and position operations
pub type CursorResult<T> = Result<T, AvlTreeError>;

/// Result type for tree construction and copying
pub type InitResult<T> = Result<T, AvlTreeError>;

/// Result extension trait for improved error handling
pub trait AvlResultExt<T> {
    /// Convert to an AvlResult with additional context
    fn with_context(self, context: &str) -> AvlResult<T>;

    /// Convert to an AvlResult with operation context
    fn with_operation(self, operation: &str) -> AvlResult<T>;

    /// Log error and continue with default value
    fn or_default_with_log(self) -> T
    where
        T: Default;
}

impl<T> AvlResultExt<T> for Result<T, AvlTreeError> {
    fn with_context(self, context: &str) -> AvlResult<T> {
        self.map_err(|e| match e {
            AvlTreeError::KeyNotFound => AvlTreeError::KeyNotFound,
            AvlTreeError::InvalidIterator(msg) => {
                AvlTreeError::InvalidIterator(format!("{}: {}", context, msg))
            }
            AvlTreeError::AllocationError(msg) => {
                AvlTreeError::AllocationError(format!("{}: {}", context, msg))
            }
            AvlTreeError::DataIntegrityError(msg) => AvlTreeError::data_integrity(context, &msg),
            AvlTreeError::CorruptedTree(msg) => AvlTreeError::corrupted_tree(context, &msg),
        })
    }

    fn with_operation(self, operation: &str) -> AvlResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }

    fn or_default_with_log(self) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(e) => {
                log::warn!("AVL tree operation failed, using default: {}", e);
                T::default()
            }
        }
    }
}
