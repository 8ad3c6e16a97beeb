//! Input limits
//!
//! The client only checks batch size before submission. Table names and keys
//! are checked by the state machine, so a bad item comes back as that item's
//! outcome instead of failing its siblings.

use thiserror::Error;

/// Size limits for table names, keys and batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum table name length in bytes (default: 255)
    pub max_table_name_bytes: usize,

    /// Maximum key length in bytes (default: 1024)
    pub max_key_bytes: usize,

    /// Maximum number of items in one batch (default: 10,000)
    pub max_batch_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_table_name_bytes: 255,
            max_key_bytes: 1024,
            max_batch_size: 10_000,
        }
    }
}

impl Limits {
    /// Validate a table name: non-empty, within length, no NUL bytes.
    pub fn validate_table_name(&self, name: &str) -> Result<(), LimitError> {
        if name.is_empty() {
            return Err(LimitError::EmptyTableName);
        }
        if name.len() > self.max_table_name_bytes {
            return Err(LimitError::TableNameTooLong {
                actual: name.len(),
                max: self.max_table_name_bytes,
            });
        }
        if name.contains('\0') {
            return Err(LimitError::ContainsNul {
                what: "table name".to_string(),
            });
        }
        Ok(())
    }

    /// Validate a key length and content.
    pub fn validate_key(&self, key: &str) -> Result<(), LimitError> {
        if key.len() > self.max_key_bytes {
            return Err(LimitError::KeyTooLong {
                actual: key.len(),
                max: self.max_key_bytes,
            });
        }
        if key.contains('\0') {
            return Err(LimitError::ContainsNul {
                what: "key".to_string(),
            });
        }
        Ok(())
    }

    /// Validate a batch size: at least one item, at most `max_batch_size`.
    pub fn validate_batch_size(&self, len: usize) -> Result<(), LimitError> {
        if len == 0 {
            return Err(LimitError::EmptyBatch);
        }
        if len > self.max_batch_size {
            return Err(LimitError::BatchTooLarge {
                actual: len,
                max: self.max_batch_size,
            });
        }
        Ok(())
    }

    /// Validate the table and key of one batch item.
    pub fn validate_item(&self, table: &str, key: &str) -> Result<(), LimitError> {
        self.validate_table_name(table)?;
        self.validate_key(key)
    }
}

/// Limit validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Table name is empty
    #[error("table name must not be empty")]
    EmptyTableName,

    /// Table name exceeds maximum length
    #[error("table name too long: {actual} bytes exceeds maximum {max}")]
    TableNameTooLong { actual: usize, max: usize },

    /// Key exceeds maximum length
    #[error("key too long: {actual} bytes exceeds maximum {max}")]
    KeyTooLong { actual: usize, max: usize },

    /// Name or key contains a NUL byte
    #[error("{what} must not contain NUL bytes")]
    ContainsNul { what: String },

    /// Batch has no items
    #[error("batch must contain at least one request")]
    EmptyBatch,

    /// Batch exceeds maximum size
    #[error("batch too large: {actual} requests exceeds maximum {max}")]
    BatchTooLarge { actual: usize, max: usize },
}
