//! Sales block flag
//!
//! A sales block is an explicit, reasoned refusal to extend further
//! credit, independent of the credit limit. The core stores and honors
//! the flag; deciding when to set it is external risk policy, and a
//! payment never lifts it automatically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active block on new sales for a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesBlock {
    /// Free-text reason shown to the operator and echoed in rejections
    pub reason: String,
    /// When the block was placed
    pub blocked_at: DateTime<Utc>,
}

impl SalesBlock {
    /// Creates a block with the given reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            blocked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_carries_reason() {
        let block = SalesBlock::new("chronic late payer");
        assert_eq!(block.reason, "chronic late payer");
    }
}
