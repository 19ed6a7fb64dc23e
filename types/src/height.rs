//! Block height type used throughout the module.
//!
//! Every time-dependent rule (voting windows, lot decay) is measured in blocks,
//! never wall-clock time, so all replicas agree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Blocks elapsed from `earlier` to this height (zero if `earlier` is later).
    pub fn blocks_since(&self, earlier: BlockHeight) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This height advanced by `blocks`, saturating at `u64::MAX`.
    pub fn saturating_add(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// The following block.
    pub fn next(&self) -> Self {
        self.saturating_add(1)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
