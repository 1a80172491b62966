//! Last-write-wins gate between hierarchy fetches and re-layout.
//!
//! Every fetch takes a [`FetchToken`] before it starts. When its records
//! arrive, only the most recently issued token may turn them into a chart;
//! results of superseded fetches are dropped whole, so a layout is never
//! built from a mix of old and new rows.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::HierarchyChart;
use crate::config::Config;
use crate::error::Result;
use crate::ir::HierarchyInput;

/// Strictly increasing ticket for one fetch. Token 0 is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RefreshGuard {
    latest: AtomicU64,
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the token for a new fetch, superseding every earlier one.
    pub fn begin(&self) -> FetchToken {
        FetchToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Builds a fresh chart from a completed fetch, or returns `None` when a
    /// newer fetch has started since `token` was issued.
    pub fn accept(
        &self,
        token: FetchToken,
        input: HierarchyInput,
        config: &Config,
    ) -> Option<Result<HierarchyChart>> {
        if !self.is_current(token) {
            debug!(
                token = token.0,
                latest = self.latest.load(Ordering::SeqCst),
                "discarding superseded hierarchy fetch"
            );
            return None;
        }
        Some(HierarchyChart::build(input, config))
    }
}
