//! # Batch Splitting Policy
//!
//! Large binding sets are submitted to the resolver in chunks to respect the
//! binding transport's size limits, with a fixed inter-batch delay as
//! backpressure against its implicit rate limits. The delay is a politeness
//! policy, not a correctness requirement; the ordering constraint is that no
//! two batches for the same in-progress version run concurrently.

use std::time::Duration;

/// How a binding set is chunked for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Number of batches to split into. The historical policy always halves;
    /// raising this caps the per-batch size for very large binding sets.
    pub batch_count: usize,
    /// Fixed pause between consecutive batch submissions.
    pub inter_batch_delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_count: 2,
            inter_batch_delay: Duration::from_millis(1000),
        }
    }
}

/// Splits `items` into at most `batch_count` contiguous chunks of
/// `ceil(n / batch_count)` items each, preserving order.
///
/// Fewer chunks come back when there are not enough items to fill them; an
/// empty input yields no chunks at all.
#[must_use]
pub fn split_into_batches<T: Clone>(items: &[T], batch_count: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let batch_count = batch_count.max(1);
    let chunk_size = items.len().div_ceil(batch_count);
    items.chunks(chunk_size).map(<[T]>::to_vec).collect()
}

// =============================================================================
// TESTS
// =============================================================================
