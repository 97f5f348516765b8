//! Allocation bookkeeping keyed by caller-supplied ids.
//!
//! A [`LeakTracker`] is an ordinary value: create one per test or per
//! session, [`record`](LeakTracker::record) every allocation under an id,
//! [`release`](LeakTracker::release) it when the buffer is dropped, and ask
//! for a [`report`](LeakTracker::report) at the end.
//!
//! ```
//! use kronly::leak::LeakTracker;
//!
//! let mut tracker = LeakTracker::new();
//! let dst = tracker.record(16 * 8, 1);
//! let _scratch = tracker.record(64, 2);
//! tracker.release(dst).unwrap();
//!
//! let report = tracker.report().expect("id 2 is still outstanding");
//! assert_eq!(report.total_bytes, 64);
//! ```

use std::{collections::BTreeMap, fmt};

use tracing::{debug, warn};

use crate::error::{release_error, Result};

/// Receipt for one recorded allocation. Hand it back to
/// [`LeakTracker::release`] to return the bytes.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an allocation that is never released is reported as a leak"]
pub struct AllocationTag {
    id: i32,
    size: usize,
}

impl AllocationTag {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

#[derive(Debug, Default, Clone)]
pub struct LeakTracker {
    allocated_bytes: usize,
    by_id: BTreeMap<i32, usize>,
}

impl LeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `size` bytes under `id`.
    pub fn record(&mut self, size: usize, id: i32) -> AllocationTag {
        self.allocated_bytes += size;
        *self.by_id.entry(id).or_insert(0) += size;
        debug!(id, size, total = self.allocated_bytes, "allocation recorded");
        AllocationTag { id, size }
    }

    /// Returns the bytes of `tag`.
    ///
    /// Releasing more than is outstanding for the tag's id is refused and
    /// leaves every counter unchanged.
    pub fn release(&mut self, tag: AllocationTag) -> Result<()> {
        let outstanding = self.outstanding(tag.id);
        if outstanding < tag.size {
            warn!(
                id = tag.id,
                size = tag.size,
                outstanding,
                "trying to free more than was allocated"
            );
            return Err(release_error(tag.id, tag.size, outstanding));
        }

        self.by_id.insert(tag.id, outstanding - tag.size);
        self.allocated_bytes -= tag.size;
        debug!(id = tag.id, size = tag.size, total = self.allocated_bytes, "allocation released");
        Ok(())
    }

    /// Bytes recorded and not yet released, across all ids.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes
    }

    /// Bytes recorded and not yet released under `id`.
    pub fn outstanding(&self, id: i32) -> usize {
        self.by_id.get(&id).copied().unwrap_or(0)
    }

    /// Summary of unreleased memory, or `None` if everything was released.
    pub fn report(&self) -> Option<LeakReport> {
        if self.allocated_bytes == 0 {
            return None;
        }

        let entries = self
            .by_id
            .iter()
            .map(|(&id, &bytes)| LeakEntry {
                id,
                bytes,
                percent: if bytes == 0 {
                    0
                } else {
                    100 * bytes / self.allocated_bytes
                },
            })
            .collect();

        Some(LeakReport {
            total_bytes: self.allocated_bytes,
            entries,
        })
    }
}

/// Outstanding bytes for one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakEntry {
    pub id: i32,
    pub bytes: usize,
    /// Integer share of the total, rounded down.
    pub percent: usize,
}

/// Snapshot produced by [`LeakTracker::report`]. Ids are listed in
/// ascending order, including ids whose allocations were all released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakReport {
    pub total_bytes: usize,
    pub entries: Vec<LeakEntry>,
}

impl fmt::Display for LeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MEMORY LEAKS")?;
        writeln!(f, "{} bytes left unfreed", self.total_bytes)?;
        for e in &self.entries {
            writeln!(
                f,
                "id {:>3}   allocated {:>8} bytes  ({}%)",
                e.id, e.bytes, e.percent
            )?;
        }
        Ok(())
    }
}
