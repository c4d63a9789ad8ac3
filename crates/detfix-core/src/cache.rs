// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Direct-mapped memoisation of [`Fix64::atan2`].
//!
//! Each slot holds the two operands that produced its angle, so a hash
//! collision is detected and recomputed rather than served. A slot's fields
//! sit behind one mutex and always change together. Lookups never block: a
//! slot held by another thread counts as a miss and the angle is computed
//! without caching it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex};

use tracing::debug;

use crate::fixed::Fix64;

/// Slot count exponent used by [`Atan2Cache::new`] (4096 slots).
pub const DEFAULT_SLOTS_LOG2: u32 = 12;

/// Largest accepted slot count exponent.
pub const MAX_SLOTS_LOG2: u32 = 24;

static SHARED: LazyLock<Atan2Cache> = LazyLock::new(Atan2Cache::new);

/// `(x, y, angle)` as raw values. The zeroed slot is a valid entry:
/// `atan2(0, 0) = 0`.
#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    x: i64,
    y: i64,
    angle: i64,
}

/// Hit and miss counts of an [`Atan2Cache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a slot.
    pub hits: u64,
    /// Lookups that computed the angle.
    pub misses: u64,
}

/// Fixed-size, direct-mapped cache of `atan2` results.
#[derive(Debug)]
pub struct Atan2Cache {
    slots: Box<[Mutex<Slot>]>,
    mask: u32,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for Atan2Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Atan2Cache {
    /// Cache with `2^DEFAULT_SLOTS_LOG2` slots.
    pub fn new() -> Self {
        Self::with_slots_log2(DEFAULT_SLOTS_LOG2)
    }

    /// Cache with `2^slots_log2` slots; the exponent is clamped to
    /// `MAX_SLOTS_LOG2`.
    pub fn with_slots_log2(slots_log2: u32) -> Self {
        let slots_log2 = slots_log2.min(MAX_SLOTS_LOG2);
        let len = 1_usize << slots_log2;
        let slots = (0..len).map(|_| Mutex::new(Slot::default())).collect();
        debug!(slots = len, "atan2 cache created");
        Self {
            slots,
            mask: (1_u32 << slots_log2) - 1,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The process-wide cache behind [`Fix64::atan2_cached`].
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Number of slots.
    pub fn slots(&self) -> usize {
        self.slots.len()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn slot_index(&self, y: i64, x: i64) -> usize {
        let mut h = (x ^ y) as u32;
        h ^= h >> 20;
        (h & self.mask) as usize
    }

    /// `y.atan2(x)`, served from the cache when both operands match the slot.
    pub fn atan2(&self, y: Fix64, x: Fix64) -> Fix64 {
        let index = self.slot_index(y.raw(), x.raw());
        let Some(Ok(mut slot)) = self.slots.get(index).map(Mutex::try_lock) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return y.atan2(x);
        };
        if slot.x == x.raw() && slot.y == y.raw() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Fix64::from_raw(slot.angle);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let angle = y.atan2(x);
        *slot = Slot {
            x: x.raw(),
            y: y.raw(),
            angle: angle.raw(),
        };
        angle
    }

    /// Current hit and miss counts.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Resets every slot and both counters.
    ///
    /// Slots held by a concurrent lookup are waited for.
    pub fn clear(&self) {
        for slot in &*self.slots {
            let mut guard = match slot.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard = Slot::default();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!(slots = self.slots.len(), "atan2 cache cleared");
    }
}

impl Fix64 {
    /// [`Fix64::atan2`] through the process-wide [`Atan2Cache`].
    ///
    /// Returns exactly the uncached result; the cache only saves work.
    pub fn atan2_cached(self, x: Self) -> Self {
        SHARED.atan2(self, x)
    }
}
