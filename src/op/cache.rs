//! Bounded FIFO cache for compiled operators.
//!
//! Compiling a table is pure and deterministic, so the cache is purely a
//! performance layer: a lookup racing an insertion for the same key may
//! rebuild redundantly, which is harmless. Eviction is strict FIFO on
//! insertion order; a hit does not refresh a key's position. Keeping the
//! policy this simple is deliberate, since real programs cycle through a
//! handful of common operators that never come close to the capacity.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::op::synth::{compile_operator, CompiledOp};
use crate::op::table::OpTable;

/// A bounded, thread-safe cache of compiled operators keyed by the table's
/// canonical key.
pub struct OpCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    map: HashMap<u32, Arc<CompiledOp>>,
    /// Keys in insertion order; the front is evicted first.
    order: VecDeque<u32>,
    hits: u64,
    lookups: u64,
}

impl OpCache {
    /// Capacity of the shared process-wide cache.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a cache holding at most `capacity` compiled operators.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                order: VecDeque::new(),
                hits: 0,
                lookups: 0,
            }),
        }
    }

    /// The shared process-wide cache.
    pub fn shared() -> &'static OpCache {
        static SHARED: OnceLock<OpCache> = OnceLock::new();
        SHARED.get_or_init(|| OpCache::new(Self::DEFAULT_CAPACITY))
    }

    /// Look up the compiled form of `table`, compiling and inserting it on a
    /// miss.
    pub fn get_or_compile(&self, table: &OpTable) -> Arc<CompiledOp> {
        let key = table.key();

        {
            let mut inner = self.lock();
            inner.lookups += 1;
            if let Some(op) = inner.map.get(&key) {
                let op = Arc::clone(op);
                inner.hits += 1;
                return op;
            }
        }

        // Compile outside the lock; a racing thread at worst repeats this
        // pure work.
        let op = Arc::new(compile_operator(table));

        let mut inner = self.lock();
        let Inner { map, order, .. } = &mut *inner;
        if let Some(existing) = map.get(&key) {
            // The racer won; keep its value so all callers share one Arc.
            return Arc::clone(existing);
        }
        map.insert(key, Arc::clone(&op));
        order.push_back(key);
        while map.len() > self.capacity {
            if let Some(oldest) = order.pop_front() {
                map.remove(&oldest);
            } else {
                break;
            }
        }
        op
    }

    /// True if a table with this key is currently cached.
    pub fn contains(&self, key: u32) -> bool {
        self.lock().map.contains_key(&key)
    }

    /// Number of cached operators.
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached operators.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.lock().hits
    }

    /// Total lookups.
    pub fn lookups(&self) -> u64 {
        self.lock().lookups
    }

    /// Fraction of lookups served from the cache (0.0 when none yet).
    pub fn hit_rate(&self) -> f64 {
        let inner = self.lock();
        if inner.lookups == 0 {
            0.0
        } else {
            inner.hits as f64 / inner.lookups as f64
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic elsewhere cannot leave the bookkeeping inconsistent: every
        // mutation happens in a single critical section, so recover the
        // guard instead of propagating poison.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for OpCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
