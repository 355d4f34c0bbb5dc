//! Snowflake ID Generator
//!
//! Time-ordered 63-bit identifiers for users, pets, features and tombstones.
//! Layout: 41 bits milliseconds since [`REGISTRY_EPOCH`], 10 bits worker,
//! 12 bits sequence.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Registry epoch (2023-01-01T00:00:00.000Z)
pub const REGISTRY_EPOCH: u64 = 1_672_531_200_000;

const WORKER_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const WORKER_MASK: u64 = (1 << WORKER_BITS) - 1;

/// Largest worker ID that fits the layout.
pub const MAX_WORKER_ID: u16 = WORKER_MASK as u16;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    worker_id: u64,
    /// Last issued (timestamp << 12 | sequence).
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new generator; the worker id is truncated to 10 bits.
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_id: u64::from(worker_id) & WORKER_MASK,
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let last_ts = current >> SEQUENCE_BITS;
            let now = current_millis().max(last_ts);

            // Sequence exhausted within this millisecond: borrow the next one.
            let next = if now == last_ts {
                let seq = (current & SEQUENCE_MASK) + 1;
                if seq > SEQUENCE_MASK {
                    (now + 1) << SEQUENCE_BITS
                } else {
                    (now << SEQUENCE_BITS) | seq
                }
            } else {
                now << SEQUENCE_BITS
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let ts = next >> SEQUENCE_BITS;
                    let seq = next & SEQUENCE_MASK;
                    let id = ((ts - REGISTRY_EPOCH) << (WORKER_BITS + SEQUENCE_BITS))
                        | (self.worker_id << SEQUENCE_BITS)
                        | seq;
                    return id as i64;
                }
                Err(observed) => current = observed,
            }
        }
    }
}

fn current_millis() -> u64 {
    // Clamp pre-epoch clocks so the subtraction above never underflows.
    (Utc::now().timestamp_millis().max(0) as u64).max(REGISTRY_EPOCH)
}

/// Extract timestamp (unix millis) from snowflake ID
pub fn extract_timestamp(snowflake: i64) -> u64 {
    ((snowflake as u64) >> (WORKER_BITS + SEQUENCE_BITS)) + REGISTRY_EPOCH
}

/// Parse snowflake from its string form (as exposed in DTOs)
pub fn from_string(s: &str) -> Result<i64, std::num::ParseIntError> {
    s.parse()
}
