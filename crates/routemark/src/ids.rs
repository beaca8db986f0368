//! Trace identifiers in object-id layout.
//!
//! 12 bytes, rendered as 24 lowercase hex characters:
//!
//! | bytes | content |
//! |-------|---------|
//! | 0..4  | unix time in seconds, big endian |
//! | 4..9  | random salt chosen once per process |
//! | 9..12 | 24-bit counter, randomly seeded, incremented per id |

use std::fmt::Write as _;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(rand::random);
static COUNTER: LazyLock<AtomicU32> = LazyLock::new(|| AtomicU32::new(rand::random()));

/// Generate a new trace id.
pub fn object_id() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    #[allow(clippy::cast_possible_truncation)]
    let seconds = seconds as u32;
    let count = COUNTER.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
    encode(seconds, *PROCESS_UNIQUE, count)
}

fn encode(seconds: u32, process_unique: [u8; 5], count: u32) -> String {
    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
    bytes[4..9].copy_from_slice(&process_unique);
    bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
    bytes.iter().fold(String::with_capacity(24), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    })
}
