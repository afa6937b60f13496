//! # Packet Handle
//!
//! Defines the `Packet` handle passed to the error models. The payload is
//! stored in an `Arc<[u8]>` so clones are zero-copy, and every packet
//! carries a stable unique identifier assigned at construction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

/// Immutable handle to a simulated packet.
///
/// The identifier is drawn from a process-wide monotonic counter, so two
/// packets built with [`Packet::new`] never share a uid. Clones share both
/// the uid and the payload.
#[derive(Clone, Debug)]
pub struct Packet {
    uid: u64,
    payload: Arc<[u8]>,
}

impl Packet {
    /// Creates a new `Packet` with a freshly assigned uid.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            uid: NEXT_UID.fetch_add(1, Ordering::Relaxed),
            payload: payload.into_boxed_slice().into(),
        }
    }

    /// Creates a `Packet` with an explicit uid, for replay and tests.
    pub fn with_uid(uid: u64, payload: Vec<u8>) -> Self {
        Self {
            uid,
            payload: payload.into_boxed_slice().into(),
        }
    }

    /// Stable unique identifier of this packet.
    #[inline]
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// Raw payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Payload length in bits.
    #[inline]
    pub fn len_bits(&self) -> u64 {
        self.payload.len() as u64 * 8
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
