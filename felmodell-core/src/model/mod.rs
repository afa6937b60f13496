//! ## felmodell-core::model
//! **Error decision models for link and channel simulation**
//!
//! An error model flags packets as lost/errored; it never alters packet
//! contents. The decision contract is split in two layers: the public
//! [`ErrorModel::is_corrupt`] entry point owns the enabled gate, and each
//! model implements only the decision hook behind it.
//!
//! ### Models:
//! - [`RateErrorModel`]: probabilistic corruption at bit, byte, or packet
//!   granularity.
//! - [`ListErrorModel`]: deterministic corruption of listed packet uids.
//! - [`NoErrorModel`]: never corrupts, for baseline runs.
//!
//! ### Future:
//! - Burst error models (Gilbert-Elliot).

pub mod list;
pub mod rate;

use tracing::trace;

use crate::packet::Packet;

pub use list::ListErrorModel;
pub use rate::{ErrorUnit, RateErrorModel};

/// Decision contract implemented by every error model.
///
/// Callers go through [`is_corrupt`](Self::is_corrupt); the hooks exist for
/// implementors and are only invoked while the model is enabled. Every
/// operation is total: no hook may fail or panic, whatever the
/// configuration.
///
/// Models are `Send` but carry no internal synchronization; each instance
/// is meant to be driven by its single owning channel or device model.
pub trait ErrorModel: Send {
    /// Decision hook. Invoked once per packet, only while enabled.
    fn corrupt(&mut self, packet: &Packet) -> bool;

    /// Clears decision state. Must leave the enabled flag untouched.
    fn reset(&mut self);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Returns `true` if `packet` is to be treated as corrupted.
    ///
    /// A disabled model answers `false` immediately, without consulting the
    /// decision hook (so no variate is consumed).
    fn is_corrupt(&mut self, packet: &Packet) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let errored = self.corrupt(packet);
        if errored {
            trace!(uid = packet.uid(), "packet flagged as corrupted");
        }
        errored
    }

    /// Enables the model. Idempotent.
    fn enable(&mut self) {
        self.set_enabled(true);
    }

    /// Disables the model. Idempotent.
    fn disable(&mut self) {
        self.set_enabled(false);
    }
}

/// Error model that never corrupts a packet.
#[derive(Clone, Copy, Debug)]
pub struct NoErrorModel {
    enabled: bool,
}

impl NoErrorModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for NoErrorModel {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ErrorModel for NoErrorModel {
    #[inline]
    fn corrupt(&mut self, _packet: &Packet) -> bool {
        false
    }

    fn reset(&mut self) {}

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Returns a default-configured error model for ad hoc use: a
/// [`RateErrorModel`] with rate 0.0 at byte granularity.
pub fn default_error_model() -> Box<dyn ErrorModel> {
    Box::new(RateErrorModel::default())
}
