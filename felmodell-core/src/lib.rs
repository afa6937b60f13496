//! # felmodell-core
//!
//! Packet error decision models for deterministic network simulation.
//!
//! A channel or device model holds one error model per link and asks it,
//! once per transmitted packet, whether that packet is to be treated as
//! corrupted. The answer is a plain boolean; what to do with a flagged
//! packet (drop it, tag it, count it) is the caller's business, and the
//! packet payload is never touched here.
//!
//! ### Key Submodules:
//! - `model`: The [`ErrorModel`](model::ErrorModel) contract and its
//!   rate-based, list-based, and no-op implementations.
//! - `packet`: Zero-copy packet handle with a stable unique identifier.
//! - `random`: Pluggable uniform variate sources, seeded or deterministic.
//!
//! ```
//! use felmodell_core::prelude::*;
//!
//! let mut model = RateErrorModel::new(0.001).with_unit(ErrorUnit::Packet);
//! let packet = Packet::new(vec![0u8; 64]);
//! if model.is_corrupt(&packet) {
//!     // drop the packet
//! }
//! ```

pub mod model;
pub mod packet;
pub mod random;

pub mod prelude {
    pub use crate::model::{
        default_error_model, ErrorModel, ErrorUnit, ListErrorModel, NoErrorModel, RateErrorModel,
    };
    pub use crate::packet::Packet;
    pub use crate::random::{FixedUniform, SeededUniform, SequenceUniform, UniformSource};
}

pub use model::{default_error_model, ErrorModel};
pub use packet::Packet;
