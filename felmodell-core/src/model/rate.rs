//! Rate-based error model.
//!
//! Packets are flagged as corrupted according to a per-trial error rate and
//! a granularity unit. The rate keeps the same meaning across units; only
//! the number of independent trials per packet changes with the unit.

use serde::{Deserialize, Serialize};

use super::ErrorModel;
use crate::packet::Packet;
use crate::random::{SeededUniform, UniformSource};

/// Granularity at which independent corruption trials are performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorUnit {
    /// One trial per payload bit.
    Bit,
    /// One trial per payload byte.
    #[default]
    Byte,
    /// A single trial per packet, independent of length.
    Packet,
}

/// Probabilistic error model.
///
/// Each trial draws one variate from the configured [`UniformSource`] and
/// corrupts on `variate < rate`. Under the `Byte` and `Bit` units the
/// trials run in payload order, starting at byte (bit) zero, and stop at
/// the first hit, so the number of variates consumed per decision is
/// reproducible under a fixed seed. A zero-length packet gets zero trials
/// under those units and is therefore never corrupted by them.
///
/// The rate is not range-checked: values at or above 1.0 corrupt every
/// trial, values at or below 0.0 corrupt none.
pub struct RateErrorModel {
    enabled: bool,
    unit: ErrorUnit,
    rate: f64,
    source: Box<dyn UniformSource>,
}

impl RateErrorModel {
    /// Creates a model with the given per-trial rate at byte granularity,
    /// drawing from an entropy-seeded source.
    pub fn new(rate: f64) -> Self {
        Self {
            enabled: true,
            unit: ErrorUnit::default(),
            rate,
            source: Box::new(SeededUniform::default()),
        }
    }

    /// Sets the trial granularity.
    pub fn with_unit(mut self, unit: ErrorUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Replaces the variate source.
    pub fn with_source(mut self, source: impl UniformSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn unit(&self) -> ErrorUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: ErrorUnit) {
        self.unit = unit;
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Sets the per-trial error rate. Accepts any value; out-of-range rates
    /// behave as always-corrupt (`>= 1.0`) or never-corrupt (`<= 0.0`).
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    /// Replaces the variate source. Takes effect on the next decision.
    pub fn set_source(&mut self, source: impl UniformSource + 'static) {
        self.source = Box::new(source);
    }

    fn corrupt_packet(&mut self) -> bool {
        self.source.draw() < self.rate
    }

    fn corrupt_trials(&mut self, trials: u64) -> bool {
        for _ in 0..trials {
            if self.source.draw() < self.rate {
                return true;
            }
        }
        false
    }
}

impl Default for RateErrorModel {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl std::fmt::Debug for RateErrorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateErrorModel")
            .field("enabled", &self.enabled)
            .field("unit", &self.unit)
            .field("rate", &self.rate)
            .finish_non_exhaustive()
    }
}

impl ErrorModel for RateErrorModel {
    fn corrupt(&mut self, packet: &Packet) -> bool {
        match self.unit {
            ErrorUnit::Packet => self.corrupt_packet(),
            ErrorUnit::Byte => self.corrupt_trials(packet.len() as u64),
            ErrorUnit::Bit => self.corrupt_trials(packet.len_bits()),
        }
    }

    /// Intentional no-op: the model keeps no memory of past decisions, so
    /// there is nothing to clear.
    fn reset(&mut self) {}

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedUniform, SequenceUniform};
    use proptest::prelude::*;

    fn packet(len: usize) -> Packet {
        Packet::new(vec![0u8; len])
    }

    #[test]
    fn test_zero_rate_never_corrupts() {
        for unit in [ErrorUnit::Bit, ErrorUnit::Byte, ErrorUnit::Packet] {
            let mut model = RateErrorModel::new(0.0).with_unit(unit);
            for _ in 0..100 {
                assert!(!model.is_corrupt(&packet(64)));
            }
        }
    }

    #[test]
    fn test_full_rate_always_corrupts() {
        for unit in [ErrorUnit::Bit, ErrorUnit::Byte, ErrorUnit::Packet] {
            let mut model = RateErrorModel::new(1.0).with_unit(unit);
            for _ in 0..100 {
                assert!(model.is_corrupt(&packet(64)));
            }
        }
    }

    #[test]
    fn test_out_of_range_rates_clamp_behaviorally() {
        let mut always = RateErrorModel::new(1.5);
        assert!(always.is_corrupt(&packet(8)));
        let mut never = RateErrorModel::new(-0.5);
        assert!(!never.is_corrupt(&packet(8)));
    }

    #[test]
    fn test_empty_packet_survives_byte_and_bit_units() {
        for unit in [ErrorUnit::Bit, ErrorUnit::Byte] {
            let mut model = RateErrorModel::new(1.0).with_unit(unit);
            assert!(!model.is_corrupt(&packet(0)));
        }
        // The packet unit performs its single trial regardless of length.
        let mut model = RateErrorModel::new(1.0).with_unit(ErrorUnit::Packet);
        assert!(model.is_corrupt(&packet(0)));
    }

    #[test]
    fn test_packet_unit_consumes_exactly_one_draw() {
        let source = FixedUniform::new(0.9);
        let draws = source.counter();
        let mut model = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Packet)
            .with_source(source);
        assert!(!model.is_corrupt(&packet(1500)));
        assert_eq!(draws.get(), 1);
        assert!(!model.is_corrupt(&packet(0)));
        assert_eq!(draws.get(), 2);
    }

    #[test]
    fn test_byte_unit_stops_at_first_triggering_draw() {
        let source = SequenceUniform::new(vec![0.9, 0.9, 0.2, 0.9]);
        let draws = source.counter();
        let mut model = RateErrorModel::new(0.5).with_source(source);
        assert!(model.is_corrupt(&packet(8)));
        // Byte 0 and 1 survive, byte 2 triggers: three draws, not eight.
        assert_eq!(draws.get(), 3);
    }

    #[test]
    fn test_byte_unit_exhausts_all_trials_when_nothing_triggers() {
        let source = SequenceUniform::new(vec![0.9]);
        let draws = source.counter();
        let mut model = RateErrorModel::new(0.5).with_source(source);
        assert!(!model.is_corrupt(&packet(8)));
        assert_eq!(draws.get(), 8);
    }

    #[test]
    fn test_bit_unit_runs_eight_trials_per_byte() {
        let source = SequenceUniform::new(vec![0.9, 0.9, 0.9, 0.9, 0.2]);
        let draws = source.counter();
        let mut model = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Bit)
            .with_source(source);
        assert!(model.is_corrupt(&packet(1)));
        assert_eq!(draws.get(), 5);

        let source = SequenceUniform::new(vec![0.9]);
        let draws = source.counter();
        let mut model = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Bit)
            .with_source(source);
        assert!(!model.is_corrupt(&packet(2)));
        assert_eq!(draws.get(), 16);
    }

    #[test]
    fn test_decision_follows_variate_against_rate() {
        let mut below = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Packet)
            .with_source(FixedUniform::new(0.49));
        let mut above = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Packet)
            .with_source(FixedUniform::new(0.51));
        for _ in 0..10 {
            assert!(below.is_corrupt(&packet(32)));
            assert!(!above.is_corrupt(&packet(32)));
        }
    }

    #[test]
    fn test_disabled_model_consumes_no_draws() {
        let source = FixedUniform::new(0.0);
        let draws = source.counter();
        let mut model = RateErrorModel::new(1.0).with_source(source);
        model.disable();
        assert!(!model.is_corrupt(&packet(3)));
        assert_eq!(draws.get(), 0);
        model.enable();
        assert!(model.is_corrupt(&packet(3)));
        assert_eq!(draws.get(), 1);
    }

    #[test]
    fn test_reset_does_not_disturb_the_draw_sequence() {
        let sequence = SequenceUniform::new(vec![0.9, 0.2, 0.7, 0.4, 0.9, 0.1]);
        let mut with_reset = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Packet)
            .with_source(sequence.clone());
        let mut without_reset = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Packet)
            .with_source(sequence);
        let mut a = Vec::new();
        let mut b = Vec::new();
        for _ in 0..6 {
            a.push(with_reset.is_corrupt(&packet(4)));
            with_reset.reset();
            b.push(without_reset.is_corrupt(&packet(4)));
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_replacing_the_source_takes_effect_on_next_decision() {
        let mut model = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Packet)
            .with_source(FixedUniform::new(0.9));
        assert!(!model.is_corrupt(&packet(4)));
        model.set_source(FixedUniform::new(0.1));
        assert!(model.is_corrupt(&packet(4)));
    }

    #[test]
    fn test_observed_error_rate_tracks_configured_rate() {
        let mut model = RateErrorModel::new(0.5)
            .with_unit(ErrorUnit::Packet)
            .with_source(SeededUniform::seeded(42));
        let iterations = 10_000;
        let mut errored = 0;
        for _ in 0..iterations {
            if model.is_corrupt(&packet(32)) {
                errored += 1;
            }
        }
        let observed = errored as f64 / f64::from(iterations);
        assert!((observed - 0.5).abs() < 0.05);
    }

    proptest! {
        #[test]
        fn prop_rate_round_trips(rate in 0.0f64..=1.0) {
            let mut model = RateErrorModel::default();
            model.set_rate(rate);
            prop_assert_eq!(model.rate(), rate);
        }

        #[test]
        fn prop_full_rate_corrupts_any_nonempty_payload(len in 1usize..256) {
            let mut model = RateErrorModel::new(1.0);
            prop_assert!(model.is_corrupt(&packet(len)));
        }
    }

    #[test]
    fn test_unit_round_trips() {
        let mut model = RateErrorModel::default();
        for unit in [ErrorUnit::Bit, ErrorUnit::Byte, ErrorUnit::Packet] {
            model.set_unit(unit);
            assert_eq!(model.unit(), unit);
        }
    }
}
