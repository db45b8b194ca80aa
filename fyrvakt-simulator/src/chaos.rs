//! Chaos module.
//!
//! Implements fault injection for simulation: a mangled packet loses one of
//! its required fields, which the validator must then reject.

use fyrvakt_core::RawPacket;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Required fields a fault can strip.
pub const STRIPPABLE_FIELDS: [&str; 4] = ["id", "source", "timestamp", "payload"];

#[derive(Debug, Clone)]
pub struct ChaosInjector {
    rng: StdRng,
    probability: f64,
}

impl ChaosInjector {
    /// `probability` is clamped to `0.0..=1.0`.
    pub fn new(seed: u64, probability: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Possibly strips a required field from `packet`. Returns the name of the
    /// stripped field when a fault was injected.
    pub fn inject(&mut self, packet: &mut RawPacket) -> Option<&'static str> {
        if self.probability == 0.0 || !self.rng.random_bool(self.probability) {
            return None;
        }
        let field = STRIPPABLE_FIELDS[self.rng.random_range(0..STRIPPABLE_FIELDS.len())];
        match field {
            "id" => packet.id = None,
            "source" => packet.source = None,
            "timestamp" => packet.timestamp = None,
            _ => packet.payload = None,
        }
        Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyrvakt_core::validate;

    fn packet() -> RawPacket {
        RawPacket::new("pkt-1", "D1", 1, "data chunk 1")
    }

    #[test]
    fn zero_probability_never_injects() {
        let mut chaos = ChaosInjector::new(7, 0.0);
        for _ in 0..100 {
            let mut p = packet();
            assert!(chaos.inject(&mut p).is_none());
            assert!(validate(&p));
        }
    }

    #[test]
    fn certain_fault_breaks_validation() {
        let mut chaos = ChaosInjector::new(7, 1.0);
        for _ in 0..100 {
            let mut p = packet();
            let field = chaos.inject(&mut p).unwrap();
            assert!(STRIPPABLE_FIELDS.contains(&field));
            assert!(!validate(&p));
        }
    }

    #[test]
    fn same_seed_same_faults() {
        let mut a = ChaosInjector::new(42, 0.5);
        let mut b = ChaosInjector::new(42, 0.5);
        let run_a: Vec<_> = (0..50).map(|_| a.inject(&mut packet())).collect();
        let run_b: Vec<_> = (0..50).map(|_| b.inject(&mut packet())).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        assert_eq!(ChaosInjector::new(1, 3.0).probability(), 1.0);
        assert_eq!(ChaosInjector::new(1, -1.0).probability(), 0.0);
    }
}
