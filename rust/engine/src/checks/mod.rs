//! Skills checks: rating-driven probabilities resolved with one draw each.
//!
//! Every check computes a rate from its inputs and the [`Tuning`] table, clamps
//! it to `[0, 1]`, draws a single `next_double`, and reports whether the event
//! occurred along with a signed margin. Pipelines invoke checks in a fixed
//! order; replay compatibility depends on that order.
//!
//! # Examples
//!
//! ```
//! use gridiron_engine::checks::{FlatCheck, SkillsCheck};
//! use gridiron_engine::rng::DeterministicRandom;
//! use gridiron_engine::tuning::Tuning;
//!
//! let mut rng = DeterministicRandom::from_seed(7);
//! let outcome = FlatCheck::new("certain", 1.0)
//!     .execute(&mut rng, &Tuning::default())
//!     .unwrap();
//! assert!(outcome.occurred);
//! ```

pub mod injury;
pub mod kicking;
pub mod passing;
pub mod penalty;
pub mod rushing;

pub use injury::InjuryCheck;
pub use kicking::{
    BadSnapCheck, FairCatchCheck, FieldGoalBlockCheck, FieldGoalMakeCheck, KickoffMuffCheck,
    KickoffOutOfBoundsCheck, OnsideAttemptCheck, OnsideRecoveryCheck, PuntBlockCheck,
    PuntDownedCheck, PuntMuffCheck, PuntOutOfBoundsCheck,
};
pub use passing::{
    BigPlayCheck, InterceptionCheck, PassCompletionCheck, PassProtectionCheck, QbPressureCheck,
    YacOpportunityCheck,
};
pub use penalty::{PenaltyCheck, PenaltyCheckOutcome, PenaltyContext, TackleContext};
pub use rushing::{BreakawayCheck, FumbleCheck, FumbleContext, RunBlockingCheck, TackleBreakCheck};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SimError;
use crate::rng::RandomSource;
use crate::tuning::Tuning;

/// Result of one check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub occurred: bool,
    /// `(probability - roll) * 100`; positive means the event happened comfortably
    pub margin: f64,
    pub probability: f64,
    pub roll: f64,
}

/// A probability resolved with exactly one `next_double` draw.
pub trait SkillsCheck {
    fn name(&self) -> &'static str;

    /// Unclamped rate. May stray outside `[0, 1]`; [`SkillsCheck::execute`] clamps it.
    fn probability(&self, tuning: &Tuning) -> f64;

    fn execute(
        &self,
        rng: &mut dyn RandomSource,
        tuning: &Tuning,
    ) -> Result<CheckOutcome, SimError> {
        let rate = clamp_probability(self.probability(tuning));
        let roll = rng.next_double()?;
        let outcome = CheckOutcome {
            occurred: roll < rate,
            margin: (rate - roll) * 100.0,
            probability: rate,
            roll,
        };
        debug!(
            check = self.name(),
            probability = rate,
            roll,
            occurred = outcome.occurred,
            "skills check"
        );
        Ok(outcome)
    }
}

/// Clamp to `[0, 1]`; NaN collapses to 0.
pub fn clamp_probability(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

/// A fixed-rate event: scramble choice, lateral chance, recovery coin flips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCheck {
    name: &'static str,
    rate: f64,
}

impl FlatCheck {
    pub fn new(name: &'static str, rate: f64) -> Self {
        Self { name, rate }
    }
}

impl SkillsCheck for FlatCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    fn probability(&self, _tuning: &Tuning) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{ReplayLog, ReplayRandom};

    fn scripted(doubles: &[f64]) -> ReplayRandom {
        let mut log = ReplayLog::new(0);
        log.doubles.extend_from_slice(doubles);
        ReplayRandom::replay(log)
    }

    #[test]
    fn margin_is_signed_distance_from_roll() {
        let mut rng = scripted(&[0.25, 0.75]);
        let t = Tuning::default();
        let hit = FlatCheck::new("half", 0.5).execute(&mut rng, &t).unwrap();
        assert!(hit.occurred);
        assert!((hit.margin - 25.0).abs() < 1e-9);
        let miss = FlatCheck::new("half", 0.5).execute(&mut rng, &t).unwrap();
        assert!(!miss.occurred);
        assert!((miss.margin + 25.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_rates_are_clamped() {
        let mut rng = scripted(&[0.999, 0.0]);
        let t = Tuning::default();
        assert!(FlatCheck::new("over", 3.0).execute(&mut rng, &t).unwrap().occurred);
        let under = FlatCheck::new("under", -1.0).execute(&mut rng, &t).unwrap();
        assert!(!under.occurred);
        assert_eq!(under.probability, 0.0);
        assert_eq!(clamp_probability(f64::NAN), 0.0);
    }

    #[test]
    fn roll_equal_to_rate_does_not_occur() {
        let mut rng = scripted(&[0.5]);
        let out = FlatCheck::new("edge", 0.5)
            .execute(&mut rng, &Tuning::default())
            .unwrap();
        assert!(!out.occurred);
    }
}
