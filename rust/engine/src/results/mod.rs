//! Skills-check results: magnitudes and categories computed after a check
//! has decided that something happened.
//!
//! Each result documents how many draws it takes. Continuous results combine a
//! rating-driven base with a scaled `next_double`; categorical results walk a
//! cumulative table with one `next_double`. Formulas may overshoot the field;
//! clamping belongs to the pipelines in [`crate::plays`].

pub mod injury;
pub mod kicking;
pub mod penalty;
pub mod turnover;
pub mod yards;

pub use injury::InjuryEffectResult;
pub use kicking::{
    BadSnapYardsResult, BlockRecoverer, BlockedKickRecoveryResult, KickoffDistanceResult,
    KickoffReturnResult, MuffRecoveryYardsResult, PuntDistanceResult, PuntHangTimeResult,
    PuntReturnResult,
};
pub use penalty::PenaltyEffectResult;
pub use turnover::{
    likely_interceptor, FumbleRecovery, FumbleRecoveryResult, InterceptionReturnResult,
};
pub use yards::{
    AirYardsResult, BonusYardsResult, ElapsedTimeResult, PassTypeResult, RunYardsResult,
    SackYardsResult, YacResult,
};

use crate::errors::SimError;
use crate::rng::RandomSource;
use crate::tuning::Tuning;

/// A magnitude or category drawn from the random source.
pub trait SkillsCheckResult {
    type Output;

    fn name(&self) -> &'static str;

    fn execute(
        &self,
        rng: &mut dyn RandomSource,
        tuning: &Tuning,
    ) -> Result<Self::Output, SimError>;
}

/// Rounds half to even.
pub fn round_yards(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// Index of the first bucket whose cumulative upper bound exceeds `roll`.
/// A roll past the final bound lands in the last bucket.
pub fn pick_cumulative(weights: &[f64], roll: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if roll < cumulative {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}
