//! Scrimmage yardage: runs, sacks, throws and what follows the catch.

use crate::errors::SimError;
use crate::play::PassType;
use crate::player::{average_rating, Player, Position};
use crate::rng::RandomSource;
use crate::tuning::{Span, Tuning};

use super::{round_yards, SkillsCheckResult};

/// Base carry. One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunYardsResult {
    pub offensive_power: f64,
    pub defensive_power: f64,
    pub blocking_succeeded: bool,
}

impl RunYardsResult {
    pub fn new(
        carrier: &Player,
        offense: &[Player],
        defense: &[Player],
        blocking_succeeded: bool,
    ) -> Self {
        let blocking = average_rating(
            offense,
            |p| p.position.is_run_blocker(),
            |p| p.blocking as f64,
            50.0,
        );
        let running = (2.0 * carrier.rushing as f64 + carrier.speed as f64 + carrier.agility as f64)
            / 4.0;
        let defensive_power = average_rating(
            defense,
            |p| matches!(p.position, Position::DE | Position::DT | Position::LB),
            |p| (p.tackling as f64 + p.strength as f64 + p.speed as f64) / 3.0,
            50.0,
        );
        Self {
            offensive_power: (blocking + running) / 2.0,
            defensive_power,
            blocking_succeeded,
        }
    }
}

impl SkillsCheckResult for RunYardsResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "run_yards"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let r = &t.rushing;
        let power = self.offensive_power - self.defensive_power;
        let base = r.run_base_yards + power / r.run_power_divisor;
        let random = rng.next_double()? * r.run_spread - r.run_offset;
        let scale = if self.blocking_succeeded {
            r.blocking_success_scale
        } else {
            r.blocking_failure_scale
        };
        Ok(round_yards((base + random) * scale))
    }
}

/// Extra yards layered on a gated check. One `next_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusYardsResult {
    TackleBreak,
    Breakaway,
    BigPlayAfterCatch,
    Lateral,
}

impl BonusYardsResult {
    fn bounds(self, t: &Tuning) -> (i32, i32) {
        match self {
            BonusYardsResult::TackleBreak => {
                (t.rushing.tackle_break_min_yards, t.rushing.tackle_break_max_yards)
            }
            BonusYardsResult::Breakaway => {
                (t.rushing.breakaway_min_yards, t.rushing.breakaway_max_yards)
            }
            BonusYardsResult::BigPlayAfterCatch => {
                (t.passing.big_play_min_bonus, t.passing.big_play_max_bonus)
            }
            BonusYardsResult::Lateral => (t.rushing.lateral_gain_min, t.rushing.lateral_gain_max),
        }
    }
}

impl SkillsCheckResult for BonusYardsResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        match self {
            BonusYardsResult::TackleBreak => "tackle_break_yards",
            BonusYardsResult::Breakaway => "breakaway_yards",
            BonusYardsResult::BigPlayAfterCatch => "big_play_yards",
            BonusYardsResult::Lateral => "lateral_yards",
        }
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let (min, max) = self.bounds(t);
        rng.next_range(min, max)
    }
}

/// Loss on a sack, never past the offense's own goal line. One `next_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SackYardsResult {
    pub field_position: i32,
}

impl SkillsCheckResult for SackYardsResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "sack_yards"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let loss = rng.next_range(t.passing.sack_min_loss, t.passing.sack_max_loss)?;
        Ok((-loss).max(-self.field_position))
    }
}

/// Which kind of throw the quarterback makes. One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassTypeResult;

impl SkillsCheckResult for PassTypeResult {
    type Output = PassType;

    fn name(&self) -> &'static str {
        "pass_type"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<PassType, SimError> {
        let r = rng.next_double()?;
        let p = &t.passing;
        Ok(if r < p.screen_threshold {
            PassType::Screen
        } else if r < p.short_threshold {
            PassType::Short
        } else if r < p.forward_threshold {
            PassType::Forward
        } else {
            PassType::Deep
        })
    }
}

/// Distance the ball travels in the air. One `next_range`; laterals draw nothing.
///
/// The upper bound shrinks with the distance to the goal line but always
/// leaves the range non-empty, so short fields may still overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirYardsResult {
    pub pass_type: PassType,
    pub yards_to_goal: i32,
}

impl SkillsCheckResult for AirYardsResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "air_yards"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let p = &t.passing;
        let downfield = |min: i32, max: i32| (min, self.yards_to_goal.min(max).max(min + 1));
        let (min, max) = match self.pass_type {
            PassType::Screen => (p.screen_air_min, p.screen_air_max),
            PassType::Short => downfield(p.short_air_min, p.short_air_max),
            PassType::Forward => downfield(p.forward_air_min, p.forward_air_max),
            PassType::Deep => downfield(p.deep_air_min, p.deep_air_max),
            PassType::Lateral => return Ok(0),
        };
        rng.next_range(min, max)
    }
}

/// Yards after the catch. With an opening: one `next_double`. Without one the
/// receiver is wrapped up almost at once: one `next_range(0, yac_stopped_max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YacResult {
    pub yac_potential: f64,
    pub opportunity: bool,
}

impl SkillsCheckResult for YacResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "yards_after_catch"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let p = &t.passing;
        if !self.opportunity {
            return rng.next_range(0, p.yac_stopped_max);
        }
        let base = p.yac_base_yards + self.yac_potential / p.yac_potential_divisor;
        let random = rng.next_double()? * p.yac_spread - p.yac_offset;
        Ok(round_yards(base + random).max(0))
    }
}

/// Seconds a play consumed. One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElapsedTimeResult {
    pub base: f64,
    pub spread: f64,
}

impl ElapsedTimeResult {
    pub const fn new(base: f64, spread: f64) -> Self {
        Self { base, spread }
    }

    /// A punt's clock runs from the snap through the hang time.
    pub fn after_hang(hang_time: f64, span: Span) -> Self {
        Self::new(hang_time + span.base, span.spread)
    }
}

impl From<Span> for ElapsedTimeResult {
    fn from(span: Span) -> Self {
        Self::new(span.base, span.spread)
    }
}

impl SkillsCheckResult for ElapsedTimeResult {
    type Output = f64;

    fn name(&self) -> &'static str {
        "elapsed_time"
    }

    fn execute(&self, rng: &mut dyn RandomSource, _tuning: &Tuning) -> Result<f64, SimError> {
        Ok(self.base + rng.next_double()? * self.spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{IntRangeEntry, ReplayLog, ReplayRandom};

    fn doubles(values: &[f64]) -> ReplayRandom {
        let mut log = ReplayLog::new(0);
        log.doubles.extend_from_slice(values);
        ReplayRandom::replay(log)
    }

    fn ranges(entries: &[(i32, i32, i32)]) -> ReplayRandom {
        let mut log = ReplayLog::new(0);
        log.int_ranges = entries
            .iter()
            .map(|&(min, max, value)| IntRangeEntry { min, max, value })
            .collect();
        ReplayRandom::replay(log)
    }

    #[test]
    fn blocking_scales_the_carry() {
        let t = Tuning::default();
        let even = |blocked| RunYardsResult {
            offensive_power: 50.0,
            defensive_power: 50.0,
            blocking_succeeded: blocked,
        };
        // 3 + 0 + (0.5 * 11 - 3) = 5.5
        let good = even(true).execute(&mut doubles(&[0.5]), &t).unwrap();
        let bad = even(false).execute(&mut doubles(&[0.5]), &t).unwrap();
        assert_eq!(good, 7); // 6.6
        assert_eq!(bad, 4); // 4.4
    }

    #[test]
    fn sack_never_leaves_the_field() {
        let t = Tuning::default();
        let mut rng = ranges(&[(2, 11, 9)]);
        let y = SackYardsResult { field_position: 4 }
            .execute(&mut rng, &t)
            .unwrap();
        assert_eq!(y, -4);
    }

    #[test]
    fn air_yards_range_tracks_the_goal_line() {
        let t = Tuning::default();
        let mut rng = ranges(&[(3, 4, 3)]);
        let short = AirYardsResult {
            pass_type: PassType::Short,
            yards_to_goal: 2,
        };
        assert_eq!(short.execute(&mut rng, &t).unwrap(), 3);

        // A deep ball from midfield asks for the full range.
        let mut rng = ranges(&[(18, 45, 30)]);
        let deep = AirYardsResult {
            pass_type: PassType::Deep,
            yards_to_goal: 50,
        };
        assert_eq!(deep.execute(&mut rng, &t).unwrap(), 30);
    }

    #[test]
    fn tuned_air_yards_shift_the_requested_range() {
        let mut t = Tuning::default();
        t.passing.deep_air_min = 25;
        t.passing.deep_air_max = 60;
        let mut rng = ranges(&[(25, 50, 40)]);
        let deep = AirYardsResult {
            pass_type: PassType::Deep,
            yards_to_goal: 50,
        };
        assert_eq!(deep.execute(&mut rng, &t).unwrap(), 40);
        assert!(rng.is_fully_consumed());
    }

    #[test]
    fn punt_clock_starts_after_the_hang_time() {
        let t = Tuning::default();
        let clock = ElapsedTimeResult::after_hang(4.0, t.clock.punt_return);
        let secs = clock.execute(&mut doubles(&[0.5]), &t).unwrap();
        assert_eq!(secs, 8.0);
        let run = ElapsedTimeResult::from(t.clock.run);
        assert_eq!(run.execute(&mut doubles(&[0.0]), &t).unwrap(), 5.0);
    }

    #[test]
    fn pass_type_thresholds() {
        let t = Tuning::default();
        let mut rng = doubles(&[0.1, 0.15, 0.6, 0.85]);
        let seen: Vec<_> = (0..4)
            .map(|_| PassTypeResult.execute(&mut rng, &t).unwrap())
            .collect();
        assert_eq!(
            seen,
            vec![PassType::Screen, PassType::Short, PassType::Forward, PassType::Deep]
        );
    }

    #[test]
    fn yac_without_opening_uses_the_short_range() {
        let t = Tuning::default();
        let mut rng = ranges(&[(0, 3, 1)]);
        let y = YacResult {
            yac_potential: 90.0,
            opportunity: false,
        }
        .execute(&mut rng, &t)
        .unwrap();
        assert_eq!(y, 1);
        assert!(rng.is_fully_consumed());
    }

    #[test]
    fn yac_is_never_negative() {
        let t = Tuning::default();
        let y = YacResult {
            yac_potential: 0.0,
            opportunity: true,
        }
        .execute(&mut doubles(&[0.0]), &t)
        .unwrap();
        assert_eq!(y, 1);
    }
}
