//! Special-teams magnitudes. Spots and distances are in the kicking team's
//! frame unless a field says otherwise.

use crate::errors::SimError;
use crate::play::PlayType;
use crate::player::{average_rating, Player, Position};
use crate::rng::RandomSource;
use crate::tuning::Tuning;

use super::{round_yards, SkillsCheckResult};

/// Back of the receiving end zone in the kicking team's frame.
const END_LINE: i32 = 110;

/// Yards lost chasing a bad snap, never past the goal line. Two `next_double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadSnapYardsResult {
    pub field_position: i32,
    pub play_type: PlayType,
}

impl SkillsCheckResult for BadSnapYardsResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "bad_snap_yards"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let (loss, spread, jitter) = match self.play_type {
            PlayType::Punt => (
                t.punts.bad_snap_loss_base,
                t.punts.bad_snap_loss_spread,
                t.punts.bad_snap_loss_jitter,
            ),
            _ => (
                t.field_goals.bad_snap_loss_base,
                t.field_goals.bad_snap_loss_spread,
                t.field_goals.bad_snap_loss_jitter,
            ),
        };
        let base = -loss - rng.next_double()? * spread;
        let random = rng.next_double()? * jitter - jitter / 2.0;
        Ok(round_yards(base + random).max(-self.field_position))
    }
}

/// Who fell on a blocked kick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockRecoverer {
    /// Kicking team; yards are a loss from the line of scrimmage
    KickingTeam,
    /// Rushing team; `skill` drives the return on a blocked placekick
    RushingTeam { skill: f64 },
}

/// Yards after a blocked kick.
///
/// Kicking-team recovery: one `next_double`, a loss measured from the line of
/// scrimmage. Blocked punt picked up by the rush: two `next_double`, where the
/// ball settled relative to the line in the punting team's direction. Blocked
/// placekick picked up by the rush: one `next_double`, a return in the rushing
/// team's direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockedKickRecoveryResult {
    pub play_type: PlayType,
    pub recoverer: BlockRecoverer,
}

impl SkillsCheckResult for BlockedKickRecoveryResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "blocked_kick_recovery"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let p = &t.punts;
        let fg = &t.field_goals;
        match (self.play_type, self.recoverer) {
            (PlayType::Punt, BlockRecoverer::KickingTeam) => Ok(-p.blocked_own_loss_base
                - (rng.next_double()? * p.blocked_own_loss_spread) as i32),
            (_, BlockRecoverer::KickingTeam) => Ok(-fg.blocked_own_loss_base
                - (rng.next_double()? * fg.blocked_own_loss_spread) as i32),
            (PlayType::Punt, BlockRecoverer::RushingTeam { .. }) => {
                let base = p.blocked_bounce_base + rng.next_double()? * p.blocked_bounce_spread;
                let random =
                    rng.next_double()? * p.blocked_bounce_jitter - p.blocked_bounce_jitter / 2.0;
                Ok((base + random) as i32)
            }
            (_, BlockRecoverer::RushingTeam { skill }) => {
                let raw = fg.blocked_return.at(skill, rng.next_double()?);
                Ok(fg.blocked_return_limits.apply(raw) as i32)
            }
        }
    }
}

/// Kickoff carry, truncated to whole yards inside the tuned limits. One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickoffDistanceResult {
    pub kicking: f64,
}

impl KickoffDistanceResult {
    pub fn new(kicker: &Player) -> Self {
        Self {
            kicking: kicker.kicking as f64,
        }
    }
}

impl SkillsCheckResult for KickoffDistanceResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "kickoff_distance"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let k = &t.kickoffs;
        let raw = k.distance.at(self.kicking, rng.next_double()?);
        Ok(k.distance_limits.apply(raw) as i32)
    }
}

/// Return of a caught kickoff, inside the tuned limits. One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickoffReturnResult {
    pub returner_skill: f64,
}

impl KickoffReturnResult {
    pub fn new(returner: &Player) -> Self {
        Self {
            returner_skill: (returner.speed as f64 + returner.agility as f64) / 2.0,
        }
    }
}

impl SkillsCheckResult for KickoffReturnResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "kickoff_return"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let k = &t.kickoffs;
        let raw = k.return_yards.at(self.returner_skill, rng.next_double()?);
        Ok(k.return_limits.apply(raw) as i32)
    }
}

/// Gross punt, never shorter than the tuned minimum nor past the end line.
/// One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuntDistanceResult {
    pub kicking: f64,
    pub field_position: i32,
}

impl SkillsCheckResult for PuntDistanceResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "punt_distance"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let p = &t.punts;
        let raw = p.distance.at(self.kicking, rng.next_double()?);
        Ok(round_yards(raw.max(p.min_distance)).min(END_LINE - self.field_position))
    }
}

/// Seconds in the air, to one decimal. One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuntHangTimeResult {
    pub distance: i32,
}

impl SkillsCheckResult for PuntHangTimeResult {
    type Output = f64;

    fn name(&self) -> &'static str {
        "punt_hang_time"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<f64, SimError> {
        let p = &t.punts;
        let raw = (self.distance as f64 * p.hang_time_per_yard
            + rng.next_double()? * p.hang_time_jitter
            - p.hang_time_jitter / 2.0)
            .max(p.min_hang_time);
        Ok((raw * 10.0).round_ties_even() / 10.0)
    }
}

/// Punt return against the coverage unit, never worse than the tuned floor.
/// One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuntReturnResult {
    pub returner_ability: f64,
    pub coverage_unit: f64,
    /// Long hang time lets the coverage get downfield
    pub hang_time: f64,
}

impl PuntReturnResult {
    /// `coverage_team` is the punting team.
    pub fn new(returner: &Player, coverage_team: &[Player], hang_time: f64) -> Self {
        let returner_ability =
            (returner.speed as f64 + returner.agility as f64 + returner.catching as f64) / 3.0;
        let coverage_unit = average_rating(
            coverage_team,
            |p| p.position.is_defensive_back() || matches!(p.position, Position::LB | Position::OLB),
            |p| (p.speed as f64 + p.tackling as f64) / 2.0,
            50.0,
        );
        Self {
            returner_ability,
            coverage_unit,
            hang_time,
        }
    }
}

impl SkillsCheckResult for PuntReturnResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "punt_return"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let p = &t.punts;
        let coverage = self.coverage_unit
            + (self.hang_time / p.coverage_full_hang_time).min(1.0) * p.coverage_hang_bonus;
        let base = p.return_base_yards + (self.returner_ability - coverage) / p.return_skill_divisor;
        let random = rng.next_double()? * p.return_spread - p.return_offset;
        Ok(round_yards((base + random).max(p.min_return)))
    }
}

/// Where a muffed kick squirts to before someone falls on it. One `next_double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuffRecoveryYardsResult;

impl SkillsCheckResult for MuffRecoveryYardsResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "muff_recovery_yards"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let f = &t.turnovers;
        Ok(f.muff_scramble_min + (rng.next_double()? * f.muff_scramble_spread) as i32)
    }
}
