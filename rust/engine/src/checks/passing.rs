//! Passing-game checks. One `next_double` each.

use crate::player::{average_rating, Player, Position};
use crate::tuning::Tuning;

use super::SkillsCheck;

fn pass_blockers(p: &Player) -> bool {
    p.position.is_run_blocker() || p.position == Position::RB
}

/// Offensive line holds long enough to throw. Failure is a sack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassProtectionCheck {
    pub protection: f64,
    pub pass_rush: f64,
}

impl PassProtectionCheck {
    pub fn new(offense: &[Player], defense: &[Player]) -> Self {
        Self {
            protection: average_rating(offense, pass_blockers, |p| p.blocking as f64, 50.0),
            pass_rush: average_rating(
                defense,
                |p| p.position.is_front_seven(),
                |p| (p.tackling as f64 + p.speed as f64 + p.strength as f64) / 3.0,
                50.0,
            ),
        }
    }
}

impl SkillsCheck for PassProtectionCheck {
    fn name(&self) -> &'static str {
        "pass_protection"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.passing;
        p.protection
            .apply(p.protection_base + (self.protection - self.pass_rush) / p.protection_skill_denominator)
    }
}

/// Rushers reach the quarterback before the throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QbPressureCheck {
    pub pass_rush: f64,
    pub protection: f64,
}

impl QbPressureCheck {
    pub fn new(offense: &[Player], defense: &[Player]) -> Self {
        Self {
            pass_rush: average_rating(
                defense,
                |p| p.position.is_front_seven(),
                |p| (p.speed as f64 + p.strength as f64) / 2.0,
                50.0,
            ),
            protection: average_rating(
                offense,
                |p| p.position.is_offensive_line(),
                |p| p.blocking as f64,
                50.0,
            ),
        }
    }
}

impl SkillsCheck for QbPressureCheck {
    fn name(&self) -> &'static str {
        "qb_pressure"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.passing;
        p.pressure
            .apply(p.pressure_base + (self.pass_rush - self.protection) / p.pressure_skill_denominator)
    }
}

fn coverage_unit(p: &Player) -> bool {
    p.position.is_defensive_back() || p.position == Position::LB
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassCompletionCheck {
    pub passing_power: f64,
    pub receiving_power: f64,
    pub coverage_power: f64,
    pub under_pressure: bool,
}

impl PassCompletionCheck {
    pub fn new(qb: &Player, receiver: &Player, defense: &[Player], under_pressure: bool) -> Self {
        Self {
            passing_power: (qb.passing as f64 * 2.0 + qb.awareness as f64) / 3.0,
            receiving_power: (receiver.catching as f64
                + receiver.route_running as f64
                + receiver.agility as f64)
                / 3.0,
            coverage_power: average_rating(
                defense,
                coverage_unit,
                |p| (p.coverage as f64 + p.speed as f64 + p.awareness as f64) / 3.0,
                50.0,
            ),
            under_pressure,
        }
    }
}

impl SkillsCheck for PassCompletionCheck {
    fn name(&self) -> &'static str {
        "pass_completion"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.passing;
        let offense = (self.passing_power + self.receiving_power) / 2.0;
        let mut rate =
            p.completion_base + (offense - self.coverage_power) / p.completion_skill_denominator;
        if self.under_pressure {
            rate -= p.completion_pressure_penalty;
        }
        p.completion.apply(rate)
    }
}

/// Only rolled on an incompletion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptionCheck {
    pub coverage: f64,
    pub passing: f64,
    pub under_pressure: bool,
}

impl InterceptionCheck {
    pub fn new(qb: &Player, defense: &[Player], under_pressure: bool) -> Self {
        Self {
            coverage: average_rating(defense, coverage_unit, |p| p.coverage as f64, 50.0),
            passing: qb.passing as f64,
            under_pressure,
        }
    }
}

impl SkillsCheck for InterceptionCheck {
    fn name(&self) -> &'static str {
        "interception"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.passing;
        let mut rate = p.interception_base
            + (self.coverage - self.passing) / p.interception_skill_denominator;
        if self.under_pressure {
            rate += p.interception_pressure_bonus;
        }
        p.interception.apply(rate)
    }
}

/// Receiver has room to run after the catch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YacOpportunityCheck {
    pub yac_potential: f64,
}

impl YacOpportunityCheck {
    pub fn new(receiver: &Player) -> Self {
        Self {
            yac_potential: yac_potential(receiver),
        }
    }
}

/// Open-field ability of a receiver.
pub fn yac_potential(receiver: &Player) -> f64 {
    (receiver.speed as f64 + receiver.agility as f64 + receiver.rushing as f64) / 3.0
}

impl SkillsCheck for YacOpportunityCheck {
    fn name(&self) -> &'static str {
        "yac_opportunity"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.passing;
        p.yac
            .apply(p.yac_base + (self.yac_potential - p.yac_skill_threshold) / p.yac_skill_denominator)
    }
}

/// Breakaway after the catch. Only burners qualify.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BigPlayCheck {
    pub receiver_speed: f64,
}

impl BigPlayCheck {
    pub fn new(receiver: &Player) -> Self {
        Self {
            receiver_speed: receiver.speed as f64,
        }
    }
}

impl SkillsCheck for BigPlayCheck {
    fn name(&self) -> &'static str {
        "big_play_after_catch"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        if self.receiver_speed > t.passing.big_play_speed_threshold {
            t.passing.big_play_probability
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(pos: Position, v: u8) -> Player {
        let mut p = Player::new(1, "x", pos);
        p.blocking = v;
        p.tackling = v;
        p.speed = v;
        p.strength = v;
        p.coverage = v;
        p
    }

    #[test]
    fn protection_stays_in_band_for_mismatches() {
        let t = Tuning::default();
        let strong = PassProtectionCheck::new(&[rated(Position::T, 100)], &[rated(Position::DE, 0)]);
        let weak = PassProtectionCheck::new(&[rated(Position::T, 0)], &[rated(Position::DE, 100)]);
        assert_eq!(strong.probability(&t), 0.95);
        assert_eq!(weak.probability(&t), 0.40);
    }

    #[test]
    fn pressure_lowers_completion_rate() {
        let t = Tuning::default();
        let qb = Player::new(1, "qb", Position::QB);
        let wr = Player::new(2, "wr", Position::WR);
        let calm = PassCompletionCheck::new(&qb, &wr, &[], false).probability(&t);
        let rushed = PassCompletionCheck::new(&qb, &wr, &[], true).probability(&t);
        assert!((calm - 0.60).abs() < 1e-9);
        assert!((rushed - 0.40).abs() < 1e-9);
    }

    #[test]
    fn big_play_requires_speed_above_threshold() {
        let t = Tuning::default();
        let mut wr = Player::new(2, "wr", Position::WR);
        wr.speed = 85;
        assert_eq!(BigPlayCheck::new(&wr).probability(&t), 0.0);
        wr.speed = 86;
        assert_eq!(BigPlayCheck::new(&wr).probability(&t), 0.05);
    }
}
