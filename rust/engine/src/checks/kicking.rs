//! Special-teams checks. Spots are yard lines in the kicking team's frame
//! unless a field says otherwise.

use crate::play::PlayType;
use crate::player::{average_rating, Player, Position};
use crate::tuning::Tuning;

use super::SkillsCheck;

fn kick_protection(offense: &[Player]) -> f64 {
    average_rating(
        offense,
        |p| matches!(p.position, Position::T | Position::G | Position::C | Position::TE),
        |p| p.blocking as f64,
        50.0,
    )
}

fn kick_rush(defense: &[Player]) -> f64 {
    average_rating(
        defense,
        |p| p.position.is_front_seven(),
        |p| (p.speed as f64 + p.strength as f64) / 2.0,
        50.0,
    )
}

/// Snapper mishandles the exchange on a punt or placekick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadSnapCheck {
    pub snapper_blocking: f64,
    pub play_type: PlayType,
}

impl BadSnapCheck {
    pub fn new(snapper: &Player, play_type: PlayType) -> Self {
        Self {
            snapper_blocking: snapper.blocking as f64,
            play_type,
        }
    }
}

impl SkillsCheck for BadSnapCheck {
    fn name(&self) -> &'static str {
        "bad_snap"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let (base, factor) = match self.play_type {
            PlayType::FieldGoal => (t.field_goals.bad_snap_base, t.field_goals.bad_snap_skill_factor),
            _ => (t.punts.bad_snap_base, t.punts.bad_snap_skill_factor),
        };
        base - self.snapper_blocking / 100.0 * factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGoalBlockCheck {
    pub attempt_distance: i32,
    pub kicking: f64,
    pub protection: f64,
    pub rush: f64,
    pub good_snap: bool,
}

impl FieldGoalBlockCheck {
    pub fn new(
        kicker: &Player,
        attempt_distance: i32,
        offense: &[Player],
        defense: &[Player],
        good_snap: bool,
    ) -> Self {
        Self {
            attempt_distance,
            kicking: kicker.kicking as f64,
            protection: kick_protection(offense),
            rush: kick_rush(defense),
            good_snap,
        }
    }
}

impl SkillsCheck for FieldGoalBlockCheck {
    fn name(&self) -> &'static str {
        "field_goal_block"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let fg = &t.field_goals;
        let mut rate = match self.attempt_distance {
            d if d <= 30 => fg.block_very_short,
            d if d <= 45 => fg.block_short,
            d if d <= 55 => fg.block_medium,
            _ => fg.block_long,
        };
        if !self.good_snap {
            rate *= fg.block_bad_snap_multiplier;
        }
        rate -= (self.kicking - 50.0) / fg.block_kicker_skill_denominator;
        rate += (self.rush - self.protection) / 10.0 * fg.block_defender_skill_factor;
        fg.block.apply(rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGoalMakeCheck {
    pub attempt_distance: i32,
    pub kicking: f64,
}

impl FieldGoalMakeCheck {
    pub fn new(kicker: &Player, attempt_distance: i32) -> Self {
        Self {
            attempt_distance,
            kicking: kicker.kicking as f64,
        }
    }
}

impl SkillsCheck for FieldGoalMakeCheck {
    fn name(&self) -> &'static str {
        "field_goal_make"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let fg = &t.field_goals;
        let d = self.attempt_distance as f64;
        let base = match self.attempt_distance {
            x if x <= 30 => fg.make_very_short,
            x if x <= 40 => fg.make_short_base - (d - 30.0) * fg.make_short_decay,
            x if x <= 50 => fg.make_medium_base - (d - 40.0) * fg.make_medium_decay,
            x if x <= 60 => fg.make_long_base - (d - 50.0) * fg.make_long_decay,
            _ => fg.make_very_long_base - (d - 60.0) * fg.make_very_long_decay,
        };
        fg.make
            .apply(base + (self.kicking - 50.0) / fg.make_skill_denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuntBlockCheck {
    pub kicking: f64,
    pub protection: f64,
    pub rush: f64,
    pub good_snap: bool,
}

impl PuntBlockCheck {
    pub fn new(punter: &Player, offense: &[Player], defense: &[Player], good_snap: bool) -> Self {
        Self {
            kicking: punter.kicking as f64,
            protection: kick_protection(offense),
            rush: kick_rush(defense),
            good_snap,
        }
    }
}

impl SkillsCheck for PuntBlockCheck {
    fn name(&self) -> &'static str {
        "punt_block"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.punts;
        let base = if self.good_snap {
            p.block_good_snap
        } else {
            p.block_bad_snap
        };
        let rate = base - (self.kicking - 50.0) / p.block_punter_skill_denominator
            + (self.rush - self.protection) / 10.0 * p.block_defender_skill_factor;
        p.block.apply(rate)
    }
}

/// Punter angles the ball out of bounds. `landing` is in the punting team's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuntOutOfBoundsCheck {
    pub landing: i32,
}

impl SkillsCheck for PuntOutOfBoundsCheck {
    fn name(&self) -> &'static str {
        "punt_out_of_bounds"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.punts;
        let bonus = if self.landing > 90 {
            p.out_of_bounds_inside_10_bonus
        } else if self.landing > 85 {
            p.out_of_bounds_inside_15_bonus
        } else {
            0.0
        };
        p.out_of_bounds_base + bonus
    }
}

/// Coverage team downs the ball before the returner gets to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuntDownedCheck {
    pub landing: i32,
    pub hang_time: f64,
}

impl SkillsCheck for PuntDownedCheck {
    fn name(&self) -> &'static str {
        "punt_downed"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.punts;
        let mut rate = p.downed_base;
        rate += if self.landing > 95 {
            p.downed_inside_5_bonus
        } else if self.landing > 90 {
            p.downed_inside_10_bonus
        } else if self.landing > 85 {
            p.downed_inside_15_bonus
        } else {
            0.0
        };
        rate += hang_bonus(
            self.hang_time,
            t,
            p.downed_high_hang_bonus,
            p.downed_medium_hang_bonus,
        );
        rate
    }
}

fn hang_bonus(hang_time: f64, t: &Tuning, high: f64, medium: f64) -> f64 {
    if hang_time > t.punts.high_hang_threshold {
        high
    } else if hang_time > t.punts.medium_hang_threshold {
        medium
    } else {
        0.0
    }
}

/// Returner waves for a fair catch. Used on punts and kickoffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairCatchCheck {
    pub hang_time: f64,
    pub landing: i32,
}

impl SkillsCheck for FairCatchCheck {
    fn name(&self) -> &'static str {
        "fair_catch"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.punts;
        let mut rate = p.fair_catch_base
            + hang_bonus(
                self.hang_time,
                t,
                p.fair_catch_high_hang_bonus,
                p.fair_catch_medium_hang_bonus,
            );
        let receiver_spot = 100 - self.landing;
        if receiver_spot < 10 {
            rate += p.fair_catch_own_10_bonus;
        } else if receiver_spot < 20 {
            rate += p.fair_catch_own_20_bonus;
        }
        rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuntMuffCheck {
    pub catching: f64,
    pub hang_time: f64,
}

impl PuntMuffCheck {
    pub fn new(returner: &Player, hang_time: f64) -> Self {
        Self {
            catching: returner.catching as f64,
            hang_time,
        }
    }
}

impl SkillsCheck for PuntMuffCheck {
    fn name(&self) -> &'static str {
        "punt_muff"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let p = &t.punts;
        p.muff_base - self.catching / 100.0 * p.muff_skill_factor
            + hang_bonus(
                self.hang_time,
                t,
                p.muff_high_hang_bonus,
                p.muff_medium_hang_bonus,
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickoffOutOfBoundsCheck {
    pub landing: i32,
}

impl SkillsCheck for KickoffOutOfBoundsCheck {
    fn name(&self) -> &'static str {
        "kickoff_out_of_bounds"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let k = &t.kickoffs;
        let landing = self.landing as f64;
        if landing < k.danger_zone_min || landing > k.danger_zone_max {
            k.out_of_bounds_normal
        } else {
            k.out_of_bounds_danger_zone
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickoffMuffCheck {
    pub landing: i32,
    pub returner_skill: f64,
}

impl KickoffMuffCheck {
    pub fn new(returner: &Player, landing: i32) -> Self {
        Self {
            landing,
            returner_skill: (returner.awareness as f64 + returner.agility as f64) / 2.0,
        }
    }
}

impl SkillsCheck for KickoffMuffCheck {
    fn name(&self) -> &'static str {
        "kickoff_muff"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let k = &t.kickoffs;
        let base = if (self.landing as f64) < k.muff_short_threshold {
            k.muff_short_kick
        } else {
            k.muff_base
        };
        base * (1.0 - self.returner_skill / k.muff_skill_denominator)
    }
}

/// Kicking team tries an onside kick. Only rolled when trailing by enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnsideAttemptCheck {
    pub deficit: i64,
}

impl OnsideAttemptCheck {
    pub fn is_eligible(&self, t: &Tuning) -> bool {
        self.deficit >= t.kickoffs.onside_deficit
    }
}

impl SkillsCheck for OnsideAttemptCheck {
    fn name(&self) -> &'static str {
        "onside_attempt"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        if self.is_eligible(t) {
            t.kickoffs.onside_attempt
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnsideRecoveryCheck {
    pub kicking: f64,
}

impl SkillsCheck for OnsideRecoveryCheck {
    fn name(&self) -> &'static str {
        "onside_recovery"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let k = &t.kickoffs;
        k.onside_recovery_base + self.kicking / 100.0 * k.onside_recovery_skill_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_curve_matches_distance_bands() {
        let t = Tuning::default();
        let k = Player::new(1, "k", Position::K);
        let at = |d| FieldGoalMakeCheck::new(&k, d).probability(&t);
        assert_eq!(at(20), 0.98);
        assert!((at(35) - 0.85).abs() < 1e-9);
        assert!((at(47) - 0.695).abs() < 1e-9);
        assert!((at(55) - 0.525).abs() < 1e-9);
        assert!((at(70) - 0.10).abs() < 1e-9);
        assert_eq!(at(90), 0.05);
    }

    #[test]
    fn bad_snap_multiplies_block_rate() {
        let t = Tuning::default();
        let k = Player::new(1, "k", Position::K);
        let clean = FieldGoalBlockCheck::new(&k, 40, &[], &[], true).probability(&t);
        let bad = FieldGoalBlockCheck::new(&k, 40, &[], &[], false).probability(&t);
        assert!((clean - 0.025).abs() < 1e-9);
        assert!((bad - 0.25).abs() < 1e-9);
    }

    #[test]
    fn fair_catch_grows_deep_in_own_territory() {
        let t = Tuning::default();
        let midfield = FairCatchCheck { hang_time: 3.0, landing: 60 }.probability(&t);
        let deep = FairCatchCheck { hang_time: 4.8, landing: 95 }.probability(&t);
        assert!((midfield - 0.25).abs() < 1e-9);
        assert!((deep - 0.60).abs() < 1e-9);
    }

    #[test]
    fn onside_needs_a_deficit() {
        let t = Tuning::default();
        assert_eq!(OnsideAttemptCheck { deficit: 3 }.probability(&t), 0.0);
        assert_eq!(OnsideAttemptCheck { deficit: 7 }.probability(&t), 0.05);
    }
}
