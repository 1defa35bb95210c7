//! Ball-carrier checks and the shared fumble check.

use crate::player::{average_rating, Player, Position};
use crate::tuning::Tuning;

use super::SkillsCheck;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunBlockingCheck {
    pub blocking: f64,
    pub defense: f64,
}

impl RunBlockingCheck {
    pub fn new(offense: &[Player], defense: &[Player]) -> Self {
        Self {
            blocking: average_rating(
                offense,
                |p| p.position.is_run_blocker(),
                |p| p.blocking as f64,
                50.0,
            ),
            defense: average_rating(
                defense,
                |p| matches!(p.position, Position::DT | Position::DE | Position::LB),
                |p| (p.tackling as f64 + p.strength as f64) / 2.0,
                50.0,
            ),
        }
    }
}

impl SkillsCheck for RunBlockingCheck {
    fn name(&self) -> &'static str {
        "run_blocking"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let r = &t.rushing;
        r.blocking
            .apply(r.blocking_base + (self.blocking - self.defense) / r.blocking_skill_denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TackleBreakCheck {
    pub carrier_power: f64,
    pub tackler_power: f64,
}

impl TackleBreakCheck {
    pub fn new(carrier: &Player, defense: &[Player]) -> Self {
        Self {
            carrier_power: (carrier.rushing as f64 + carrier.strength as f64 + carrier.agility as f64)
                / 3.0,
            tackler_power: average_rating(
                defense,
                |p| p.position.is_front_seven() || p.position.is_defensive_back(),
                |p| (p.tackling as f64 + p.strength as f64 + p.speed as f64) / 3.0,
                50.0,
            ),
        }
    }
}

impl SkillsCheck for TackleBreakCheck {
    fn name(&self) -> &'static str {
        "tackle_break"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let r = &t.rushing;
        r.tackle_break.apply(
            r.tackle_break_base
                + (self.carrier_power - self.tackler_power) / r.tackle_break_skill_denominator,
        )
    }
}

/// Carrier gets into the secondary for a long gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakawayCheck {
    pub speed: f64,
}

impl BreakawayCheck {
    pub fn new(carrier: &Player) -> Self {
        Self {
            speed: carrier.speed as f64,
        }
    }
}

impl SkillsCheck for BreakawayCheck {
    fn name(&self) -> &'static str {
        "breakaway"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let r = &t.rushing;
        r.big_run
            .apply(r.big_run_base + (self.speed - r.big_run_speed_threshold) / r.big_run_speed_denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FumbleContext {
    Normal,
    Return,
    Sack,
}

/// Ball comes loose at the end of a live-ball segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FumbleCheck {
    pub awareness: f64,
    pub defenders_involved: u32,
    pub context: FumbleContext,
}

impl FumbleCheck {
    pub fn new(carrier: &Player, defenders_involved: u32, context: FumbleContext) -> Self {
        Self {
            awareness: carrier.awareness as f64,
            defenders_involved,
            context,
        }
    }
}

impl SkillsCheck for FumbleCheck {
    fn name(&self) -> &'static str {
        "fumble"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let f = &t.turnovers;
        let base = match self.context {
            FumbleContext::Normal => f.fumble_normal,
            FumbleContext::Return => f.fumble_return,
            FumbleContext::Sack => f.fumble_sack,
        };
        let security = 1.3 - self.awareness / 100.0 * 0.6;
        let mut rate = base * security;
        if self.defenders_involved >= 3 {
            rate *= f.fumble_gang_tackle_multiplier;
        } else if self.defenders_involved == 2 {
            rate *= f.fumble_two_defenders_multiplier;
        }
        f.fumble.apply(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sack_fumbles_are_most_likely() {
        let t = Tuning::default();
        let qb = Player::new(1, "qb", Position::QB);
        let sack = FumbleCheck::new(&qb, 1, FumbleContext::Sack).probability(&t);
        let normal = FumbleCheck::new(&qb, 1, FumbleContext::Normal).probability(&t);
        assert!((sack - 0.12).abs() < 1e-9);
        assert!((normal - 0.015).abs() < 1e-9);
    }

    #[test]
    fn gang_tackles_raise_fumble_rate() {
        let t = Tuning::default();
        let rb = Player::new(1, "rb", Position::RB);
        let one = FumbleCheck::new(&rb, 1, FumbleContext::Normal).probability(&t);
        let two = FumbleCheck::new(&rb, 2, FumbleContext::Normal).probability(&t);
        let three = FumbleCheck::new(&rb, 3, FumbleContext::Normal).probability(&t);
        assert!(one < two && two < three);
    }

    #[test]
    fn breakaway_tracks_speed() {
        let t = Tuning::default();
        let mut rb = Player::new(1, "rb", Position::RB);
        rb.speed = 70;
        assert!((BreakawayCheck::new(&rb).probability(&t) - 0.08).abs() < 1e-9);
        rb.speed = 100;
        assert!((BreakawayCheck::new(&rb).probability(&t) - 0.14).abs() < 1e-9);
        rb.speed = 0;
        assert_eq!(BreakawayCheck::new(&rb).probability(&t), 0.03);
    }
}
