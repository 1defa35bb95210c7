use crate::play::PlayType;
use crate::player::{Player, Position};
use crate::tuning::Tuning;

use super::SkillsCheck;

/// Whether a player involved in the tackle gets hurt.
///
/// Players already carrying an injury are never checked; pipelines skip them
/// without drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InjuryCheck {
    pub fragility: f64,
    pub position: Position,
    pub play_type: PlayType,
    pub is_sack: bool,
    pub defenders_involved: u32,
    pub is_big_play: bool,
    pub out_of_bounds: bool,
}

impl InjuryCheck {
    pub fn new(player: &Player, play_type: PlayType) -> Self {
        Self {
            fragility: player.fragility as f64,
            position: player.position,
            play_type,
            is_sack: false,
            defenders_involved: 1,
            is_big_play: false,
            out_of_bounds: false,
        }
    }

    pub fn sack(mut self, is_sack: bool) -> Self {
        self.is_sack = is_sack;
        self
    }

    pub fn defenders(mut self, n: u32) -> Self {
        self.defenders_involved = n;
        self
    }

    pub fn big_play(mut self, yes: bool) -> Self {
        self.is_big_play = yes;
        self
    }

    pub fn out_of_bounds(mut self, yes: bool) -> Self {
        self.out_of_bounds = yes;
        self
    }

    fn position_multiplier(&self, t: &Tuning) -> f64 {
        let i = &t.injuries;
        match self.position {
            Position::RB | Position::LB | Position::OLB => i.high_contact_multiplier,
            Position::QB if self.is_sack => i.qb_multiplier * i.qb_sack_multiplier,
            Position::QB => i.qb_multiplier,
            Position::K | Position::P => i.kicker_multiplier,
            _ => 1.0,
        }
    }
}

impl SkillsCheck for InjuryCheck {
    fn name(&self) -> &'static str {
        "injury"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        let i = &t.injuries;
        let base = match self.play_type {
            PlayType::Run => i.run_base,
            PlayType::Pass if self.is_sack => i.sack_base,
            PlayType::Pass => i.pass_base,
            PlayType::Kickoff => i.kickoff_base,
            PlayType::Punt => i.punt_base,
            PlayType::FieldGoal => i.field_goal_base,
        };
        let mut rate = base * (0.5 + self.fragility / 100.0);
        rate *= self.position_multiplier(t);
        if self.defenders_involved >= 3 {
            rate *= i.gang_tackle_multiplier;
        }
        if self.is_big_play {
            rate *= i.big_play_multiplier;
        }
        if self.out_of_bounds {
            rate *= i.out_of_bounds_multiplier;
        }
        rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sacked_quarterback_gets_doubled_position_factor() {
        let t = Tuning::default();
        let qb = Player::new(1, "qb", Position::QB);
        let rate = InjuryCheck::new(&qb, PlayType::Pass).sack(true).probability(&t);
        // 0.06 * 1.0 * 0.7 * 2.0
        assert!((rate - 0.084).abs() < 1e-9);
    }

    #[test]
    fn modifiers_stack_multiplicatively() {
        let t = Tuning::default();
        let mut rb = Player::new(1, "rb", Position::RB);
        rb.fragility = 100;
        let rate = InjuryCheck::new(&rb, PlayType::Run)
            .defenders(3)
            .big_play(true)
            .out_of_bounds(true)
            .probability(&t);
        let expected = 0.03 * 1.5 * 1.2 * 1.4 * 1.2 * 0.5;
        assert!((rate - expected).abs() < 1e-12);
    }
}
