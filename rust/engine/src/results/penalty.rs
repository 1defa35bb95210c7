use crate::checks::PenaltyContext;
use crate::errors::SimError;
use crate::game::Possession;
use crate::penalty::{FoulSide, Penalty, PenaltyName, PenaltyTiming};
use crate::player::Player;
use crate::rng::RandomSource;
use crate::tuning::Tuning;

use super::SkillsCheckResult;

/// Turns a flagged foul into a [`Penalty`]: which team, which player, how far.
///
/// One `next_double` when the foul could be on either side, then one
/// `next_double` to name the offender whenever the offending side has players
/// on the field. Aggressive players draw more flags.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyEffectResult<'a> {
    pub name: PenaltyName,
    pub context: PenaltyContext,
    /// Team that snapped or kicked
    pub offense: Possession,
    pub offense_players: &'a [Player],
    pub defense_players: &'a [Player],
    /// Distance from the line of scrimmage to the foul, for spot fouls
    pub spot_yards: i32,
}

impl PenaltyEffectResult<'_> {
    fn timing(&self) -> PenaltyTiming {
        match self.context {
            PenaltyContext::PreSnap => PenaltyTiming::Before,
            PenaltyContext::Tackle(_) => PenaltyTiming::After,
            _ => PenaltyTiming::During,
        }
    }
}

impl SkillsCheckResult for PenaltyEffectResult<'_> {
    type Output = Penalty;

    fn name(&self) -> &'static str {
        "penalty_effect"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<Penalty, SimError> {
        let on_offense = match self.context.offending_side(self.name) {
            FoulSide::Offense => true,
            FoulSide::Defense => false,
            FoulSide::Either => rng.next_double()? < t.penalties.either_side_offense_share,
        };
        let (called_on, players) = if on_offense {
            (self.offense, self.offense_players)
        } else {
            (self.offense.opponent(), self.defense_players)
        };

        let committed_by = if players.is_empty() {
            None
        } else {
            let floor = t.penalties.offender_weight_floor;
            let weight = |p: &Player| p.aggressiveness as f64 + floor;
            let total: f64 = players.iter().map(weight).sum();
            let target = rng.next_double()? * total;
            let mut cumulative = 0.0;
            let mut picked = &players[players.len() - 1];
            for p in players {
                cumulative += weight(p);
                if target < cumulative {
                    picked = p;
                    break;
                }
            }
            Some(picked.id)
        };

        let yards = if self.name.is_spot_foul() {
            self.spot_yards.max(1)
        } else {
            self.name.yards()
        };

        Ok(Penalty {
            name: self.name,
            yards,
            called_on,
            committed_by,
            occurred_when: self.timing(),
            accepted: false,
        })
    }
}
