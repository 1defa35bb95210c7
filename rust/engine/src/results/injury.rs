use crate::errors::SimError;
use crate::injury::{Injury, InjurySeverity, InjuryType, INDEFINITE_PLAYS};
use crate::player::{Player, PlayerId, Position};
use crate::rng::RandomSource;
use crate::tuning::Tuning;

use super::{pick_cumulative, SkillsCheckResult};

const TYPES: [InjuryType; 5] = [
    InjuryType::Ankle,
    InjuryType::Knee,
    InjuryType::Shoulder,
    InjuryType::Concussion,
    InjuryType::Hamstring,
];

/// Likelihood of each [`InjuryType`] by position, in `TYPES` order.
fn type_weights(position: Position) -> [f64; 5] {
    use Position::*;
    match position {
        RB | WR => [0.40, 0.25, 0.10, 0.05, 0.20],
        QB => [0.15, 0.25, 0.35, 0.20, 0.05],
        C | G | T | DE | DT => [0.40, 0.40, 0.10, 0.05, 0.05],
        LB | OLB | CB | S | FS => [0.25, 0.20, 0.15, 0.05, 0.35],
        TE | FB => [0.30, 0.25, 0.20, 0.05, 0.20],
        K | P => [0.50, 0.20, 0.10, 0.05, 0.15],
        LS | H => [0.30, 0.25, 0.20, 0.10, 0.15],
    }
}

/// What the injury is and how long it lasts.
///
/// Two `next_double` (type, severity), plus one `next_range` for the recovery
/// window of a minor injury.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjuryEffectResult {
    pub player: PlayerId,
    pub position: Position,
    pub play_number: u32,
}

impl InjuryEffectResult {
    pub fn new(player: &Player, play_number: u32) -> Self {
        Self {
            player: player.id,
            position: player.position,
            play_number,
        }
    }
}

impl SkillsCheckResult for InjuryEffectResult {
    type Output = Injury;

    fn name(&self) -> &'static str {
        "injury_effect"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<Injury, SimError> {
        let injury_type = TYPES[pick_cumulative(&type_weights(self.position), rng.next_double()?)];

        let i = &t.injuries;
        let r = rng.next_double()?;
        let severity = if r < i.minor_probability {
            InjurySeverity::Minor
        } else if r < i.minor_probability + i.moderate_probability {
            InjurySeverity::Moderate
        } else {
            InjurySeverity::GameEnding
        };

        let plays_until_return = match severity {
            InjurySeverity::Minor => {
                rng.next_range(i.minor_min_plays, i.minor_max_plays)?.max(0) as u32
            }
            _ => INDEFINITE_PLAYS,
        };

        Ok(Injury {
            injury_type,
            severity,
            injured_player: self.player,
            play_number: self.play_number,
            removed_from_play: severity.requires_removal(),
            plays_until_return,
            replacement_player: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{IntRangeEntry, ReplayLog, ReplayRandom};

    #[test]
    fn type_tables_sum_to_one() {
        use Position::*;
        for pos in [QB, RB, FB, WR, TE, C, G, T, DE, DT, LB, OLB, CB, S, FS, K, P, LS, H] {
            let total: f64 = type_weights(pos).iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "{pos:?}");
        }
    }

    #[test]
    fn minor_injury_draws_a_recovery_window() {
        let mut log = ReplayLog::new(0);
        log.doubles = vec![0.5, 0.1];
        log.int_ranges.push(IntRangeEntry {
            min: 1,
            max: 3,
            value: 2,
        });
        let mut rng = ReplayRandom::replay(log);
        let qb = Player::new(7, "qb", Position::QB);
        let injury = InjuryEffectResult::new(&qb, 12)
            .execute(&mut rng, &Tuning::default())
            .unwrap();
        assert_eq!(injury.injury_type, InjuryType::Shoulder);
        assert_eq!(injury.severity, InjurySeverity::Minor);
        assert_eq!(injury.plays_until_return, 2);
        assert!(!injury.removed_from_play);
        assert_eq!(injury.play_number, 12);
        assert!(rng.is_fully_consumed());
    }

    #[test]
    fn severity_boundary_goes_up() {
        let mut log = ReplayLog::new(0);
        log.doubles = vec![0.0, 0.6];
        let mut rng = ReplayRandom::replay(log);
        let rb = Player::new(3, "rb", Position::RB);
        let injury = InjuryEffectResult::new(&rb, 1)
            .execute(&mut rng, &Tuning::default())
            .unwrap();
        assert_eq!(injury.injury_type, InjuryType::Ankle);
        assert_eq!(injury.severity, InjurySeverity::Moderate);
        assert!(injury.removed_from_play);
        assert_eq!(injury.plays_until_return, INDEFINITE_PLAYS);
    }
}
