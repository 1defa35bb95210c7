//! Flag checks. Each context sums the catalogue odds of the fouls it can
//! produce, scales them by the players involved, and rolls once. When the roll
//! lands inside the rate, the same roll is rescaled to pick which foul it was,
//! so a penalty check always costs exactly one `next_double`.

use serde::{Deserialize, Serialize};

use crate::errors::SimError;
use crate::penalty::{FoulSide, PenaltyName};
use crate::player::{average_rating, Player};
use crate::rng::RandomSource;
use crate::tuning::Tuning;

use super::{CheckOutcome, SkillsCheck};

/// Who was being tackled when a personal foul could occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TackleContext {
    PasserInPocket,
    PasserScrambling,
    Kicker,
    BallCarrier,
    Receiver,
    Returner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenaltyContext {
    PreSnap,
    /// Blocking by the team carrying the ball; `on_return` means the blockers
    /// belong to the receiving team of a kick
    Blocking { is_pass: bool, on_return: bool },
    Coverage { air_yards: i32, completed: bool },
    Tackle(TackleContext),
}

use PenaltyName::*;

const PRE_SNAP: &[PenaltyName] = &[
    FalseStart,
    DelayOfGame,
    DefensiveOffside,
    NeutralZoneInfraction,
    IllegalFormation,
    Encroachment,
    IllegalShift,
    IllegalMotion,
    Offensive12OnField,
    Defensive12OnField,
    IllegalSubstitution,
    OffensiveOffside,
];

const BLOCKING: &[PenaltyName] = &[
    OffensiveHolding,
    IllegalUseOfHands,
    IllegalBlockAboveTheWaist,
    Clipping,
    ChopBlock,
    LowBlock,
    IllegalPeelback,
    IllegalCrackback,
];

const RETURN_BLOCKING: &[PenaltyName] = &[
    IllegalBlockAboveTheWaist,
    OffensiveHolding,
    Clipping,
    IllegalBlindsideBlock,
];

const COVERAGE: &[PenaltyName] = &[
    DefensivePassInterference,
    DefensiveHolding,
    IllegalContact,
    OffensivePassInterference,
];

const PASSER: &[PenaltyName] = &[RoughingThePasser, UnnecessaryRoughness, FaceMask, PersonalFoul];
const KICKER: &[PenaltyName] = &[RoughingTheKicker, RunningIntoTheKicker];
const CARRIER: &[PenaltyName] = &[
    UnnecessaryRoughness,
    FaceMask,
    HorseCollarTackle,
    PersonalFoul,
    Tripping,
];
const RETURNER: &[PenaltyName] = &[UnnecessaryRoughness, FaceMask, HorseCollarTackle, PersonalFoul];

impl PenaltyContext {
    pub fn eligible(&self) -> &'static [PenaltyName] {
        match self {
            PenaltyContext::PreSnap => PRE_SNAP,
            PenaltyContext::Blocking { on_return: true, .. } => RETURN_BLOCKING,
            PenaltyContext::Blocking { .. } => BLOCKING,
            PenaltyContext::Coverage { .. } => COVERAGE,
            PenaltyContext::Tackle(TackleContext::PasserInPocket)
            | PenaltyContext::Tackle(TackleContext::PasserScrambling) => PASSER,
            PenaltyContext::Tackle(TackleContext::Kicker) => KICKER,
            PenaltyContext::Tackle(TackleContext::BallCarrier)
            | PenaltyContext::Tackle(TackleContext::Receiver) => CARRIER,
            PenaltyContext::Tackle(TackleContext::Returner) => RETURNER,
        }
    }

    /// Side of the snap (offense = team that snapped or kicked) that committed `name`.
    pub fn offending_side(&self, name: PenaltyName) -> FoulSide {
        match self {
            PenaltyContext::Blocking { on_return: true, .. } => FoulSide::Defense,
            PenaltyContext::Blocking { .. } => FoulSide::Offense,
            PenaltyContext::Tackle(TackleContext::Returner) => FoulSide::Offense,
            PenaltyContext::Tackle(_) => FoulSide::Defense,
            PenaltyContext::PreSnap | PenaltyContext::Coverage { .. } => name.side(),
        }
    }

    /// Odds of one foul reweighted for the situation.
    fn weight(&self, name: PenaltyName) -> f64 {
        let mut odds = name.odds();
        if let PenaltyContext::Coverage {
            air_yards,
            completed,
        } = *self
        {
            match name {
                DefensivePassInterference if !completed && air_yards > 15 => odds *= 2.5,
                DefensivePassInterference if completed => odds *= 0.1,
                DefensiveHolding if air_yards < 10 => odds *= 1.5,
                IllegalContact if air_yards < 5 => odds *= 2.0,
                IllegalContact => odds *= 0.3,
                OffensivePassInterference if (5..=15).contains(&air_yards) => odds *= 1.3,
                _ => {}
            }
        }
        odds
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyCheck {
    pub context: PenaltyContext,
    /// Player-driven scaling, independent of tuning
    pub player_factor: f64,
}

/// A check outcome plus the foul picked when it fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyCheckOutcome {
    pub outcome: CheckOutcome,
    pub penalty: Option<PenaltyName>,
}

impl PenaltyCheck {
    pub fn pre_snap() -> Self {
        Self {
            context: PenaltyContext::PreSnap,
            player_factor: 1.0,
        }
    }

    pub fn blocking(blockers: &[Player], defenders: &[Player], is_pass: bool, on_return: bool) -> Self {
        let line = average_rating(
            blockers,
            |p| p.position.is_offensive_line() || on_return,
            |p| p.blocking as f64,
            50.0,
        );
        let front = average_rating(
            defenders,
            |p| p.position.is_front_seven() || on_return,
            |p| p.tackling as f64,
            50.0,
        );
        Self {
            context: PenaltyContext::Blocking { is_pass, on_return },
            player_factor: (1.3 - line / 100.0 * 0.6) * (0.8 + front / 100.0 * 0.6),
        }
    }

    pub fn coverage(receiver: &Player, defense: &[Player], air_yards: i32, completed: bool) -> Self {
        let coverage = average_rating(
            defense,
            |p| p.position.is_defensive_back(),
            |p| p.coverage as f64,
            50.0,
        );
        let mut factor =
            (1.5 - coverage / 100.0 * 0.8) * (0.9 + receiver.catching as f64 / 100.0 * 0.4);
        if air_yards > 20 {
            factor *= 1.4;
        } else if air_yards > 10 {
            factor *= 1.2;
        }
        Self {
            context: PenaltyContext::Coverage {
                air_yards,
                completed,
            },
            player_factor: factor,
        }
    }

    pub fn tackle(context: TackleContext, tacklers: &[&Player]) -> Self {
        let player_factor = if tacklers.is_empty() {
            1.0
        } else {
            let strength =
                tacklers.iter().map(|p| p.strength as f64).sum::<f64>() / tacklers.len() as f64;
            0.9 + strength / 100.0 * 0.3
        };
        Self {
            context: PenaltyContext::Tackle(context),
            player_factor,
        }
    }

    fn context_multiplier(&self, t: &Tuning) -> f64 {
        let p = &t.penalties;
        match self.context {
            PenaltyContext::PreSnap | PenaltyContext::Coverage { .. } => 1.0,
            PenaltyContext::Blocking { is_pass: true, .. } => p.pass_blocking_multiplier,
            PenaltyContext::Blocking { .. } => p.run_blocking_multiplier,
            PenaltyContext::Tackle(TackleContext::PasserInPocket) => p.passer_in_pocket_multiplier,
            PenaltyContext::Tackle(TackleContext::PasserScrambling) => {
                p.passer_scrambling_multiplier
            }
            PenaltyContext::Tackle(TackleContext::Kicker) => p.kicker_multiplier,
            PenaltyContext::Tackle(TackleContext::Receiver) => p.receiver_multiplier,
            PenaltyContext::Tackle(_) => 1.0,
        }
    }

    fn total_weight(&self) -> f64 {
        self.context
            .eligible()
            .iter()
            .map(|n| self.context.weight(*n))
            .sum()
    }

    /// Rolls once and names the foul when the check fires.
    pub fn resolve(
        &self,
        rng: &mut dyn RandomSource,
        tuning: &Tuning,
    ) -> Result<PenaltyCheckOutcome, SimError> {
        let outcome = self.execute(rng, tuning)?;
        if !outcome.occurred {
            return Ok(PenaltyCheckOutcome {
                outcome,
                penalty: None,
            });
        }
        let total = self.total_weight();
        let target = outcome.roll / outcome.probability * total;
        let eligible = self.context.eligible();
        let mut cumulative = 0.0;
        let mut picked = eligible[eligible.len() - 1];
        for name in eligible {
            cumulative += self.context.weight(*name);
            if target < cumulative {
                picked = *name;
                break;
            }
        }
        Ok(PenaltyCheckOutcome {
            outcome,
            penalty: Some(picked),
        })
    }
}

impl SkillsCheck for PenaltyCheck {
    fn name(&self) -> &'static str {
        "penalty"
    }

    fn probability(&self, t: &Tuning) -> f64 {
        self.total_weight() * self.player_factor * self.context_multiplier(t) * t.penalties.frequency_scale
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
    fn same_roll_picks_the_foul() {
        let t = Tuning::default();
        let check = PenaltyCheck::pre_snap();
        // Pre-snap rate equals the summed odds, so the roll maps straight onto the table.
        let mut rng = scripted(&[FalseStart.odds() * 0.5]);
        let out = check.resolve(&mut rng, &t).unwrap();
        assert_eq!(out.penalty, Some(FalseStart));
        assert!(rng.is_fully_consumed());

        let past_false_start = FalseStart.odds() + DelayOfGame.odds() * 0.5;
        let mut rng = scripted(&[past_false_start]);
        let out = check.resolve(&mut rng, &t).unwrap();
        assert_eq!(out.penalty, Some(DelayOfGame));
    }

    #[test]
    fn a_miss_names_nothing() {
        let t = Tuning::default();
        let mut rng = scripted(&[0.9]);
        let out = PenaltyCheck::pre_snap().resolve(&mut rng, &t).unwrap();
        assert!(!out.outcome.occurred);
        assert_eq!(out.penalty, None);
    }

    #[test]
    fn zero_frequency_disables_flags() {
        let mut t = Tuning::default();
        t.penalties.frequency_scale = 0.0;
        let mut rng = scripted(&[0.0]);
        let out = PenaltyCheck::pre_snap().resolve(&mut rng, &t).unwrap();
        assert_eq!(out.penalty, None);
    }

    #[test]
    fn return_blocking_fouls_belong_to_the_receiving_team() {
        let ctx = PenaltyContext::Blocking {
            is_pass: false,
            on_return: true,
        };
        assert_eq!(ctx.offending_side(OffensiveHolding), FoulSide::Defense);
        let tackle = PenaltyContext::Tackle(TackleContext::Returner);
        assert_eq!(tackle.offending_side(FaceMask), FoulSide::Offense);
    }
}
