//! Loose balls and interceptions.

use serde::{Deserialize, Serialize};

use crate::errors::SimError;
use crate::game::Possession;
use crate::player::{average_rating, top_by, Player, PlayerId};
use crate::rng::RandomSource;
use crate::tuning::Tuning;

use super::SkillsCheckResult;

/// How a fumble played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FumbleRecovery {
    /// Ball rolled out of bounds; the fumbling team keeps it where it went out
    pub out_of_bounds: bool,
    pub recovered_by: Option<PlayerId>,
    pub recovering_team: Possession,
    /// Bounce before the recovery, in the fumbling team's direction
    pub bounce_yards: i32,
    /// Advance after the recovery, in the recovering team's direction
    pub return_yards: i32,
}

impl FumbleRecovery {
    pub fn changed_possession(&self, fumbling_team: Possession) -> bool {
        self.recovering_team != fumbling_team
    }
}

/// Who comes up with a loose ball.
///
/// Out of bounds: one `next_double`. Otherwise five: out of bounds, bounce
/// direction, bounce distance, recovering side, advance.
#[derive(Debug, Clone, Copy)]
pub struct FumbleRecoveryResult<'a> {
    pub fumbling_team: Possession,
    /// Players of the team that lost the ball
    pub fumbling_players: &'a [Player],
    pub opponents: &'a [Player],
}

fn best_recoverer(players: &[Player]) -> Option<&Player> {
    top_by(
        players,
        |p| !p.is_injured(),
        |p| p.speed as u32 + p.awareness as u32,
        1,
    )
    .into_iter()
    .next()
    .or_else(|| players.first())
}

impl SkillsCheckResult for FumbleRecoveryResult<'_> {
    type Output = FumbleRecovery;

    fn name(&self) -> &'static str {
        "fumble_recovery"
    }

    fn execute(
        &self,
        rng: &mut dyn RandomSource,
        t: &Tuning,
    ) -> Result<FumbleRecovery, SimError> {
        let f = &t.turnovers;
        if rng.next_double()? < f.fumble_out_of_bounds {
            return Ok(FumbleRecovery {
                out_of_bounds: true,
                recovered_by: None,
                recovering_team: self.fumbling_team,
                bounce_yards: 0,
                return_yards: 0,
            });
        }

        let direction = rng.next_double()?;
        let spread = rng.next_double()?;
        let (bounce_yards, base) = if direction < f.recovery_backward_threshold {
            (-((spread * f.bounce_spread) as i32), f.recovery_backward_base)
        } else if direction < f.recovery_forward_threshold {
            ((spread * f.bounce_spread) as i32, f.recovery_forward_base)
        } else {
            let sideways = spread * f.sideways_bounce_spread - f.sideways_bounce_spread / 2.0;
            (sideways as i32, f.recovery_sideways_base)
        };

        let own_awareness =
            average_rating(self.fumbling_players, |_| true, |p| p.awareness as f64, 50.0);
        let their_awareness =
            average_rating(self.opponents, |_| true, |p| p.awareness as f64, 50.0);
        let keep = f
            .recovery
            .apply(base + (own_awareness - their_awareness) / 100.0 * f.recovery_awareness_factor);

        let kept = rng.next_double()? < keep;
        let advance = rng.next_double()?;
        let (recovering_team, recoverer) = if kept {
            (self.fumbling_team, best_recoverer(self.fumbling_players))
        } else {
            (self.fumbling_team.opponent(), best_recoverer(self.opponents))
        };
        let return_yards = if kept {
            (advance * f.kept_advance_spread - f.kept_advance_spread / 2.0) as i32
        } else {
            let skill = recoverer
                .map(|p| (p.speed as f64 + p.agility as f64) / 2.0)
                .unwrap_or(50.0);
            f.defense_return.at(skill, advance) as i32
        };

        Ok(FumbleRecovery {
            out_of_bounds: false,
            recovered_by: recoverer.map(|p| p.id),
            recovering_team,
            bounce_yards,
            return_yards,
        })
    }
}

/// The defender in the best position to pick off a throw.
pub fn likely_interceptor(defense: &[Player]) -> Option<&Player> {
    let hands = |p: &Player| p.coverage as u32 + p.speed as u32;
    top_by(defense, |p| p.position.is_defensive_back() && !p.is_injured(), hands, 1)
        .into_iter()
        .next()
        .or_else(|| top_by(defense, |_| true, hands, 1).into_iter().next())
}

/// Return after a pick, never negative. Two `next_double`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptionReturnResult {
    pub interceptor_skill: f64,
    /// Pursuit of the team that threw it
    pub pursuit: f64,
}

impl InterceptionReturnResult {
    pub fn new(interceptor: &Player, offense: &[Player]) -> Self {
        Self {
            interceptor_skill: (interceptor.speed as f64 + interceptor.agility as f64) / 2.0,
            pursuit: average_rating(
                offense,
                |_| true,
                |p| (p.speed as f64 + p.tackling as f64) / 2.0,
                50.0,
            ),
        }
    }
}

impl SkillsCheckResult for InterceptionReturnResult {
    type Output = i32;

    fn name(&self) -> &'static str {
        "interception_return"
    }

    fn execute(&self, rng: &mut dyn RandomSource, t: &Tuning) -> Result<i32, SimError> {
        let f = &t.turnovers;
        let base =
            f.interception_return_base + rng.next_double()? * f.interception_return_base_spread;
        let diff = (self.interceptor_skill - self.pursuit) / f.interception_return_skill_divisor;
        let random =
            rng.next_double()? * f.interception_return_spread - f.interception_return_offset;
        Ok(((base + diff + random) as i32).max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Position;
    use crate::replay::{ReplayLog, ReplayRandom};

    fn doubles(values: &[f64]) -> ReplayRandom {
        let mut log = ReplayLog::new(0);
        log.doubles.extend_from_slice(values);
        ReplayRandom::replay(log)
    }

    fn squads() -> (Vec<Player>, Vec<Player>) {
        let mut fast = Player::new(2, "fast", Position::WR);
        fast.speed = 95;
        let offense = vec![Player::new(1, "rb", Position::RB), fast];
        let mut lb = Player::new(10, "lb", Position::LB);
        lb.awareness = 90;
        let defense = vec![Player::new(11, "cb", Position::CB), lb];
        (offense, defense)
    }

    #[test]
    fn out_of_bounds_takes_one_draw() {
        let (offense, defense) = squads();
        let r = FumbleRecoveryResult {
            fumbling_team: Possession::Home,
            fumbling_players: &offense,
            opponents: &defense,
        };
        let mut rng = doubles(&[0.05]);
        let out = r.execute(&mut rng, &Tuning::default()).unwrap();
        assert!(out.out_of_bounds);
        assert_eq!(out.recovering_team, Possession::Home);
        assert!(rng.is_fully_consumed());
    }

    #[test]
    fn defense_recovery_picks_the_most_alert_runner() {
        let (offense, defense) = squads();
        let r = FumbleRecoveryResult {
            fumbling_team: Possession::Home,
            fumbling_players: &offense,
            opponents: &defense,
        };
        // in bounds, backward bounce of 4, defense recovers, advance roll
        let mut rng = doubles(&[0.5, 0.1, 0.5, 0.99, 0.5]);
        let out = r.execute(&mut rng, &Tuning::default()).unwrap();
        assert!(!out.out_of_bounds);
        assert_eq!(out.bounce_yards, -4);
        assert_eq!(out.recovering_team, Possession::Away);
        assert_eq!(out.recovered_by, Some(PlayerId(10)));
        assert!(out.changed_possession(Possession::Home));
        // 5 + 7.5 + 40 - 30
        assert_eq!(out.return_yards, 22);
    }

    #[test]
    fn defense_return_curve_is_tunable() {
        let (offense, defense) = squads();
        let r = FumbleRecoveryResult {
            fumbling_team: Possession::Home,
            fumbling_players: &offense,
            opponents: &defense,
        };
        let mut t = Tuning::default();
        t.turnovers.defense_return.spread = 0.0;
        t.turnovers.defense_return.offset = 0.0;
        let mut rng = doubles(&[0.5, 0.1, 0.5, 0.99, 0.5]);
        let out = r.execute(&mut rng, &t).unwrap();
        // 5 + 50 / 100 * 15
        assert_eq!(out.return_yards, 12);
    }

    #[test]
    fn interception_return_is_never_negative() {
        let r = InterceptionReturnResult {
            interceptor_skill: 0.0,
            pursuit: 100.0,
        };
        let y = r
            .execute(&mut doubles(&[0.0, 0.0]), &Tuning::default())
            .unwrap();
        assert_eq!(y, 0);
    }
}
