//! Penalty acceptance and enforcement.
//!
//! Acceptance compares the situation the non-offending side would face with
//! the foul accepted against the situation with it declined. Enforcement then
//! turns the accepted fouls of a play into one adjustment that
//! [`crate::play_result`] applies together with the play's own result.

use tracing::debug;

use crate::game::{Down, Game, Possession, FIRST_DOWN_DISTANCE, OPPONENT_GOAL_LINE};
use crate::penalty::{Penalty, PenaltyName, PenaltyTiming};
use crate::play::{Play, PlayKind, PlayType};

/// What the offense faces after a snap, for comparing accept against decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesState {
    Touchdown,
    Series {
        field_position: i32,
        down: Down,
        yards_to_go: i32,
    },
    TurnoverOnDowns,
}

impl SeriesState {
    fn after(field_position: i32, down: Option<Down>, yards_to_go: i32) -> Self {
        match down {
            Some(down) => SeriesState::Series {
                field_position,
                down,
                yards_to_go,
            },
            None => SeriesState::TurnoverOnDowns,
        }
    }

    /// Higher is better for the offense.
    pub fn value(self) -> i32 {
        match self {
            SeriesState::Touchdown => i32::MAX,
            SeriesState::TurnoverOnDowns => i32::MIN,
            SeriesState::Series {
                field_position,
                down,
                yards_to_go,
            } => field_position - yards_to_go - down_cost(down),
        }
    }
}

fn down_cost(down: Down) -> i32 {
    match down {
        Down::First => 0,
        Down::Second => 4,
        Down::Third => 10,
        Down::Fourth => 40,
    }
}

/// Yards actually walked off. Fixed-distance fouls stop at half the distance
/// to the goal line they move toward; spot fouls stop at the 1.
pub fn enforced_yards(field_position: i32, penalty: &Penalty, toward_own_goal: bool) -> i32 {
    let room = if toward_own_goal {
        field_position
    } else {
        OPPONENT_GOAL_LINE - field_position
    };
    let yards = penalty.yards.max(0);
    if penalty.name.is_spot_foul() && !toward_own_goal {
        yards.min(room - 1).max(0)
    } else {
        yards.min(room / 2)
    }
}

/// Decides whether the side that did not commit `penalty` takes it.
///
/// Defensive fouls carrying an automatic first down are always taken. Other
/// fouls are taken when the enforced situation is at least as good for the
/// side making the call as the situation the play produced.
pub fn should_accept_penalty(
    game: &Game,
    penalty: &Penalty,
    called_on: Possession,
    offense: Possession,
    yards_gained: i32,
    down: Down,
    yards_to_go: i32,
) -> bool {
    let on_offense = called_on == offense;
    if !on_offense && penalty.name.grants_automatic_first_down(true) {
        return true;
    }
    let fp = game.field_position;

    let declined = if fp + yards_gained >= OPPONENT_GOAL_LINE {
        SeriesState::Touchdown
    } else if yards_gained >= yards_to_go {
        SeriesState::after(fp + yards_gained, Some(Down::First), FIRST_DOWN_DISTANCE)
    } else {
        SeriesState::after(fp + yards_gained, down.next(), yards_to_go - yards_gained)
    };

    let accepted = if on_offense {
        let dist = enforced_yards(fp, penalty, true);
        let next = if penalty.name.is_loss_of_down() {
            down.next()
        } else {
            Some(down)
        };
        SeriesState::after(fp - dist, next, yards_to_go + dist)
    } else {
        let dist = enforced_yards(fp, penalty, false);
        if dist >= yards_to_go {
            SeriesState::after(fp + dist, Some(Down::First), FIRST_DOWN_DISTANCE)
        } else {
            SeriesState::after(fp + dist, Some(down), yards_to_go - dist)
        }
    };

    let accept = if on_offense {
        declined != SeriesState::TurnoverOnDowns && accepted.value() <= declined.value()
    } else {
        declined != SeriesState::Touchdown && accepted.value() >= declined.value()
    };
    debug!(
        penalty = ?penalty.name,
        ?declined,
        ?accepted,
        accept,
        "penalty decision"
    );
    accept
}

fn is_kicker_foul(name: PenaltyName) -> bool {
    matches!(
        name,
        PenaltyName::RoughingTheKicker | PenaltyName::RunningIntoTheKicker
    )
}

/// Acceptance decision for a foul flagged on `play`, resolved before the play
/// is applied to `game`.
pub fn accept_on_play(game: &Game, play: &Play, penalty: &Penalty) -> bool {
    if play.no_play {
        return penalty.name.is_dead_ball();
    }
    if play.is_touchdown || play.is_safety {
        return false;
    }
    let kind = play.play_type();
    if kind.is_scrimmage() {
        if play.possession_change {
            return false;
        }
        if penalty.occurred_when == PenaltyTiming::After {
            return true;
        }
        return should_accept_penalty(
            game,
            penalty,
            penalty.called_on,
            play.possession,
            play.yards_gained,
            play.down,
            play.yards_to_go,
        );
    }

    if let PlayKind::FieldGoal(fg) = &play.kind {
        // A try is never re-kicked; the next snap is a kickoff either way.
        if fg.is_good || fg.is_extra_point {
            return false;
        }
    }
    if is_kicker_foul(penalty.name) && matches!(kind, PlayType::Punt | PlayType::FieldGoal) {
        let dist = enforced_yards(play.start_field_position, penalty, false);
        return penalty.name.grants_automatic_first_down(true) || dist >= play.yards_to_go;
    }
    true
}

/// Net effect of every accepted foul on a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
    /// No accepted fouls; the play stands as run
    Stands,
    /// Fouls by both sides cancel; the down is replayed from the same spot
    Offset,
    /// The play is wiped out and the ball is marked off from where it was
    /// snapped. `down` is `None` after a loss of down on fourth down.
    FromPreviousSpot {
        field_position: i32,
        down: Option<Down>,
        yards_to_go: i32,
    },
    /// The play stands and the ball is moved from where it became dead.
    /// `shift` is in the frame of the team holding the ball at the end.
    FromEndOfPlay { shift: i32, first_down: bool },
}

fn timing_rank(t: PenaltyTiming) -> u8 {
    match t {
        PenaltyTiming::Before => 0,
        PenaltyTiming::During => 1,
        PenaltyTiming::After => 2,
    }
}

/// The foul walked off when a side has several: longest first, then earliest.
fn primary<'a>(fouls: &[&'a Penalty]) -> Option<&'a Penalty> {
    fouls
        .iter()
        .copied()
        .min_by_key(|p| (-p.yards, timing_rank(p.occurred_when)))
}

/// Resolves the accepted fouls on `play` against the pre-play `game`.
pub fn enforce_penalties(game: &Game, play: &Play) -> Enforcement {
    let accepted: Vec<&Penalty> = play.penalties.iter().filter(|p| p.accepted).collect();
    if accepted.is_empty() {
        return Enforcement::Stands;
    }
    let (on_offense, on_defense): (Vec<&Penalty>, Vec<&Penalty>) = accepted
        .into_iter()
        .partition(|p| p.called_on == play.possession);

    let enforced = match (primary(&on_offense), primary(&on_defense)) {
        (Some(off), Some(def)) => {
            let off_major = off.name.is_major();
            let def_major = def.name.is_major();
            let minors = |fouls: &[&Penalty]| fouls.iter().all(|p| p.yards <= 5);
            if off_major && minors(&on_defense) && !play.possession_change {
                off
            } else if def_major && minors(&on_offense) && !play.possession_change {
                def
            } else {
                debug!("offsetting fouls");
                return Enforcement::Offset;
            }
        }
        (Some(p), None) | (None, Some(p)) => p,
        (None, None) => return Enforcement::Stands,
    };
    let result = enforce_one(game, play, enforced);
    debug!(penalty = ?enforced.name, ?result, "penalty enforced");
    result
}

fn enforce_one(game: &Game, play: &Play, penalty: &Penalty) -> Enforcement {
    let kind = play.play_type();
    let from_previous_spot = play.no_play
        || (kind.is_scrimmage() && penalty.occurred_when != PenaltyTiming::After)
        || (is_kicker_foul(penalty.name) && matches!(kind, PlayType::Punt | PlayType::FieldGoal));

    if !from_previous_spot {
        let against_holder = penalty.called_on == play.end_possession;
        let dist = enforced_yards(play.end_field_position, penalty, against_holder);
        let first_down = kind.is_kick()
            || (!against_holder
                && play.end_possession == play.possession
                && penalty.name.grants_automatic_first_down(true));
        return Enforcement::FromEndOfPlay {
            shift: if against_holder { -dist } else { dist },
            first_down,
        };
    }

    let fp = game.field_position;
    let ytg = game.yards_to_go;
    if penalty.called_on == play.possession {
        let dist = enforced_yards(fp, penalty, true);
        let down = if penalty.name.is_loss_of_down() {
            play.down.next()
        } else {
            Some(play.down)
        };
        Enforcement::FromPreviousSpot {
            field_position: fp - dist,
            down,
            yards_to_go: ytg + dist,
        }
    } else {
        let dist = enforced_yards(fp, penalty, false);
        let first_down = penalty.name.grants_automatic_first_down(true) || ytg - dist <= 0;
        let (down, yards_to_go) = if first_down {
            (Down::First, FIRST_DOWN_DISTANCE)
        } else {
            (play.down, ytg - dist)
        };
        Enforcement::FromPreviousSpot {
            field_position: fp + dist,
            down: Some(down),
            yards_to_go,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foul(name: PenaltyName, on: Possession, when: PenaltyTiming) -> Penalty {
        Penalty {
            name,
            yards: name.yards(),
            called_on: on,
            committed_by: None,
            occurred_when: when,
            accepted: true,
        }
    }

    fn game_at(fp: i32, down: Down, ytg: i32) -> Game {
        let mut g = Game::new(Possession::Home);
        g.field_position = fp;
        g.down = down;
        g.yards_to_go = ytg;
        g
    }

    #[test]
    fn half_distance_near_own_goal() {
        let p = foul(PenaltyName::OffensiveHolding, Possession::Home, PenaltyTiming::During);
        assert_eq!(enforced_yards(8, &p, true), 4);
        assert_eq!(enforced_yards(50, &p, true), 10);
    }

    #[test]
    fn spot_foul_stops_at_the_one() {
        let mut p = foul(
            PenaltyName::DefensivePassInterference,
            Possession::Away,
            PenaltyTiming::During,
        );
        p.yards = 40;
        assert_eq!(enforced_yards(80, &p, false), 19);
        assert_eq!(enforced_yards(30, &p, false), 40);
    }

    #[test]
    fn defense_declines_holding_when_the_play_left_fourth_down() {
        let g = game_at(40, Down::Third, 10);
        let p = foul(PenaltyName::OffensiveHolding, Possession::Home, PenaltyTiming::During);
        assert!(!should_accept_penalty(
            &g,
            &p,
            Possession::Home,
            Possession::Home,
            2,
            Down::Third,
            10
        ));
    }

    #[test]
    fn defense_accepts_holding_that_erases_a_first_down() {
        let g = game_at(40, Down::First, 10);
        let p = foul(PenaltyName::OffensiveHolding, Possession::Home, PenaltyTiming::During);
        assert!(should_accept_penalty(
            &g,
            &p,
            Possession::Home,
            Possession::Home,
            15,
            Down::First,
            10
        ));
    }

    #[test]
    fn offense_declines_offside_after_a_long_gain() {
        let g = game_at(40, Down::First, 10);
        let p = foul(PenaltyName::DefensiveOffside, Possession::Away, PenaltyTiming::Before);
        assert!(!should_accept_penalty(
            &g,
            &p,
            Possession::Away,
            Possession::Home,
            20,
            Down::First,
            10
        ));
        assert!(should_accept_penalty(
            &g,
            &p,
            Possession::Away,
            Possession::Home,
            1,
            Down::First,
            10
        ));
    }

    #[test]
    fn offsetting_minor_fouls_replay_the_down() {
        let g = game_at(40, Down::Second, 6);
        let mut play = Play::new(PlayType::Run, &g, Vec::new(), Vec::new());
        play.penalties = vec![
            foul(PenaltyName::OffensiveHolding, Possession::Home, PenaltyTiming::During),
            foul(PenaltyName::DefensiveHolding, Possession::Away, PenaltyTiming::During),
        ];
        assert_eq!(enforce_penalties(&g, &play), Enforcement::Offset);
    }

    #[test]
    fn major_foul_is_not_offset_by_a_minor_one() {
        let g = game_at(40, Down::Second, 6);
        let mut play = Play::new(PlayType::Run, &g, Vec::new(), Vec::new());
        play.penalties = vec![
            foul(PenaltyName::FaceMask, Possession::Home, PenaltyTiming::During),
            foul(PenaltyName::DefensiveOffside, Possession::Away, PenaltyTiming::Before),
        ];
        assert_eq!(
            enforce_penalties(&g, &play),
            Enforcement::FromPreviousSpot {
                field_position: 25,
                down: Some(Down::Second),
                yards_to_go: 21
            }
        );
    }

    #[test]
    fn loss_of_down_on_fourth_turns_the_ball_over() {
        let g = game_at(30, Down::Fourth, 3);
        let mut play = Play::new(PlayType::Pass, &g, Vec::new(), Vec::new());
        play.penalties = vec![foul(
            PenaltyName::IntentionalGrounding,
            Possession::Home,
            PenaltyTiming::During,
        )];
        assert_eq!(
            enforce_penalties(&g, &play),
            Enforcement::FromPreviousSpot {
                field_position: 20,
                down: None,
                yards_to_go: 13
            }
        );
    }

    #[test]
    fn kicker_foul_needs_the_line_to_gain() {
        let g = game_at(40, Down::Fourth, 8);
        let mut play = Play::new(PlayType::Punt, &g, Vec::new(), Vec::new());
        play.possession_change = true;
        play.end_possession = Possession::Away;
        let running = foul(PenaltyName::RunningIntoTheKicker, Possession::Away, PenaltyTiming::During);
        let roughing = foul(PenaltyName::RoughingTheKicker, Possession::Away, PenaltyTiming::During);
        assert!(!accept_on_play(&g, &play, &running));
        assert!(accept_on_play(&g, &play, &roughing));
    }
}
