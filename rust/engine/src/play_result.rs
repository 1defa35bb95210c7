//! Applies a resolved play to the game: scoring, change of possession, and
//! down and distance, with accepted penalties folded in.
//!
//! Every branch writes possession, field position, down and distance
//! together, so the game never holds a half-updated series.

use tracing::info;

use crate::enforcement::{enforce_penalties, Enforcement};
use crate::game::{Down, Game, Possession, FIRST_DOWN_DISTANCE, OPPONENT_GOAL_LINE, OWN_GOAL_LINE};
use crate::play::{Play, PlayKind, PlayType};
use crate::tuning::Tuning;

const TOUCHDOWN_POINTS: u32 = 6;
const FIELD_GOAL_POINTS: u32 = 3;
const EXTRA_POINT_POINTS: u32 = 1;
const SAFETY_POINTS: u32 = 2;

/// Updates `game` with the outcome of `play` and returns how its fouls were
/// enforced. Expects `game` to still hold the situation the play started from.
pub fn apply_play_result(game: &mut Game, play: &mut Play, tuning: &Tuning) -> Enforcement {
    game.plays_run += 1;
    let enforcement = enforce_penalties(game, play);
    match enforcement {
        Enforcement::Offset => {
            play.end_field_position = play.start_field_position;
            play.end_possession = play.possession;
            play.possession_change = false;
            play.commentary.push("Offsetting penalties, replay the down.".to_string());
        }
        Enforcement::FromPreviousSpot {
            field_position,
            down,
            yards_to_go,
        } => {
            play.end_field_position = field_position;
            play.end_possession = play.possession;
            match down {
                Some(down) => {
                    play.possession_change = false;
                    game.possession = play.possession;
                    game.field_position = field_position;
                    game.down = down;
                    game.yards_to_go = yards_to_go;
                }
                None => turnover_on_downs(game, play, field_position),
            }
        }
        Enforcement::Stands => natural_result(game, play, tuning, 0, false),
        Enforcement::FromEndOfPlay { shift, first_down } => {
            natural_result(game, play, tuning, shift, first_down)
        }
    }
    info!(
        possession = ?game.possession,
        field_position = game.field_position,
        down = game.down.ordinal(),
        yards_to_go = game.yards_to_go,
        home = game.home_score,
        away = game.away_score,
        "game state"
    );
    enforcement
}

fn natural_result(game: &mut Game, play: &mut Play, tuning: &Tuning, shift: i32, first_down: bool) {
    if play.is_touchdown {
        let scorer = play.end_possession;
        game.add_score(scorer, TOUCHDOWN_POINTS);
        play.end_field_position = OPPONENT_GOAL_LINE;
        play.possession_change = true;
        game.start_series(scorer, OPPONENT_GOAL_LINE);
        return;
    }
    if play.is_safety {
        let conceding = play.end_possession;
        game.add_score(conceding.opponent(), SAFETY_POINTS);
        play.end_field_position = OWN_GOAL_LINE;
        play.possession_change = true;
        // The conceding team kicks from its own goal line.
        game.start_series(conceding, OWN_GOAL_LINE);
        return;
    }

    let offense = play.possession;
    let holder = play.end_possession;
    let spot = if shift == 0 {
        play.end_field_position
    } else {
        (play.end_field_position + shift).clamp(OWN_GOAL_LINE + 1, OPPONENT_GOAL_LINE - 1)
    };

    let muffed_punt = matches!(&play.kind, PlayKind::Punt(k) if k.muffed_catch);
    let field_goal = match &play.kind {
        PlayKind::FieldGoal(fg) => Some((fg.is_extra_point, fg.is_good, fg.good_snap)),
        _ => None,
    };

    if let Some((is_extra_point, is_good, good_snap)) = field_goal {
        if is_extra_point {
            if is_good {
                game.add_score(offense, EXTRA_POINT_POINTS);
            }
            hold_for_kickoff(game, play, offense);
        } else if is_good {
            game.add_score(offense, FIELD_GOAL_POINTS);
            hold_for_kickoff(game, play, offense);
        } else if good_snap && !play.blocked {
            // Missed: the other side takes over at the spot of the kick, or
            // at its 20 when the kick came from inside the 20.
            let fgt = &tuning.field_goals;
            let kick_spot = (play.start_field_position - fgt.hold_depth).max(OWN_GOAL_LINE);
            let end = if OPPONENT_GOAL_LINE - kick_spot < fgt.miss_touchback_zone {
                OPPONENT_GOAL_LINE - fgt.miss_touchback_zone
            } else {
                kick_spot
            };
            let end = (end + shift).clamp(OWN_GOAL_LINE + 1, OPPONENT_GOAL_LINE - 1);
            play.end_field_position = end;
            play.end_possession = offense;
            play.possession_change = true;
            game.start_series(offense.opponent(), OPPONENT_GOAL_LINE - end);
        } else {
            // Bad snap or block: a change of possession whoever falls on it.
            play.possession_change = true;
            hand_over(game, holder, spot, offense.opponent());
        }
        return;
    }

    match play.play_type() {
        PlayType::Kickoff => hand_over(game, holder, spot, holder),
        // The punting team recovering a muff earns a fresh series.
        PlayType::Punt if holder != offense || muffed_punt => hand_over(game, holder, spot, holder),
        PlayType::Run | PlayType::Pass if play.possession_change => {
            hand_over(game, holder, spot, holder)
        }
        _ => {
            let yards = play.yards_gained + shift;
            let spot = (play.start_field_position + yards)
                .clamp(OWN_GOAL_LINE + 1, OPPONENT_GOAL_LINE - 1);
            progress_downs(game, play, spot, yards, first_down);
        }
    }
}

/// Fresh series for `next`, with `spot` measured in `holder`'s frame.
fn hand_over(game: &mut Game, holder: Possession, spot: i32, next: Possession) {
    let field_position = if next == holder {
        spot
    } else {
        OPPONENT_GOAL_LINE - spot
    };
    game.start_series(next, field_position);
}

/// The scoring team keeps the ball where it is and kicks off next.
fn hold_for_kickoff(game: &mut Game, play: &mut Play, team: Possession) {
    play.end_field_position = play.start_field_position;
    play.end_possession = team;
    play.possession_change = false;
    game.start_series(team, play.start_field_position);
}

fn progress_downs(game: &mut Game, play: &mut Play, spot: i32, yards: i32, first_down: bool) {
    game.possession = play.possession;
    game.field_position = spot;
    if first_down || yards >= play.yards_to_go {
        game.down = Down::First;
        game.yards_to_go = FIRST_DOWN_DISTANCE;
        return;
    }
    match play.down.next() {
        Some(down) => {
            game.down = down;
            game.yards_to_go = play.yards_to_go - yards;
        }
        None => turnover_on_downs(game, play, spot),
    }
}

fn turnover_on_downs(game: &mut Game, play: &mut Play, spot: i32) {
    play.possession_change = true;
    play.commentary.push("Turnover on downs.".to_string());
    game.start_series(play.possession.opponent(), OPPONENT_GOAL_LINE - spot);
}

/// What the team with the ball lines up for after a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextSnap {
    Kickoff,
    ExtraPoint,
    Scrimmage,
}

/// The snap that follows `play`, given how its fouls were enforced and what
/// `previous` was called for it.
///
/// Offsetting fouls replay the same snap. A foul marked from the previous spot
/// leaves a scrimmage down. Otherwise a touchdown earns a try, and a safety,
/// a try or a good field goal is followed by a kickoff.
pub fn next_snap(play: &Play, enforcement: Enforcement, previous: NextSnap) -> NextSnap {
    match enforcement {
        Enforcement::Offset => previous,
        Enforcement::FromPreviousSpot { .. } => NextSnap::Scrimmage,
        Enforcement::Stands | Enforcement::FromEndOfPlay { .. } => {
            let good_kick = matches!(&play.kind, PlayKind::FieldGoal(fg) if fg.is_good);
            if play.is_touchdown {
                NextSnap::ExtraPoint
            } else if play.is_safety || play.is_extra_point() || good_kick {
                NextSnap::Kickoff
            } else {
                NextSnap::Scrimmage
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::FieldGoalDetails;

    fn run_play(game: &Game, gained: i32) -> Play {
        let mut play = Play::new(PlayType::Run, game, Vec::new(), Vec::new());
        play.yards_gained = gained;
        play.end_field_position = game.field_position + gained;
        play
    }

    fn situation(fp: i32, down: Down, ytg: i32) -> Game {
        let mut g = Game::new(Possession::Home);
        g.field_position = fp;
        g.down = down;
        g.yards_to_go = ytg;
        g
    }

    #[test]
    fn gain_short_of_the_line_advances_the_down() {
        let t = Tuning::default();
        let mut g = situation(30, Down::First, 10);
        let mut play = run_play(&g, 4);
        apply_play_result(&mut g, &mut play, &t);
        assert_eq!((g.down, g.yards_to_go, g.field_position), (Down::Second, 6, 34));
        assert_eq!(g.plays_run, 1);
    }

    #[test]
    fn loss_adds_to_the_distance() {
        let t = Tuning::default();
        let mut g = situation(30, Down::Second, 6);
        let mut play = run_play(&g, -3);
        apply_play_result(&mut g, &mut play, &t);
        assert_eq!((g.down, g.yards_to_go), (Down::Third, 9));
    }

    #[test]
    fn fourth_down_failure_hands_the_ball_over() {
        let t = Tuning::default();
        let mut g = situation(60, Down::Fourth, 2);
        let mut play = run_play(&g, 1);
        apply_play_result(&mut g, &mut play, &t);
        assert!(play.possession_change);
        assert_eq!(g.possession, Possession::Away);
        assert_eq!((g.down, g.yards_to_go, g.field_position), (Down::First, 10, 39));
    }

    #[test]
    fn missed_kick_from_inside_the_twenty_comes_out_to_the_twenty() {
        let t = Tuning::default();
        let mut g = situation(92, Down::Fourth, 5);
        let mut play = Play::new(PlayType::FieldGoal, &g, Vec::new(), Vec::new());
        play.kind = PlayKind::FieldGoal(FieldGoalDetails {
            good_snap: true,
            attempt_distance: 25,
            ..FieldGoalDetails::default()
        });
        apply_play_result(&mut g, &mut play, &t);
        assert_eq!(play.end_field_position, 80);
        assert_eq!((g.possession, g.field_position), (Possession::Away, 20));
    }

    #[test]
    fn scores_decide_the_following_snap() {
        let g = situation(97, Down::First, 3);
        let mut td = run_play(&g, 3);
        td.is_touchdown = true;
        assert_eq!(next_snap(&td, Enforcement::Stands, NextSnap::Scrimmage), NextSnap::ExtraPoint);
        assert_eq!(next_snap(&td, Enforcement::Offset, NextSnap::Scrimmage), NextSnap::Scrimmage);

        let mut safety = run_play(&g, -3);
        safety.is_safety = true;
        let after_safety = next_snap(&safety, Enforcement::Stands, NextSnap::Scrimmage);
        assert_eq!(after_safety, NextSnap::Kickoff);

        let mut kick = Play::new(PlayType::FieldGoal, &g, Vec::new(), Vec::new());
        kick.kind = PlayKind::FieldGoal(FieldGoalDetails {
            is_good: true,
            ..FieldGoalDetails::default()
        });
        assert_eq!(next_snap(&kick, Enforcement::Stands, NextSnap::Scrimmage), NextSnap::Kickoff);

        let replayed = Enforcement::FromPreviousSpot {
            field_position: 92,
            down: Some(Down::First),
            yards_to_go: 8,
        };
        assert_eq!(next_snap(&kick, replayed, NextSnap::Scrimmage), NextSnap::Scrimmage);
        let gain = run_play(&g, 1);
        assert_eq!(next_snap(&gain, Enforcement::Stands, NextSnap::Kickoff), NextSnap::Scrimmage);
    }
}
