//! Game-loop driver: picks the next play, resolves it and applies the result.

use crate::roster::units_for;
use gridiron_engine::errors::SimError;
use gridiron_engine::game::{Down, Game, Possession};
use gridiron_engine::play::{Play, PlayType};
use gridiron_engine::play_result::{apply_play_result, next_snap, NextSnap};
use gridiron_engine::plays;
use gridiron_engine::rng::RandomSource;
use gridiron_engine::tuning::Tuning;

/// Fixed down-and-distance table.
pub fn call_play(game: &Game) -> PlayType {
    match game.down {
        Down::Fourth if game.field_position >= 62 => PlayType::FieldGoal,
        Down::Fourth => PlayType::Punt,
        Down::Third => PlayType::Pass,
        _ if game.yards_to_go > 6 => PlayType::Pass,
        _ => PlayType::Run,
    }
}

pub struct Driver {
    pub game: Game,
    pub next: NextSnap,
    tuning: Tuning,
}

impl Driver {
    /// Home kicks off.
    pub fn new(tuning: Tuning) -> Self {
        Self {
            game: Game::new(Possession::Home),
            next: NextSnap::Kickoff,
            tuning,
        }
    }

    pub fn step(&mut self, rng: &mut dyn RandomSource) -> Result<Play, SimError> {
        let team = self.game.possession;
        let play_type = match self.next {
            NextSnap::Kickoff => PlayType::Kickoff,
            NextSnap::ExtraPoint => PlayType::FieldGoal,
            NextSnap::Scrimmage => call_play(&self.game),
        };
        let (off, def) = units_for(play_type, team);
        let mut play = match self.next {
            NextSnap::ExtraPoint => Play::extra_point(&self.game, off, def),
            _ => Play::new(play_type, &self.game, off, def),
        };
        plays::resolve(&mut play, &self.game, rng, &self.tuning)?;
        let enforcement = apply_play_result(&mut self.game, &mut play, &self.tuning);
        self.next = next_snap(&play, enforcement, self.next);
        Ok(play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_engine::rng::DeterministicRandom;

    fn at(fp: i32, down: Down, ytg: i32) -> Game {
        let mut g = Game::new(Possession::Home);
        g.field_position = fp;
        g.down = down;
        g.yards_to_go = ytg;
        g
    }

    #[test]
    fn table_picks_kicks_on_fourth_down() {
        assert_eq!(call_play(&at(70, Down::Fourth, 3)), PlayType::FieldGoal);
        assert_eq!(call_play(&at(40, Down::Fourth, 3)), PlayType::Punt);
        assert_eq!(call_play(&at(40, Down::Third, 1)), PlayType::Pass);
        assert_eq!(call_play(&at(40, Down::First, 10)), PlayType::Pass);
        assert_eq!(call_play(&at(40, Down::Second, 3)), PlayType::Run);
    }

    #[test]
    fn first_snap_is_a_kickoff() {
        let mut d = Driver::new(Tuning::default());
        let mut rng = DeterministicRandom::from_seed(5);
        let play = d.step(&mut rng).unwrap();
        assert_eq!(play.play_type(), PlayType::Kickoff);
        assert_eq!(d.game.plays_run, 1);
    }

    #[test]
    fn touchdowns_are_followed_by_a_try() {
        let mut d = Driver::new(Tuning::default());
        let mut rng = DeterministicRandom::from_seed(9);
        for _ in 0..150 {
            let play = d.step(&mut rng).unwrap();
            if play.is_touchdown {
                assert_eq!(d.next, NextSnap::ExtraPoint);
                let try_play = d.step(&mut rng).unwrap();
                assert!(try_play.is_extra_point());
                assert_eq!(d.next, NextSnap::Kickoff);
                return;
            }
        }
    }
}
