mod common;

use common::{defense, offense, Driver};
use gridiron_engine::checks::{
    BadSnapCheck, BreakawayCheck, FieldGoalBlockCheck, FieldGoalMakeCheck, FumbleCheck,
    FumbleContext, InjuryCheck, InterceptionCheck, PassCompletionCheck, PassProtectionCheck,
    PuntBlockCheck, QbPressureCheck, RunBlockingCheck, SkillsCheck, TackleBreakCheck,
};
use gridiron_engine::game::Possession;
use gridiron_engine::play::{PlayKind, PlayType};
use gridiron_engine::play_result::NextSnap;
use gridiron_engine::player::Player;
use gridiron_engine::replay::ReplayRandom;
use gridiron_engine::rng::DeterministicRandom;
use gridiron_engine::tuning::Tuning;
use proptest::prelude::*;

fn rated(mut players: Vec<Player>, ratings: &[u8]) -> Vec<Player> {
    for (p, r) in players.iter_mut().zip(ratings.iter().cycle()) {
        p.speed = *r;
        p.strength = r.wrapping_mul(3) % 101;
        p.agility = r.wrapping_mul(7) % 101;
        p.awareness = r.wrapping_mul(11) % 101;
        p.blocking = r.wrapping_mul(13) % 101;
        p.tackling = r.wrapping_mul(17) % 101;
        p.catching = r.wrapping_mul(19) % 101;
        p.passing = r.wrapping_mul(23) % 101;
        p.rushing = r.wrapping_mul(29) % 101;
        p.coverage = r.wrapping_mul(31) % 101;
        p.kicking = r.wrapping_mul(37) % 101;
        p.fragility = r.wrapping_mul(41) % 101;
    }
    players
}

proptest! {
    #[test]
    fn every_check_resolves_to_a_probability(
        off_ratings in prop::collection::vec(0u8..=100, 11),
        def_ratings in prop::collection::vec(0u8..=100, 11),
        distance in 10i32..75,
        seed in any::<u64>(),
    ) {
        let t = Tuning::default();
        let off = rated(offense(Possession::Home), &off_ratings);
        let def = rated(defense(Possession::Away), &def_ratings);
        let (qb, rb, wr) = (&off[0], &off[1], &off[2]);
        let checks: Vec<Box<dyn SkillsCheck>> = vec![
            Box::new(RunBlockingCheck::new(&off, &def)),
            Box::new(TackleBreakCheck::new(rb, &def)),
            Box::new(BreakawayCheck::new(rb)),
            Box::new(FumbleCheck::new(rb, 3, FumbleContext::Sack)),
            Box::new(PassProtectionCheck::new(&off, &def)),
            Box::new(QbPressureCheck::new(&off, &def)),
            Box::new(PassCompletionCheck::new(qb, wr, &def, true)),
            Box::new(InterceptionCheck::new(qb, &def, false)),
            Box::new(FieldGoalMakeCheck::new(qb, distance)),
            Box::new(FieldGoalBlockCheck::new(qb, distance, &off, &def, false)),
            Box::new(PuntBlockCheck::new(qb, &off, &def, false)),
            Box::new(BadSnapCheck::new(&off[6], PlayType::Punt)),
            Box::new(InjuryCheck::new(rb, PlayType::Kickoff).sack(true).defenders(4).big_play(true)),
        ];
        let mut rng = DeterministicRandom::from_seed(seed);
        for check in &checks {
            let out = check.execute(&mut rng, &t).unwrap();
            prop_assert!((0.0..=1.0).contains(&out.probability), "{}", check.name());
            prop_assert_eq!(out.occurred, out.roll < out.probability);
        }
    }

    #[test]
    fn simulated_games_keep_the_ball_on_the_field(seed in any::<u64>()) {
        let mut rng = DeterministicRandom::from_seed(seed);
        let mut driver = Driver::new(Tuning::default());
        for _ in 0..120 {
            let before = (
                driver.game.score_of(Possession::Home),
                driver.game.score_of(Possession::Away),
            );
            let play = driver.step(&mut rng).unwrap();
            let g = &driver.game;
            prop_assert!((0..=100).contains(&play.end_field_position));
            prop_assert!((0..=100).contains(&g.field_position));
            prop_assert!(g.yards_to_go >= 1);
            prop_assert!(play.elapsed_time >= 0.0);
            if g.field_position == 100 {
                // scored: the try is next, or the kickoff once the try is done
                prop_assert_ne!(driver.next, NextSnap::Scrimmage);
            }
            if g.field_position == 0 {
                prop_assert_eq!(driver.next, NextSnap::Kickoff);
            }

            let gained = |team: Possession| {
                let was = match team {
                    Possession::Home => before.0,
                    Possession::Away => before.1,
                };
                g.score_of(team) - was
            };
            let good_kick = match &play.kind {
                PlayKind::FieldGoal(fg) if fg.is_good && fg.is_extra_point => Some(1),
                PlayKind::FieldGoal(fg) if fg.is_good => Some(3),
                _ => None,
            };
            if play.is_touchdown {
                let scorer = play.end_possession;
                prop_assert_eq!(play.end_field_position, 100);
                prop_assert_eq!(gained(scorer), 6);
                prop_assert_eq!(gained(scorer.opponent()), 0);
                prop_assert_eq!((g.possession, g.field_position), (scorer, 100));
            } else if play.is_safety {
                let conceding = play.end_possession;
                prop_assert_eq!(play.end_field_position, 0);
                prop_assert_eq!(gained(conceding.opponent()), 2);
                prop_assert_eq!(gained(conceding), 0);
                prop_assert_eq!((g.possession, g.field_position), (conceding, 0));
            } else if let Some(points) = good_kick {
                prop_assert_eq!(gained(play.possession), points);
                prop_assert_eq!(gained(play.possession.opponent()), 0);
            } else {
                prop_assert_eq!(before, (g.home_score, g.away_score));
            }
        }
    }

    #[test]
    fn recording_never_changes_the_outcome(seed in any::<u64>()) {
        let mut plain = DeterministicRandom::from_seed(seed);
        let mut recorder = ReplayRandom::record(seed);
        let mut a = Driver::new(Tuning::default());
        let mut b = Driver::new(Tuning::default());
        for _ in 0..25 {
            let x = a.step(&mut plain).unwrap();
            let y = b.step(&mut recorder).unwrap();
            prop_assert_eq!(x, y);
        }
        prop_assert_eq!(a.game, b.game);
    }
}
