//! Punts, including bad snaps and blocks. Spots are in the punting team's
//! frame until the receiving team secures the ball.
//!
//! Draw order:
//! 1. bad snap; on a bad snap: yards lost (two draws), elapsed time, done
//! 2. block; on a block: recovering side, recovery yards, elapsed time, done
//! 3. distance, hang time, kicker flag
//! 4. a punt into the end zone is a touchback; otherwise out of bounds, downed
//! 5. fair catch, muff; on a muff: recovering side, scramble yards when the
//!    receivers keep it
//! 6. return yards, tackle flag, injuries, fumble chain
//! 7. elapsed time

use tracing::warn;

use crate::checks::{
    BadSnapCheck, FairCatchCheck, FlatCheck, FumbleContext, PenaltyCheck, PuntBlockCheck,
    PuntDownedCheck, PuntMuffCheck, PuntOutOfBoundsCheck, SkillsCheck, TackleContext,
};
use crate::errors::SimError;
use crate::game::OPPONENT_GOAL_LINE;
use crate::play::{KickDetails, Play, PlayKind, PlayType};
use crate::player::{top_by, with_fallback, Player, Position};
use crate::results::{
    BadSnapYardsResult, BlockRecoverer, BlockedKickRecoveryResult, ElapsedTimeResult,
    MuffRecoveryYardsResult, PuntDistanceResult, PuntHangTimeResult, PuntReturnResult,
    SkillsCheckResult,
};
use crate::rng::RandomSource;

use super::{finish, Contact, Leg, LiveBall, PlayContext};

fn punt_returner(receiving: &[Player]) -> Option<&Player> {
    top_by(
        receiving,
        |p| p.position.is_return_unit() && !p.is_injured(),
        |p| p.speed as u32 + p.catching as u32 + p.agility as u32,
        1,
    )
    .into_iter()
    .next()
}

fn fastest(players: &[Player]) -> Option<&Player> {
    top_by(players, |p| !p.is_injured(), |p| p.speed as u32, 1)
        .into_iter()
        .next()
}

pub fn resolve(
    play: &mut Play,
    ctx: &PlayContext<'_>,
    rng: &mut dyn RandomSource,
) -> Result<(), SimError> {
    if play.play_type() != PlayType::Punt {
        return Err(SimError::InvalidPlayState(format!(
            "punt pipeline given a {:?} play",
            play.play_type()
        )));
    }
    let t = ctx.tuning;
    let kicking = &ctx.offense;
    let receiving = &ctx.defense;
    let receiving_team = ctx.team.opponent();
    let start = play.start_field_position;

    let punter = with_fallback(kicking, &[Position::P, Position::K])
        .ok_or(SimError::MissingPlayer { role: "punter" })?;
    if punter.position != Position::P {
        warn!(punter = %punter.id, "no punter on the field");
    }
    let snapper = with_fallback(kicking, &[Position::LS, Position::C])
        .ok_or(SimError::MissingPlayer { role: "long snapper" })?;
    if snapper.position != Position::LS {
        warn!(snapper = %snapper.id, "no long snapper on the field");
    }
    let mut details = KickDetails {
        kicker: Some(punter.id),
        ..KickDetails::default()
    };
    let mut ball = LiveBall::snap(ctx.team, start);

    if BadSnapCheck::new(snapper, PlayType::Punt).execute(rng, t)?.occurred {
        let loss = BadSnapYardsResult {
            field_position: start,
            play_type: PlayType::Punt,
        }
        .execute(rng, t)?;
        let moved = ball.advance(loss);
        play.commentary.push(format!(
            "Bad snap! {} chases it down for a loss of {}.",
            punter.name, -moved
        ));
        ctx.elapsed(play, t.clock.bad_snap, rng)?;
        return wrap_up(play, details, &ball, ctx);
    }
    details.good_snap = true;

    if PuntBlockCheck::new(punter, kicking, receiving, true)
        .execute(rng, t)?
        .occurred
    {
        play.blocked = true;
        let blocker = ctx.rushers().first().map(|p| p.id);
        details.blocked_by = blocker;
        let kept = FlatCheck::new("blocked_punt_recovery", t.punts.blocked_offense_recovery)
            .execute(rng, t)?
            .occurred;
        if kept {
            details.recovered_by = fastest(kicking).map(|p| p.id);
            let loss = BlockedKickRecoveryResult {
                play_type: PlayType::Punt,
                recoverer: BlockRecoverer::KickingTeam,
            }
            .execute(rng, t)?;
            let moved = ball.advance(loss);
            play.commentary.push(format!(
                "Blocked! The punting team falls on it, loss of {}.",
                -moved
            ));
        } else {
            details.recovered_by = blocker.or_else(|| fastest(receiving).map(|p| p.id));
            let bounce = BlockedKickRecoveryResult {
                play_type: PlayType::Punt,
                recoverer: BlockRecoverer::RushingTeam { skill: 0.0 },
            }
            .execute(rng, t)?;
            ball.loose(bounce);
            ball.recover(receiving_team);
            play.commentary.push(format!(
                "Blocked! {} recovers for the return team.",
                details.recovered_by.map(|id| ctx.name(id)).unwrap_or("someone")
            ));
        }
        ctx.elapsed(play, t.clock.blocked_kick, rng)?;
        return wrap_up(play, details, &ball, ctx);
    }

    let distance = PuntDistanceResult {
        kicking: punter.kicking as f64,
        field_position: start,
    }
    .execute(rng, t)?;
    let hang_time = PuntHangTimeResult { distance }.execute(rng, t)?;
    details.kick_distance = distance;
    details.hang_time = Some(hang_time);
    let rushers = ctx.rushers();
    ctx.flag(play, PenaltyCheck::tackle(TackleContext::Kicker, &rushers), 0, rng)?;

    let landing = start + distance;
    let catch_spot = OPPONENT_GOAL_LINE - landing;
    let quiet = ElapsedTimeResult::after_hang(hang_time, t.clock.punt_dead_ball);

    if landing >= OPPONENT_GOAL_LINE {
        details.touchback = true;
        play.commentary.push(format!(
            "{} punts {} yards into the end zone. Touchback.",
            punter.name, distance
        ));
        ctx.elapsed(play, quiet, rng)?;
        let ball = LiveBall::caught(receiving_team, t.punts.touchback_spot);
        return wrap_up(play, details, &ball, ctx);
    }

    if (PuntOutOfBoundsCheck { landing }).execute(rng, t)?.occurred {
        details.out_of_bounds = true;
        play.commentary.push(format!(
            "{} punts {} yards, out of bounds.",
            punter.name, distance
        ));
        ctx.elapsed(play, quiet, rng)?;
        let ball = LiveBall::caught(receiving_team, catch_spot);
        return wrap_up(play, details, &ball, ctx);
    }

    let returner = punt_returner(receiving);
    let downed = PuntDownedCheck { landing, hang_time }
        .execute(rng, t)?
        .occurred;
    let Some(returner) = returner.filter(|_| !downed) else {
        details.downed = true;
        play.commentary.push(format!(
            "{} punts {} yards, downed at the {}.",
            punter.name, distance, catch_spot
        ));
        ctx.elapsed(play, ElapsedTimeResult::after_hang(hang_time, t.clock.punt_downed), rng)?;
        let ball = LiveBall::caught(receiving_team, catch_spot);
        return wrap_up(play, details, &ball, ctx);
    };
    details.returner = Some(returner.id);

    if (FairCatchCheck { hang_time, landing }).execute(rng, t)?.occurred {
        details.fair_catch = true;
        play.commentary.push(format!(
            "{} punts {} yards. Fair catch by {}.",
            punter.name, distance, returner.name
        ));
        ctx.elapsed(play, quiet, rng)?;
        let ball = LiveBall::caught(receiving_team, catch_spot);
        return wrap_up(play, details, &ball, ctx);
    }

    if PuntMuffCheck::new(returner, hang_time).execute(rng, t)?.occurred {
        details.muffed_catch = true;
        let kept = FlatCheck::new("punt_muff_recovery", t.punts.muff_defense_recovery)
            .execute(rng, t)?
            .occurred;
        let ball = if kept {
            let scramble = MuffRecoveryYardsResult.execute(rng, t)?;
            details.recovered_by = Some(returner.id);
            play.commentary.push(format!(
                "{} muffs the punt but falls on it.",
                returner.name
            ));
            let mut ball = LiveBall::caught(receiving_team, catch_spot);
            ball.advance(scramble);
            ball
        } else {
            let cover = top_by(
                kicking,
                |p| p.position.is_coverage_unit(),
                |p| p.speed as u32,
                1,
            );
            details.recovered_by = cover.first().map(|p| p.id);
            play.commentary.push(format!(
                "{} muffs the punt! The punting team recovers!",
                returner.name
            ));
            LiveBall::snap(ctx.team, landing)
        };
        ctx.elapsed(play, ElapsedTimeResult::after_hang(hang_time, t.clock.punt_muff), rng)?;
        return wrap_up(play, details, &ball, ctx);
    }

    let yards = PuntReturnResult::new(returner, kicking, hang_time).execute(rng, t)?;
    let mut ball = LiveBall::caught(receiving_team, catch_spot);
    let moved = ball.advance(yards);
    play.commentary.push(format!(
        "{} punts {} yards. {} returns it {} yards.",
        punter.name, distance, returner.name, moved
    ));

    let tacklers = ctx.tacklers(ctx.team);
    ctx.flag(play, PenaltyCheck::tackle(TackleContext::Returner, &tacklers), 0, rng)?;
    ctx.check_injuries(play, Some(returner), &tacklers, Contact::after_gain(moved, t), rng)?;

    let legs = ctx.carry_on(
        play,
        &mut ball,
        Leg::new(returner.id, receiving_team, moved),
        FumbleContext::Return,
        None,
        rng,
    )?;
    ctx.elapsed(play, ElapsedTimeResult::after_hang(hang_time, t.clock.punt_return), rng)?;
    details.return_segments = legs.into_iter().map(|l| l.into_return_segment()).collect();
    wrap_up(play, details, &ball, ctx)
}

fn wrap_up(
    play: &mut Play,
    details: KickDetails,
    ball: &LiveBall,
    ctx: &PlayContext<'_>,
) -> Result<(), SimError> {
    play.kind = PlayKind::Punt(details);
    play.yards_gained = ball.net_yards(ctx.team, play.start_field_position);
    finish(play, ball);
    Ok(())
}
