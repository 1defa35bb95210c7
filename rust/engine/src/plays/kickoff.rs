//! Kickoffs and onside kicks. Spots are in the kicking team's frame until the
//! receiving team secures the ball.
//!
//! Draw order:
//! 1. onside attempt, only when the kicking team trails by enough; an onside
//!    kick then draws its travel (`next_range`), the recovery and elapsed time
//! 2. distance; a kick reaching the end zone is a touchback and skips to
//!    elapsed time; otherwise out of bounds
//! 3. muff; on a muff: recovering side, scramble yards when the receivers keep it
//! 4. fair catch
//! 5. return yards, return blocking flag, tackle flag, injuries, fumble chain
//! 6. elapsed time

use tracing::warn;

use crate::checks::{
    FairCatchCheck, FlatCheck, FumbleContext, KickoffMuffCheck, KickoffOutOfBoundsCheck,
    OnsideAttemptCheck, OnsideRecoveryCheck, PenaltyCheck, SkillsCheck, TackleContext,
};
use crate::errors::SimError;
use crate::game::{Game, OPPONENT_GOAL_LINE, OWN_GOAL_LINE};
use crate::play::{KickDetails, Play, PlayKind, PlayType};
use crate::player::{top_by, with_fallback, Player, Position};
use crate::results::{
    KickoffDistanceResult, KickoffReturnResult, MuffRecoveryYardsResult, SkillsCheckResult,
};
use crate::rng::RandomSource;

use super::{finish, Contact, Leg, LiveBall, PlayContext};

/// Best open-field runner among the players who field kicks.
fn kick_returner(receiving: &[Player]) -> Option<&Player> {
    top_by(
        receiving,
        |p| p.position.is_return_unit() && !p.is_injured(),
        |p| p.speed as u32 + p.agility as u32,
        1,
    )
    .into_iter()
    .next()
    .or_else(|| receiving.first())
}

pub fn resolve(
    play: &mut Play,
    game: &Game,
    ctx: &PlayContext<'_>,
    rng: &mut dyn RandomSource,
) -> Result<(), SimError> {
    if play.play_type() != PlayType::Kickoff {
        return Err(SimError::InvalidPlayState(format!(
            "kickoff pipeline given a {:?} play",
            play.play_type()
        )));
    }
    let t = ctx.tuning;
    let k = &t.kickoffs;
    let kicking = &ctx.offense;
    let receiving = &ctx.defense;
    let receiving_team = ctx.team.opponent();

    let kicker = with_fallback(kicking, &[Position::K, Position::P])
        .ok_or(SimError::MissingPlayer { role: "kicker" })?;
    if kicker.position != Position::K {
        warn!(kicker = %kicker.id, "no kicker on the field");
    }
    // The ball sits at zero only right after a safety.
    let spot = if play.start_field_position == OWN_GOAL_LINE {
        k.safety_kick_spot
    } else {
        k.kickoff_spot
    };
    play.start_field_position = spot;
    let mut details = KickDetails {
        kicker: Some(kicker.id),
        good_snap: true,
        ..KickDetails::default()
    };

    let onside = OnsideAttemptCheck {
        deficit: game.deficit_of(ctx.team),
    };
    if onside.is_eligible(t) && onside.execute(rng, t)?.occurred {
        let travel = rng.next_range(k.onside_min_travel, k.onside_max_travel)?;
        let recovered = OnsideRecoveryCheck {
            kicking: kicker.kicking as f64,
        }
        .execute(rng, t)?
        .occurred;
        let landing = (spot + travel).min(OPPONENT_GOAL_LINE - 1);
        details.onside_kick = true;
        details.onside_recovered = recovered;
        details.kick_distance = travel;
        let ball = if recovered {
            let hands = top_by(kicking, |_| true, |p| p.speed as u32 + p.agility as u32, 1);
            details.recovered_by = hands.first().map(|p| p.id);
            play.commentary.push(format!(
                "{} tries the onside kick... recovered by the kicking team!",
                kicker.name
            ));
            LiveBall::snap(ctx.team, landing)
        } else {
            let hands = top_by(receiving, |_| true, |p| p.speed as u32, 1);
            details.recovered_by = hands.first().map(|p| p.id);
            play.commentary.push(format!(
                "{} tries the onside kick; the receiving team covers it.",
                kicker.name
            ));
            LiveBall::caught(receiving_team, OPPONENT_GOAL_LINE - landing)
        };
        ctx.elapsed(play, t.clock.onside, rng)?;
        return wrap_up(play, details, &ball, ctx);
    }

    let distance = KickoffDistanceResult::new(kicker).execute(rng, t)?;
    let landing = spot + distance;
    details.kick_distance = distance;

    if landing >= OPPONENT_GOAL_LINE {
        details.touchback = true;
        play.commentary.push(format!(
            "{} kicks {} yards into the end zone. Touchback.",
            kicker.name, distance
        ));
        ctx.elapsed(play, t.clock.place_kick, rng)?;
        let ball = LiveBall::caught(receiving_team, k.touchback_spot);
        return wrap_up(play, details, &ball, ctx);
    }

    if (KickoffOutOfBoundsCheck { landing }).execute(rng, t)?.occurred {
        details.out_of_bounds = true;
        play.commentary.push(format!(
            "{} kicks {} yards, out of bounds.",
            kicker.name, distance
        ));
        ctx.elapsed(play, t.clock.place_kick, rng)?;
        let ball = LiveBall::caught(receiving_team, k.out_of_bounds_spot);
        return wrap_up(play, details, &ball, ctx);
    }

    let returner = kick_returner(receiving)
        .ok_or(SimError::MissingPlayer { role: "kick returner" })?;
    details.returner = Some(returner.id);
    let catch_spot = OPPONENT_GOAL_LINE - landing;

    if KickoffMuffCheck::new(returner, landing).execute(rng, t)?.occurred {
        details.muffed_catch = true;
        let kept = FlatCheck::new("kickoff_muff_recovery", k.muff_receiving_team_recovery)
            .execute(rng, t)?
            .occurred;
        let ball = if kept {
            let scramble = MuffRecoveryYardsResult.execute(rng, t)?;
            details.recovered_by = Some(returner.id);
            play.commentary.push(format!(
                "{} muffs the kick but falls on it.",
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
                "{} muffs the kick! The kicking team recovers!",
                returner.name
            ));
            LiveBall::snap(ctx.team, landing)
        };
        ctx.elapsed(play, t.clock.kick_return, rng)?;
        return wrap_up(play, details, &ball, ctx);
    }

    let hang_time = k.hang_time_base + distance as f64 / k.hang_time_yards_per_second;
    details.hang_time = Some(hang_time);
    if (FairCatchCheck { hang_time, landing }).execute(rng, t)?.occurred {
        details.fair_catch = true;
        play.commentary.push(format!(
            "{} kicks {} yards. Fair catch by {}.",
            kicker.name, distance, returner.name
        ));
        ctx.elapsed(play, t.clock.place_kick, rng)?;
        let ball = LiveBall::caught(receiving_team, catch_spot);
        return wrap_up(play, details, &ball, ctx);
    }

    let yards = KickoffReturnResult::new(returner).execute(rng, t)?;
    let mut ball = LiveBall::caught(receiving_team, catch_spot);
    let moved = ball.advance(yards);
    play.commentary.push(format!(
        "{} kicks {} yards. {} returns it {} yards.",
        kicker.name, distance, returner.name, moved
    ));

    ctx.flag(play, PenaltyCheck::blocking(receiving, kicking, false, true), 0, rng)?;
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
    ctx.elapsed(play, t.clock.kick_return, rng)?;
    details.return_segments = legs.into_iter().map(|l| l.into_return_segment()).collect();
    wrap_up(play, details, &ball, ctx)
}

fn wrap_up(
    play: &mut Play,
    details: KickDetails,
    ball: &LiveBall,
    ctx: &PlayContext<'_>,
) -> Result<(), SimError> {
    play.kind = PlayKind::Kickoff(details);
    play.yards_gained = ball.net_yards(ctx.team, play.start_field_position);
    finish(play, ball);
    Ok(())
}
