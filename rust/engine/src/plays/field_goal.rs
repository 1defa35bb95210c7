//! Field goals and extra points.
//!
//! Draw order:
//! 1. bad snap; on a bad snap: yards lost (two draws), elapsed time, done
//! 2. block; on a block: recovering side and recovery yards (none on a try,
//!    the ball is dead), elapsed time, done
//! 3. make, kicker flag, elapsed time
//!
//! The pipeline leaves the ball at the line of scrimmage on a clean kick;
//! where the next series starts after a miss is decided by the state transition.

use tracing::warn;

use crate::checks::{
    BadSnapCheck, FieldGoalBlockCheck, FieldGoalMakeCheck, FlatCheck, PenaltyCheck, SkillsCheck,
    TackleContext,
};
use crate::errors::SimError;
use crate::game::OPPONENT_GOAL_LINE;
use crate::play::{FieldGoalDetails, Play, PlayKind, PlayType};
use crate::player::{top_by, with_fallback, Position};
use crate::results::{
    BadSnapYardsResult, BlockRecoverer, BlockedKickRecoveryResult, SkillsCheckResult,
};
use crate::rng::RandomSource;

use super::{finish, LiveBall, PlayContext};

pub fn resolve(
    play: &mut Play,
    ctx: &PlayContext<'_>,
    rng: &mut dyn RandomSource,
) -> Result<(), SimError> {
    if play.play_type() != PlayType::FieldGoal {
        return Err(SimError::InvalidPlayState(format!(
            "field goal pipeline given a {:?} play",
            play.play_type()
        )));
    }
    let t = ctx.tuning;
    let fg = &t.field_goals;
    let kicking = &ctx.offense;
    let defense = &ctx.defense;
    let start = play.start_field_position;
    let is_extra_point = play.is_extra_point();

    let kicker = with_fallback(kicking, &[Position::K, Position::P])
        .ok_or(SimError::MissingPlayer { role: "kicker" })?;
    if kicker.position != Position::K {
        warn!(kicker = %kicker.id, "no kicker on the field");
    }
    let holder = with_fallback(kicking, &[Position::H, Position::P, Position::QB]);
    let snapper = with_fallback(kicking, &[Position::LS, Position::C])
        .ok_or(SimError::MissingPlayer { role: "long snapper" })?;
    if snapper.position != Position::LS {
        warn!(snapper = %snapper.id, "no long snapper on the field");
    }

    let attempt_distance = if is_extra_point {
        fg.extra_point_distance
    } else {
        OPPONENT_GOAL_LINE - start + fg.snap_to_kick_distance
    };
    let mut details = FieldGoalDetails {
        kicker: Some(kicker.id),
        holder: holder.map(|p| p.id),
        attempt_distance,
        is_extra_point,
        ..FieldGoalDetails::default()
    };
    let mut ball = LiveBall::snap(ctx.team, start);

    if BadSnapCheck::new(snapper, PlayType::FieldGoal)
        .execute(rng, t)?
        .occurred
    {
        let loss = BadSnapYardsResult {
            field_position: start,
            play_type: PlayType::FieldGoal,
        }
        .execute(rng, t)?;
        let moved = ball.advance(loss);
        play.commentary.push(format!(
            "Bad snap! The holder smothers it for a loss of {}.",
            -moved
        ));
        ctx.elapsed(play, t.clock.bad_snap, rng)?;
        return wrap_up(play, details, &ball, ctx);
    }
    details.good_snap = true;

    if FieldGoalBlockCheck::new(kicker, attempt_distance, kicking, defense, true)
        .execute(rng, t)?
        .occurred
    {
        play.blocked = true;
        let rushers = ctx.rushers();
        details.blocked_by = rushers.first().map(|p| p.id);
        if is_extra_point {
            play.commentary.push(format!("{}'s try is blocked!", kicker.name));
            ctx.elapsed(play, t.clock.blocked_kick, rng)?;
            return wrap_up(play, details, &ball, ctx);
        }

        let defense_recovers =
            FlatCheck::new("blocked_field_goal_recovery", fg.blocked_defense_recovery)
                .execute(rng, t)?
                .occurred;
        if defense_recovers {
            let recoverer = top_by(
                defense,
                |p| !p.is_injured(),
                |p| p.speed as u32 + p.awareness as u32,
                1,
            )
            .into_iter()
            .next()
            .ok_or(SimError::MissingPlayer { role: "block recoverer" })?;
            let skill = (recoverer.speed as f64 + recoverer.agility as f64) / 2.0;
            let yards = BlockedKickRecoveryResult {
                play_type: PlayType::FieldGoal,
                recoverer: BlockRecoverer::RushingTeam { skill },
            }
            .execute(rng, t)?;
            details.recovered_by = Some(recoverer.id);
            ball.recover(ctx.team.opponent());
            let moved = ball.advance(yards);
            play.commentary.push(format!(
                "Blocked! {} scoops it up and returns it {} yards.",
                recoverer.name, moved
            ));
        } else {
            let loss = BlockedKickRecoveryResult {
                play_type: PlayType::FieldGoal,
                recoverer: BlockRecoverer::KickingTeam,
            }
            .execute(rng, t)?;
            details.recovered_by = holder.or(Some(kicker)).map(|p| p.id);
            let moved = ball.advance(loss);
            play.commentary.push(format!(
                "Blocked! The kicking team falls on it, loss of {}.",
                -moved
            ));
        }
        ctx.elapsed(play, t.clock.blocked_kick, rng)?;
        return wrap_up(play, details, &ball, ctx);
    }

    details.is_good = FieldGoalMakeCheck::new(kicker, attempt_distance)
        .execute(rng, t)?
        .occurred;
    let what = if is_extra_point { "extra point" } else { "field goal" };
    play.commentary.push(format!(
        "{} {}-yard {} is {}.",
        kicker.name,
        attempt_distance,
        what,
        if details.is_good { "good" } else { "no good" }
    ));
    let rushers = ctx.rushers();
    ctx.flag(play, PenaltyCheck::tackle(TackleContext::Kicker, &rushers), 0, rng)?;
    ctx.elapsed(play, t.clock.place_kick, rng)?;
    wrap_up(play, details, &ball, ctx)
}

fn wrap_up(
    play: &mut Play,
    details: FieldGoalDetails,
    ball: &LiveBall,
    ctx: &PlayContext<'_>,
) -> Result<(), SimError> {
    play.kind = PlayKind::FieldGoal(details);
    play.yards_gained = ball.net_yards(ctx.team, play.start_field_position);
    finish(play, ball);
    Ok(())
}
