//! Ball state machine logic - stroke start, settling, relocation and the end
//! of the turn.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::components::Ball;
use crate::events::{BallEvent, BallEventKind, LoadHole, SimEvent, StrokeCommand};
use crate::resources::{BallConfig, BullsEye, HoleContext};
use crate::systems::bullseye::is_within_gimme;
use crate::systems::kinematics::SimContext;
use crate::terrain::{TerrainWorld, DEFAULT_CELL_SIZE};
use crate::types::{BallState, ClubKind, Lie, StrokeParams, TerrainId};

/// Distance from the stroke start under which a relocation counts as
/// "back where the stroke began".
const REPEAT_RADIUS: f32 = 2.0;

/// Relocations near the stroke start tolerated before the ball is moved to
/// an aim point instead.
const MAX_RESET_REPEATS: u8 = 2;

/// Extra distance a relocated ball is moved past the first valid sample,
/// away from the edge of the hazard.
const RESET_STEP_IN: f32 = 0.5;

/// Starts a stroke on an idle ball.
///
/// Sets velocity, spin and strike delay, records the start point and
/// captures the shot frame used by spin forces for the rest of the stroke.
/// A putter, or a ball lying on the green, starts in `Putt`; everything else
/// starts in `Flight`.
///
/// # Arguments
/// * `ball` - Ball to strike
/// * `params` - Stroke parameters from the stroke initiator
/// * `hole` - Current hole, for the cosmetic rotation coefficient
///
/// # Returns
/// `false` if the ball was not idle and the stroke was ignored
pub fn start_stroke(ball: &mut Ball, params: &StrokeParams, hole: &HoleContext) -> bool {
    if ball.state != BallState::Idle {
        return false;
    }

    ball.velocity = params.impulse;
    ball.spin = params.spin;
    ball.delay = params.delay;
    ball.start_point = ball.position;
    ball.state = if params.club == ClubKind::Putter || ball.terrain == TerrainId::Green {
        BallState::Putt
    } else {
        BallState::Flight
    };

    let to_pin = Vec3::new(hole.pin.x - ball.position.x, 0.0, hole.pin.z - ball.position.z)
        .try_normalize()
        .unwrap_or(Vec3::X);
    ball.initial_forward_vector = Vec3::new(params.impulse.x, 0.0, params.impulse.z)
        .try_normalize()
        .unwrap_or(to_pin);
    ball.initial_side_vector = ball.initial_forward_vector.cross(Vec3::Y);

    let shot_direction = params.impulse.try_normalize().unwrap_or(ball.initial_forward_vector);
    let pin_perpendicular = Vec3::new(-to_pin.z, 0.0, to_pin.x);
    ball.rotation = pin_perpendicular.dot(shot_direction) + 0.1;

    ball.had_air = false;
    ball.check_gimme = false;
    ball.holed = false;
    ball.has_landed = false;
    ball.lie = Lie::SittingUp;
    ball.touched_triggers = 0;

    debug!(
        "Client {} stroke: {:?} from {:?}, impulse {:?}",
        ball.client, ball.state, ball.position, params.impulse
    );
    true
}

/// Brings a ball to rest and raises `Landed`.
///
/// # Arguments
/// * `ball` - Ball to stop
/// * `state` - `Paused` or `Reset`
/// * `terrain` - Terrain to record and report
/// * `config` - Simulation configuration
/// * `events` - Event buffer for the tick
pub fn stop_ball(
    ball: &mut Ball,
    state: BallState,
    terrain: TerrainId,
    config: &BallConfig,
    events: &mut Vec<SimEvent>,
) {
    ball.stop();
    ball.state = state;
    ball.terrain = terrain;
    ball.had_air = false;

    let reported = if ball.holed { TerrainId::Hole } else { terrain };
    events.push(BallEvent::new(BallEventKind::Landed, ball).with_terrain(reported).into());

    if state == BallState::Reset {
        ball.delay = config.reset_delay;
        // Held under the surface until relocated
        ball.position.y -= config.ball_radius * 2.0;
    } else {
        ball.delay = config.turn_delay;
        ball.check_gimme = terrain == TerrainId::Green
            && !ball.holed
            && config.gimme.radius_squared() > 0.0;
        ball.reset_repeats = 0;
        ball.last_reset_position = None;
    }

    debug!(
        "Client {} ball stopped: {:?} on {:?} at {:?}",
        ball.client, state, terrain, ball.position
    );
}

/// Paused tick: evaluates a deferred gimme, then ends the turn once the
/// delay has run out.
pub fn update_paused(ball: &mut Ball, ctx: SimContext, dt: f32, events: &mut Vec<SimEvent>) {
    if ball.check_gimme {
        ball.check_gimme = false;
        if ball.terrain == TerrainId::Green
            && is_within_gimme(ball.position, ctx.hole.pin, ctx.config.gimme.radius_squared())
        {
            ball.holed = true;
            events.push(BallEvent::new(BallEventKind::Gimme, ball).into());
        }
    }

    ball.delay -= dt;
    if ball.delay < 0.0 {
        finish_turn(ball, ctx, events);
    }
}

/// Reports the end of the turn and returns the ball to `Idle`.
fn finish_turn(ball: &mut Ball, ctx: SimContext, events: &mut Vec<SimEvent>) {
    let config = ctx.config;
    let in_cup = ctx.hole.pin_distance_squared(ball.position) < config.hole_radius * config.hole_radius
        && ctx
            .terrain
            .query_down(ball.position, config.terrain_ray_length)
            .is_some_and(|hit| hit.penetration > config.cup_depth);

    ball.state = BallState::Idle;
    ball.had_air = false;

    let event = if ball.holed || in_cup {
        ball.holed = true;
        BallEvent::new(BallEventKind::Holed, ball)
            .with_terrain(TerrainId::Hole)
            .at(ctx.hole.pin)
    } else {
        BallEvent::new(BallEventKind::TurnEnded, ball)
    };

    debug!(
        "Client {} turn ended: {:?} after {:.1}m",
        ball.client, event.kind, event.distance
    );
    events.push(event.into());
}

/// Reset tick: once the delay has run out, relocates the ball to playable
/// ground, raises `Foul` and pauses.
pub fn update_reset(ball: &mut Ball, ctx: SimContext, dt: f32, events: &mut Vec<SimEvent>) {
    ball.delay -= dt;
    if ball.delay >= 0.0 {
        return;
    }

    let out_of_bounds = ball.position;
    let (mut position, mut terrain) = find_drop(ball, ctx);

    if !ctx.hole.putt_from_tee {
        let near_start = position.xz().distance(ball.start_point.xz()) < REPEAT_RADIUS;
        let same_as_last = ball
            .last_reset_position
            .is_some_and(|last| last.xz().distance(position.xz()) < REPEAT_RADIUS);

        ball.reset_repeats = match (near_start, same_as_last) {
            (true, true) => ball.reset_repeats.saturating_add(1),
            (true, false) => 1,
            _ => 0,
        };
        ball.last_reset_position = Some(position);

        if ball.reset_repeats >= MAX_RESET_REPEATS {
            let aim = nearest_aim_point(ctx.hole, out_of_bounds);
            warn!(
                "Client {} keeps returning to {:?}, dropping at {:?}",
                ball.client, position, aim
            );
            (position, terrain) = drop_at(aim, ctx);
            ball.reset_repeats = 0;
            ball.last_reset_position = None;
        }
    }

    ball.position = position;
    ball.terrain = terrain;
    ball.stop();
    ball.state = BallState::Paused;
    ball.delay = ctx.config.reset_pause;
    events.push(BallEvent::new(BallEventKind::Foul, ball).into());

    debug!(
        "Client {} relocated from {:?} to {:?} on {:?}",
        ball.client, out_of_bounds, position, terrain
    );
}

/// Finds playable ground for an out-of-bounds ball.
///
/// On a putting course the ball goes back to the tee. Otherwise the line
/// from the ball back to the stroke's start point is sampled every metre
/// until rough, fairway or green is found; the ball is then moved a little
/// further in from the hazard's edge. With no valid ground on the line the
/// ball goes back to the tee.
fn find_drop(ball: &Ball, ctx: SimContext) -> (Vec3, TerrainId) {
    if ctx.hole.putt_from_tee {
        return drop_at(ctx.hole.tee, ctx);
    }

    let from = ball.position.xz();
    let to = ball.start_point.xz();
    let line = to - from;
    let length = line.length();

    if length >= 1.0 {
        let direction = line / length;
        let steps = length.floor() as u32;

        for i in 1..=steps {
            let distance = i as f32;
            let Some(hit) = sample_ground(from + direction * distance, ball.start_point.y, ctx) else {
                continue;
            };
            if !hit.terrain.is_valid_drop() {
                continue;
            }

            let inner_distance = distance + RESET_STEP_IN;
            if inner_distance <= length {
                if let Some(inner) = sample_ground(from + direction * inner_distance, ball.start_point.y, ctx)
                    .filter(|inner| inner.terrain.is_valid_drop())
                {
                    return (inner.intersection, inner.terrain);
                }
            }
            return (hit.intersection, hit.terrain);
        }
    }

    warn!(
        "Client {} found no ground between {:?} and {:?}, returning to tee",
        ball.client, ball.position, ball.start_point
    );
    drop_at(ctx.hole.tee, ctx)
}

fn sample_ground(
    point: Vec2,
    height: f32,
    ctx: SimContext,
) -> Option<crate::types::TerrainQueryResult> {
    ctx.terrain.query_down(
        Vec3::new(point.x, height, point.y),
        ctx.config.reset_ray_length,
    )
}

/// Places a ball on the ground at `point`, or at `point` itself on fairway
/// when there is no ground.
fn drop_at(point: Vec3, ctx: SimContext) -> (Vec3, TerrainId) {
    match sample_ground(point.xz(), point.y, ctx) {
        Some(hit) => (hit.intersection, hit.terrain),
        None => (point, TerrainId::Fairway),
    }
}

/// The aim point (target, subtarget or tee) nearest to `position`.
fn nearest_aim_point(hole: &HoleContext, position: Vec3) -> Vec3 {
    [hole.target, hole.subtarget, hole.tee]
        .into_iter()
        .min_by(|a, b| {
            a.xz()
                .distance_squared(position.xz())
                .total_cmp(&b.xz().distance_squared(position.xz()))
        })
        .unwrap_or(hole.tee)
}

/// Load a new hole: rebuild the collision world and replace the hole context.
///
/// A mesh that fails validation is reported and the previous hole stays loaded.
///
/// # Arguments
/// * `commands` - Bevy Commands to insert the new collision world
/// * `requests` - Message reader for hole loads
/// * `config` - Simulation configuration
/// * `hole` - Hole context to replace
/// * `bullseye` - Cleared for the new hole
pub fn apply_hole_data(
    mut commands: Commands,
    mut requests: MessageReader<LoadHole>,
    config: Res<BallConfig>,
    mut hole: ResMut<HoleContext>,
    mut bullseye: ResMut<BullsEye>,
) {
    for request in requests.read() {
        match TerrainWorld::new(&request.mesh, DEFAULT_CELL_SIZE) {
            Ok(world) => {
                let mut context = request.hole.clone();
                context.detect_putt_from_tee(&world, config.terrain_ray_length);
                info!(
                    "Loaded hole: pin {:?}, tee {:?}, {} triangles{}",
                    context.pin,
                    context.tee,
                    world.triangle_count(),
                    if context.putt_from_tee { " (putting)" } else { "" }
                );

                *hole = context;
                *bullseye = BullsEye::default();
                commands.insert_resource(world);
            }
            Err(err) => warn!("Rejected hole mesh, keeping the previous hole: {err}"),
        }
    }
}

/// Apply stroke commands to their balls.
///
/// # Arguments
/// * `strokes` - Message reader for stroke commands
/// * `hole` - Current hole
/// * `balls` - Query for ball components
pub fn handle_stroke_commands(
    mut strokes: MessageReader<StrokeCommand>,
    hole: Res<HoleContext>,
    mut balls: Query<&mut Ball>,
) {
    for command in strokes.read() {
        let Ok(mut ball) = balls.get_mut(command.entity) else {
            warn!("Stroke for unknown ball {:?}", command.entity);
            continue;
        };
        if !start_stroke(&mut ball, &command.params, &hole) {
            debug!(
                "Ignoring stroke for {:?}: ball is {:?}",
                command.entity, ball.state
            );
        }
    }
}
