//! Kinematics - per-tick integration of flight, roll and putt.

use bevy::prelude::*;

#[cfg(feature = "avian")]
use avian3d::prelude::SpatialQuery;

use crate::components::Ball;
#[cfg(feature = "avian")]
use crate::components::TerrainSurface;
use crate::events::{SimEvent, SimEventWriters};
use crate::resources::{BallConfig, BullsEye, HoleContext, WindState};
use crate::systems::collision;
use crate::systems::logic::{self, stop_ball};
use crate::systems::surface::{self, RollingResponse, TerrainResponse};
use crate::terrain::TerrainWorld;
use crate::types::{BallState, SimulationMode, TerrainId, TerrainQuery, TerrainQueryResult};

/// Everything a ball tick reads besides the ball itself.
///
/// # Fields
/// * `config` - Simulation configuration
/// * `hole` - Current hole
/// * `wind` - Wind at this tick
/// * `bullseye` - Minigame target
/// * `terrain` - Collision world
/// * `mode` - Which side effects the tick may raise
#[derive(Clone, Copy)]
pub struct SimContext<'a> {
    pub config: &'a BallConfig,
    pub hole: &'a HoleContext,
    pub wind: &'a WindState,
    pub bullseye: &'a BullsEye,
    pub terrain: &'a dyn TerrainQuery,
    pub mode: SimulationMode,
}

impl SimContext<'_> {
    /// Wind acceleration, or none if the wind state is corrupt.
    fn wind_force(&self) -> Vec3 {
        let force = self.wind.force();
        if force.is_finite() { force } else { Vec3::ZERO }
    }
}

/// Advances one ball by `dt` seconds.
///
/// Dispatches on the ball state and collects any events raised into
/// `events`. A non-positive or non-finite `dt` is ignored.
///
/// # Arguments
/// * `ball` - Ball to advance
/// * `ctx` - Simulation context
/// * `dt` - Time step in seconds
/// * `events` - Event buffer for the tick
pub fn advance(ball: &mut Ball, ctx: SimContext, dt: f32, events: &mut Vec<SimEvent>) {
    if !(dt > 0.0) || !dt.is_finite() {
        return;
    }

    match ball.state {
        BallState::Idle => ball.had_air = false,
        BallState::Flight => update_flight(ball, ctx, dt, events),
        BallState::Roll => update_roll(ball, ctx, dt, events),
        BallState::Putt => update_putt(ball, ctx, dt, events),
        BallState::Paused => logic::update_paused(ball, ctx, dt, events),
        BallState::Reset => logic::update_reset(ball, ctx, dt, events),
    }

    if !ball.is_finite() {
        warn!(
            "Client {} ball went non-finite in {:?}, stopping it",
            ball.client, ball.state
        );
        ball.stop();
        if !ball.position.is_finite() {
            ball.position = ball.start_point;
        }
    }
}

/// Flight tick: gravity, wind and side spin, integrated in sub-steps with a
/// flagpole and terrain check after each.
fn update_flight(ball: &mut Ball, ctx: SimContext, dt: f32, events: &mut Vec<SimEvent>) {
    ball.had_air = false;
    ball.delay -= dt;
    if ball.delay > 0.0 {
        return;
    }

    let config = ctx.config;
    let steps = config.substeps.max(1);
    let step = dt / steps as f32;
    let wind = ctx.wind_force() * config.wind_effect;

    for _ in 0..steps {
        let side_spin = ball.initial_side_vector * ball.spin.x * config.side_spin_force;
        ball.velocity += (config.gravity_vector() + wind + side_spin) * step;
        ball.position += ball.velocity * step;

        collision::check_flag_pole(ball, ctx, events);
        collision::check_terrain(ball, ctx, events);
        if ball.state != BallState::Flight {
            break;
        }
    }
}

/// Roll tick on fairway, rough or stone.
fn update_roll(ball: &mut Ball, ctx: SimContext, dt: f32, events: &mut Vec<SimEvent>) {
    ball.delay -= dt;
    if ball.delay > 0.0 {
        return;
    }

    let config = ctx.config;
    let Some(hit) = ctx.terrain.query_down(ball.position, config.terrain_ray_length) else {
        stop_ball(ball, BallState::Reset, TerrainId::Water, config, events);
        return;
    };
    ball.terrain = hit.terrain;

    let response = surface::response(hit.terrain);
    match response.rolling {
        RollingResponse::Stop => {
            let (state, terrain) = response.stop_state(hit.normal, config.rest_normal_y);
            stop_ball(ball, state, terrain, config, events);
            return;
        }
        RollingResponse::Putt => {
            ball.state = BallState::Putt;
            ball.delay = 0.0;
            return;
        }
        RollingResponse::Roll => {}
    }

    let elapsed = ball.state_elapsed();
    let fade = (1.0 - elapsed / config.roll_timeout).clamp(0.0, 1.0);

    // Top spin drives the ball on, back spin pulls it back, both wear off
    ball.velocity += ball.initial_forward_vector * ball.spin.y * config.top_spin_roll * dt;
    ball.spin *= (1.0 - 2.0 * dt).max(0.0);

    ground_contact(ball, &hit, config, dt);
    ball.velocity += response.slope_acceleration(hit.normal, config.gravity, fade) * dt;
    apply_friction(ball, response, hit.normal, config, dt);
    ball.position += ball.velocity * dt;

    let settled = ball.velocity.length_squared() < config.stop_speed_squared
        && (hit.normal.y >= config.rest_normal_y || fade <= 0.0);
    if settled || elapsed >= config.roll_timeout || hit.penetration > config.ball_radius * 2.5 {
        let (state, terrain) = response.stop_state(hit.normal, config.rest_normal_y);
        stop_ball(ball, state, terrain, config, events);
    }
}

/// Whether a putt has dropped into the cup.
///
/// A ball over the cup counts once it has sunk below the cup depth. A slow
/// ball dead on the pin counts straight away.
///
/// # Arguments
/// * `pin_distance_squared` - Horizontal squared distance to the pin
/// * `penetration` - Depth of the ball below the surface
/// * `velocity` - Ball velocity
/// * `config` - Simulation configuration
pub fn is_captured(
    pin_distance_squared: f32,
    penetration: f32,
    velocity: Vec3,
    config: &BallConfig,
) -> bool {
    let over_cup = pin_distance_squared < config.hole_radius * config.hole_radius;
    let dead_centre = config.ball_radius * 0.5;
    (over_cup && penetration > config.cup_depth)
        || (pin_distance_squared < dead_centre * dead_centre && velocity.length_squared() < 1.0)
}

/// Putt tick on the green.
///
/// Besides the usual rolling forces a putt is drawn towards a nearby cup,
/// drops into it when over it, can lip out when it leaves the cup's edge
/// below the surface, and drifts slightly with the wind.
fn update_putt(ball: &mut Ball, ctx: SimContext, dt: f32, events: &mut Vec<SimEvent>) {
    ball.delay -= dt;
    if ball.delay > 0.0 {
        return;
    }

    let config = ctx.config;
    let Some(hit) = ctx.terrain.query_down(ball.position, config.terrain_ray_length) else {
        stop_ball(ball, BallState::Reset, TerrainId::Water, config, events);
        return;
    };
    ball.terrain = hit.terrain;

    let response = surface::response(hit.terrain);
    match response.rolling {
        RollingResponse::Stop => {
            let (state, terrain) = response.stop_state(hit.normal, config.rest_normal_y);
            stop_ball(ball, state, terrain, config, events);
            return;
        }
        RollingResponse::Roll => {
            ball.state = BallState::Roll;
            return;
        }
        RollingResponse::Putt => {}
    }

    let pin = ctx.hole.pin;
    let to_pin = Vec3::new(pin.x - ball.position.x, 0.0, pin.z - ball.position.z);
    let pin_distance_squared = to_pin.length_squared();
    if is_captured(pin_distance_squared, hit.penetration, ball.velocity, config) {
        ball.holed = true;
        stop_ball(ball, BallState::Paused, TerrainId::Hole, config, events);
        return;
    }

    let pin_distance = pin_distance_squared.sqrt();
    if !ball.had_air && pin_distance < config.attraction_radius && pin_distance > f32::EPSILON {
        let pull = config.attraction_force * (1.0 - pin_distance / config.attraction_radius);
        ball.velocity += to_pin / pin_distance * pull * dt;
    }

    let over_cup = pin_distance_squared < config.hole_radius * config.hole_radius;
    if over_cup {
        // Fast balls skim over the cup
        let drop = 1.0 - (ball.velocity.length_squared() / 2.1).min(1.0);
        ball.velocity += config.gravity_vector() * drop * 2.0 * dt;
        ball.had_air = true;
    } else {
        if ball.had_air {
            if hit.penetration > config.ball_radius * 0.5 {
                // Caught the far wall of the cup
                ball.velocity.x = -ball.velocity.x;
                ball.velocity.z = -ball.velocity.z;
            } else {
                // Lipped out
                ball.velocity *= 0.7;
                ball.velocity.y = ball.velocity.length_squared() * 0.4;
                ball.position.y += hit.penetration.max(0.0);
            }
        } else {
            ground_contact(ball, &hit, config, dt);
        }
        ball.had_air = false;
    }

    let elapsed = ball.state_elapsed();
    let fade = (1.0 - elapsed / config.putt_timeout).clamp(0.0, 1.0);
    let near_cup = ((pin_distance - config.hole_radius) / config.attraction_radius).clamp(0.25, 1.0);
    ball.velocity += response.slope_acceleration(hit.normal, config.gravity, fade * near_cup) * dt;

    let wind = ctx.wind_force();
    if let Some(heading) = Vec3::new(ball.velocity.x, 0.0, ball.velocity.z).try_normalize() {
        let crosswind = 1.0 - wind.normalize_or_zero().dot(heading);
        ball.velocity += wind * config.putt_wind_effect * crosswind * dt;
    }

    if !ball.had_air {
        apply_friction(ball, response, hit.normal, config, dt);
    }
    ball.position += ball.velocity * dt;

    if hit.penetration > config.ball_radius * 2.5 && !over_cup {
        let (state, terrain) = response.stop_state(hit.normal, config.rest_normal_y);
        stop_ball(ball, state, terrain, config, events);
        return;
    }

    if !ball.had_air {
        let settled = ball.velocity.length_squared() < config.stop_speed_squared
            && (hit.normal.y >= config.rest_normal_y || fade <= 0.0);
        if settled || elapsed >= config.putt_timeout {
            let (state, terrain) = response.stop_state(hit.normal, config.rest_normal_y);
            stop_ball(ball, state, terrain, config, events);
        }
    }
}

/// Keeps a rolling ball on the ground: falls when above the surface,
/// is lifted back when below it.
fn ground_contact(ball: &mut Ball, hit: &TerrainQueryResult, config: &BallConfig, dt: f32) {
    if hit.penetration < 0.0 {
        ball.velocity.y -= config.gravity * dt;
    } else {
        ball.velocity.y = 0.0;
        ball.position.y += hit.penetration;
    }
}

/// Terrain friction followed by a constant rolling resistance on the
/// horizontal speed.
fn apply_friction(
    ball: &mut Ball,
    response: &TerrainResponse,
    normal: Vec3,
    config: &BallConfig,
    dt: f32,
) {
    ball.velocity *= response.friction_factor(normal, dt);

    let speed = ball.velocity.xz().length();
    if speed > 0.0 {
        let scale = (speed - config.rolling_resistance * dt).max(0.0) / speed;
        ball.velocity.x *= scale;
        ball.velocity.z *= scale;
    }
}

fn tick_balls(
    balls: &mut Query<&mut Ball>,
    ctx: SimContext,
    dt: f32,
    writers: &mut SimEventWriters,
) {
    let mut events = Vec::new();
    for mut ball in balls.iter_mut() {
        if ball.state == BallState::Idle {
            continue;
        }
        advance(&mut ball, ctx, dt, &mut events);
    }
    writers.send_all(events);
}

/// Advance every ball in play against the loaded [`TerrainWorld`].
///
/// Runs in FixedUpdate for deterministic simulation.
///
/// # Arguments
/// * `time` - Bevy FixedTime resource to get delta time
/// * `config` - Simulation configuration
/// * `hole` - Current hole
/// * `wind` - Match wind
/// * `bullseye` - Minigame target
/// * `terrain` - Collision world of the hole
/// * `writers` - Message writers for simulation events
/// * `balls` - Query for ball components
#[allow(clippy::too_many_arguments)]
pub fn advance_balls(
    time: Res<Time<Fixed>>,
    config: Res<BallConfig>,
    hole: Res<HoleContext>,
    wind: Res<WindState>,
    bullseye: Res<BullsEye>,
    terrain: Res<TerrainWorld>,
    mut writers: SimEventWriters,
    mut balls: Query<&mut Ball>,
) {
    let ctx = SimContext {
        config: &config,
        hole: &hole,
        wind: &wind,
        bullseye: &bullseye,
        terrain: &*terrain,
        mode: SimulationMode::RealTime,
    };
    tick_balls(&mut balls, ctx, time.delta_secs(), &mut writers);
}

/// Advance every ball in play against avian colliders.
///
/// Used when no [`TerrainWorld`] is loaded. Colliders are classified by
/// their [`TerrainSurface`].
///
/// # Arguments
/// * `spatial_query` - Avian3D spatial query for ground rays
/// * `surfaces` - Query for surface classification of colliders
#[cfg(feature = "avian")]
#[allow(clippy::too_many_arguments)]
pub fn advance_balls_spatial(
    time: Res<Time<Fixed>>,
    config: Res<BallConfig>,
    hole: Res<HoleContext>,
    wind: Res<WindState>,
    bullseye: Res<BullsEye>,
    spatial_query: SpatialQuery,
    surfaces: Query<&TerrainSurface>,
    mut writers: SimEventWriters,
    mut balls: Query<&mut Ball>,
) {
    let terrain = collision::SpatialQueryTerrain {
        spatial_query: &spatial_query,
        surface_of: |entity| surfaces.get(entity).ok().copied(),
    };
    let ctx = SimContext {
        config: &config,
        hole: &hole,
        wind: &wind,
        bullseye: &bullseye,
        terrain: &terrain,
        mode: SimulationMode::RealTime,
    };
    tick_balls(&mut balls, ctx, time.delta_secs(), &mut writers);
}

/// Copy ball positions to their transforms.
pub fn sync_ball_transforms(mut balls: Query<(&Ball, &mut Transform), Changed<Ball>>) {
    for (ball, mut transform) in balls.iter_mut() {
        transform.translation = ball.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::BallEventKind;
    use crate::systems::logic::start_stroke;
    use crate::terrain::TerrainMesh;
    use crate::types::StrokeParams;

    const DT: f32 = 1.0 / 60.0;

    struct Course {
        config: BallConfig,
        hole: HoleContext,
        wind: WindState,
        bullseye: BullsEye,
        world: TerrainWorld,
    }

    impl Course {
        fn from_mesh(mesh: TerrainMesh, hole: HoleContext) -> Self {
            Self {
                config: BallConfig::default(),
                hole,
                wind: WindState::calm(),
                bullseye: BullsEye::default(),
                world: TerrainWorld::new(&mesh, 4.0).unwrap(),
            }
        }

        /// Fairway from x=-50 to 50 with a putting green and cup at x=80.
        fn fairway_and_green() -> Self {
            let pin = Vec3::new(80.0, 0.0, 0.0);
            let mut mesh = TerrainMesh::default();
            mesh.push_rect(Vec2::new(-50.0, -50.0), Vec2::new(50.0, 50.0), 0.0, TerrainId::Fairway);
            mesh.push_green_with_cup(pin, 30.0, 0.065);
            Self::from_mesh(mesh, HoleContext::new(pin, Vec3::new(-40.0, 0.0, 0.0)))
        }

        /// Fairway up to x=20, then water.
        fn fairway_and_water() -> Self {
            let mut mesh = TerrainMesh::default();
            mesh.push_rect(Vec2::new(-50.0, -50.0), Vec2::new(20.0, 50.0), 0.0, TerrainId::Fairway);
            mesh.push_rect(Vec2::new(20.0, -50.0), Vec2::new(80.0, 50.0), -0.5, TerrainId::Water);
            Self::from_mesh(
                mesh,
                HoleContext::new(Vec3::new(100.0, 0.0, 0.0), Vec3::new(-40.0, 0.0, 0.0)),
            )
        }

        fn ctx(&self) -> SimContext<'_> {
            SimContext {
                config: &self.config,
                hole: &self.hole,
                wind: &self.wind,
                bullseye: &self.bullseye,
                terrain: &self.world,
                mode: SimulationMode::RealTime,
            }
        }

        /// Ticks until the ball is idle again.
        fn play_out(&self, ball: &mut Ball) -> Vec<SimEvent> {
            let mut events = Vec::new();
            for _ in 0..(60 * 60) {
                advance(ball, self.ctx(), DT, &mut events);
                assert!(ball.is_finite());
                if ball.state.is_stopped() {
                    assert_eq!(ball.velocity, Vec3::ZERO);
                }
                if ball.state == BallState::Idle {
                    break;
                }
            }
            events
        }
    }

    fn ball_kinds(events: &[SimEvent]) -> Vec<BallEventKind> {
        events
            .iter()
            .filter_map(SimEvent::as_ball_event)
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_drive_lands_rolls_and_ends_turn() {
        let course = Course::fairway_and_green();
        let mut ball = Ball::new(Vec3::new(-30.0, 0.0, 0.0));
        assert!(start_stroke(&mut ball, &StrokeParams::new(Vec3::new(12.0, 8.0, 0.0)), &course.hole));

        let events = course.play_out(&mut ball);
        assert_eq!(ball.state, BallState::Idle);
        assert_eq!(ball_kinds(&events), vec![BallEventKind::Landed, BallEventKind::TurnEnded]);

        let landed = events[0].as_ball_event().unwrap();
        assert_eq!(landed.state, BallState::Paused);
        assert_eq!(landed.terrain, TerrainId::Fairway);
        assert!(ball.position.x > -30.0 + 10.0);
        assert!(ball.position.y.abs() < 0.01);
    }

    #[test]
    fn test_strike_delay_holds_ball() {
        let course = Course::fairway_and_green();
        let mut ball = Ball::new(Vec3::new(0.0, 0.0, 0.0));
        let params = StrokeParams::new(Vec3::new(10.0, 10.0, 0.0)).with_delay(0.5);
        start_stroke(&mut ball, &params, &course.hole);

        let mut events = Vec::new();
        for _ in 0..20 {
            advance(&mut ball, course.ctx(), DT, &mut events);
        }
        assert_eq!(ball.position, Vec3::ZERO);

        for _ in 0..20 {
            advance(&mut ball, course.ctx(), DT, &mut events);
        }
        assert!(ball.position.y > 0.0);
    }

    #[test]
    fn test_wind_pushes_flight() {
        let mut course = Course::fairway_and_green();
        let params = StrokeParams::new(Vec3::new(15.0, 12.0, 0.0));

        let mut calm = Ball::new(Vec3::new(-40.0, 0.0, 0.0));
        start_stroke(&mut calm, &params, &course.hole);
        course.play_out(&mut calm);

        course.wind = WindState::fixed(Vec3::Z, 1.0);
        let mut windy = Ball::new(Vec3::new(-40.0, 0.0, 0.0));
        start_stroke(&mut windy, &params, &course.hole);
        course.play_out(&mut windy);

        assert!(windy.position.z > calm.position.z + 0.5);
    }

    #[test]
    fn test_side_spin_curves_flight() {
        let course = Course::fairway_and_green();
        let mut ball = Ball::new(Vec3::new(-40.0, 0.0, 0.0));
        let params = StrokeParams::new(Vec3::new(15.0, 12.0, 0.0)).with_spin(Vec2::new(1.0, 0.0));
        start_stroke(&mut ball, &params, &course.hole);
        course.play_out(&mut ball);

        // Side vector of a shot along +X is +Z
        assert!(ball.position.z > 0.5);
    }

    #[test]
    fn test_water_shot_is_relocated() {
        let course = Course::fairway_and_water();
        let mut ball = Ball::new(Vec3::new(0.0, 0.0, 0.0));
        start_stroke(&mut ball, &StrokeParams::new(Vec3::new(15.0, 10.0, 0.0)), &course.hole);

        let events = course.play_out(&mut ball);
        assert_eq!(
            ball_kinds(&events),
            vec![BallEventKind::Landed, BallEventKind::Foul, BallEventKind::TurnEnded]
        );
        let landed = events[0].as_ball_event().unwrap();
        assert_eq!(landed.state, BallState::Reset);
        assert_eq!(landed.terrain, TerrainId::Water);

        assert!(ball.terrain.is_valid_drop());
        assert!(ball.position.x < 20.0);
        assert!(ball.position.x > 0.0);
    }

    #[test]
    fn test_putt_into_cup() {
        let course = Course::fairway_and_green();
        let pin = course.hole.pin;
        let mut ball = Ball::new(pin + Vec3::new(-1.0, 0.0, 0.003)).with_terrain(TerrainId::Green);
        start_stroke(&mut ball, &StrokeParams::new(Vec3::new(1.5, 0.0, 0.0)).putt(), &course.hole);
        assert_eq!(ball.state, BallState::Putt);

        let events = course.play_out(&mut ball);
        assert_eq!(ball_kinds(&events), vec![BallEventKind::Landed, BallEventKind::Holed]);
        assert_eq!(events[0].as_ball_event().unwrap().terrain, TerrainId::Hole);
        assert_eq!(events[1].as_ball_event().unwrap().position, pin);
        assert!(ball.holed);
    }

    #[test]
    fn test_short_putt_stays_on_green() {
        let course = Course::fairway_and_green();
        let pin = course.hole.pin;
        let mut ball = Ball::new(pin + Vec3::new(-3.0, 0.0, 0.0)).with_terrain(TerrainId::Green);
        start_stroke(&mut ball, &StrokeParams::new(Vec3::new(1.0, 0.0, 0.0)), &course.hole);

        let events = course.play_out(&mut ball);
        assert_eq!(ball_kinds(&events), vec![BallEventKind::Landed, BallEventKind::TurnEnded]);
        assert_eq!(ball.terrain, TerrainId::Green);
        assert!(!ball.holed);
        assert!(ball.position.x < pin.x - 1.0);
    }

    #[test]
    fn test_capture_needs_depth_inside_radius() {
        let config = BallConfig::default();
        let fast = Vec3::new(2.0, 0.0, 0.0);
        assert!(is_captured(0.03 * 0.03, 0.03, fast, &config));
        assert!(!is_captured(0.07 * 0.07, 0.03, fast, &config));
        assert!(!is_captured(0.03 * 0.03, 0.01, fast, &config));
        // Slow and dead on the pin
        assert!(is_captured(0.005 * 0.005, 0.0, Vec3::new(0.5, 0.0, 0.0), &config));
    }

    #[test]
    fn test_roll_onto_rough_stops() {
        let mut mesh = TerrainMesh::default();
        mesh.push_rect(Vec2::new(-10.0, -10.0), Vec2::new(0.0, 10.0), 0.0, TerrainId::Fairway);
        mesh.push_rect(Vec2::new(0.0, -10.0), Vec2::new(10.0, 10.0), 0.0, TerrainId::Rough);
        let course = Course::from_mesh(mesh, HoleContext::new(Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO));

        let mut ball = Ball::new(Vec3::new(-1.0, 0.0, 0.3));
        ball.state = BallState::Roll;
        ball.velocity = Vec3::new(5.0, 0.0, 0.0);

        let events = course.play_out(&mut ball);
        assert_eq!(ball_kinds(&events)[0], BallEventKind::Landed);
        assert_eq!(events[0].as_ball_event().unwrap().terrain, TerrainId::Rough);
        assert!(ball.position.x < 0.2);
    }

    #[test]
    fn test_non_finite_wind_is_ignored() {
        let mut course = Course::fairway_and_green();
        course.wind.direction = Vec3::NAN;

        let mut ball = Ball::new(Vec3::new(-30.0, 0.0, 0.0));
        start_stroke(&mut ball, &StrokeParams::new(Vec3::new(10.0, 6.0, 0.0)), &course.hole);
        let mut events = Vec::new();
        for _ in 0..120 {
            advance(&mut ball, course.ctx(), DT, &mut events);
            assert!(ball.is_finite());
        }
    }

    #[test]
    fn test_invalid_time_step_is_ignored() {
        let course = Course::fairway_and_green();
        let mut ball = Ball::new(Vec3::new(-30.0, 0.0, 0.0));
        start_stroke(&mut ball, &StrokeParams::new(Vec3::new(10.0, 6.0, 0.0)), &course.hole);
        let before = ball.clone();

        let mut events = Vec::new();
        advance(&mut ball, course.ctx(), 0.0, &mut events);
        advance(&mut ball, course.ctx(), f32::NAN, &mut events);
        advance(&mut ball, course.ctx(), -1.0, &mut events);
        assert_eq!(ball, before);
    }
}
