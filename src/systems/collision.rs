//! Collision handling - terrain contacts, the flagpole and ball-to-ball
//! separation.

use bevy::prelude::*;

#[cfg(feature = "avian")]
use avian3d::prelude::*;

use crate::components::Ball;
#[cfg(feature = "avian")]
use crate::components::TerrainSurface;
use crate::events::{FlagPoleEvent, SimEvent, TriggerEvent};
use crate::resources::{BallConfig, HoleContext};
use crate::systems::bullseye::check_bullseye;
use crate::systems::kinematics::SimContext;
use crate::systems::logic::stop_ball;
use crate::systems::surface::{self, ContactResponse, RollingResponse};
#[cfg(feature = "avian")]
use crate::types::TerrainQuery;
use crate::types::{BallState, Lie, TerrainId, TerrainQueryResult};

/// Extra gap left between two separated balls.
const SEPARATION_SLOP: f32 = 0.001;

/// Restitution of a ball-to-ball knock.
const BALL_RESTITUTION: f32 = 0.5;

/// Fraction of speed kept by a ball deflected off the flagpole.
const FLAG_POLE_RESTITUTION: f32 = 0.5;

/// Samples the ground under a ball in flight and resolves any contact.
///
/// A ray that misses all geometry means the ball has left the course;
/// below the water level that is a water hazard.
///
/// # Arguments
/// * `ball` - Ball in flight
/// * `ctx` - Simulation context
/// * `events` - Event buffer for the tick
pub fn check_terrain(ball: &mut Ball, ctx: SimContext, events: &mut Vec<SimEvent>) {
    match ctx.terrain.query_down(ball.position, ctx.config.terrain_ray_length) {
        Some(hit) if hit.is_below_surface() => resolve_terrain_contact(ball, &hit, ctx, events),
        Some(_) => {}
        None if ball.position.y < ctx.config.water_level => {
            stop_ball(ball, BallState::Reset, TerrainId::Water, ctx.config, events);
        }
        None => {}
    }
}

/// Resolves a ball in flight touching the ground.
///
/// Pushes the ball back onto the surface, then applies the terrain's
/// contact response: absorbing terrain soaks up speed, a shallow landing
/// on firm ground starts a roll, anything else bounces. A ball left slower
/// than the stop threshold comes to rest.
///
/// # Arguments
/// * `ball` - Ball in flight
/// * `hit` - Ground sample under the ball, with positive penetration
/// * `ctx` - Simulation context
/// * `events` - Event buffer for the tick
pub fn resolve_terrain_contact(
    ball: &mut Ball,
    hit: &TerrainQueryResult,
    ctx: SimContext,
    events: &mut Vec<SimEvent>,
) {
    let config = ctx.config;

    ball.position.y += hit.penetration;
    ball.terrain = hit.terrain;
    ball.lie = if hit.penetration > config.ball_radius {
        Lie::Buried
    } else {
        Lie::SittingUp
    };

    if !ball.has_landed {
        ball.has_landed = true;
        if let Some(event) = check_bullseye(ctx.bullseye, ball.position, ball.client) {
            events.push(SimEvent::BullsEye(event));
        }
    }

    if hit.trigger != 0 && ctx.mode.allows_side_effects() && ball.mark_trigger(hit.trigger) {
        events.push(SimEvent::Trigger(TriggerEvent {
            trigger: hit.trigger,
            position: ball.position,
            client: ball.client,
        }));
    }

    let response = surface::response(hit.terrain);
    match response.contact {
        ContactResponse::Absorb => {
            ball.velocity *= response.restitution;
        }
        ContactResponse::RollOrBounce if ball.velocity.y > config.roll_threshold => {
            ball.velocity = surface::roll_velocity(ball.velocity, response);
            ball.state = if response.rolling == RollingResponse::Putt {
                BallState::Putt
            } else {
                BallState::Roll
            };
            ball.delay = 0.0;
            ball.had_air = false;
            return;
        }
        ContactResponse::RollOrBounce | ContactResponse::Bounce => {
            let descent = surface::descent(ball.velocity, hit.normal);
            ball.velocity = surface::bounce_velocity(ball.velocity, hit.normal, response);
            ball.spin.y = ball.spin.y * response.spin_decay + response.spin_addition * (1.0 - descent);
            ball.spin.x *= response.spin_decay;
        }
    }

    if ball.velocity.length_squared() < config.stop_speed_squared {
        let (state, terrain) = response.stop_state(hit.normal, config.rest_normal_y);
        stop_ball(ball, state, terrain, config, events);
    }
}

/// Deflects a ball in flight off the flagpole.
///
/// The pole is a vertical cylinder standing on the pin. A ball inside it
/// is pushed back to the surface and, if still moving into the pole,
/// reflected with half its speed. Strikes near the top of the pole lose
/// most of their horizontal speed. A glancing strike picks up side spin.
///
/// # Returns
/// `true` if the ball touched the pole
pub fn check_flag_pole(ball: &mut Ball, ctx: SimContext, events: &mut Vec<SimEvent>) -> bool {
    let config = ctx.config;
    let pin = ctx.hole.pin;

    let height = ball.position.y - pin.y;
    if !(0.0..=config.flag_pole_height).contains(&height) {
        return false;
    }

    let reach = config.flag_pole_radius + config.ball_radius;
    let offset = ball.position.xz() - pin.xz();
    let distance = offset.length();
    if distance >= reach {
        return false;
    }

    let travel = Vec3::new(ball.velocity.x, 0.0, ball.velocity.z).normalize_or(Vec3::X);
    let outward = offset
        .try_normalize()
        .map(|n| Vec3::new(n.x, 0.0, n.y))
        .unwrap_or(-travel);

    ball.position.x = pin.x + outward.x * (reach + SEPARATION_SLOP);
    ball.position.z = pin.z + outward.z * (reach + SEPARATION_SLOP);

    if ball.velocity.dot(outward) < 0.0 {
        ball.velocity = surface::reflect(ball.velocity, outward) * FLAG_POLE_RESTITUTION;

        let top = ((height / config.flag_pole_height - 0.8) / 0.2).clamp(0.0, 1.0);
        let keep = 1.0 - 0.75 * top;
        ball.velocity.x *= keep;
        ball.velocity.z *= keep;
        ball.velocity = ball.velocity.clamp_length_max(config.flag_pole_max_speed);

        let lateral = outward.dot(travel.cross(Vec3::Y));
        ball.spin.x += lateral * 0.5;
    }

    if ctx.mode.allows_side_effects() {
        events.push(SimEvent::FlagPole(FlagPoleEvent {
            position: ball.position,
            client: ball.client,
        }));
    }
    true
}

fn is_separable(ball: &Ball, config: &BallConfig, hole: &HoleContext) -> bool {
    let near_cup = ball.state == BallState::Putt
        && hole.pin_distance_squared(ball.position) < config.attraction_radius * config.attraction_radius;
    !(ball.holed || ball.terrain == TerrainId::Hole || ball.state == BallState::Reset || near_cup)
}

/// Pushes two overlapping balls apart on the horizontal plane.
///
/// Balls overlap when their centres are closer than two radii. Each ball
/// moves half the horizontal overlap plus a small slop, so the pair ends
/// strictly further apart than two radii. Only moving balls change
/// velocity: two moving balls exchange the approaching part of their
/// velocity, damped, and a moving ball striking one at rest rebounds off
/// it. A ball at rest keeps a zero velocity. Balls in the cup, being
/// relocated, or being drawn into the cup are left alone.
///
/// # Returns
/// `true` if the balls were overlapping and have been moved
pub fn resolve_ball_pair(a: &mut Ball, b: &mut Ball, config: &BallConfig, hole: &HoleContext) -> bool {
    if !is_separable(a, config, hole) || !is_separable(b, config, hole) {
        return false;
    }

    let min_distance = config.min_ball_separation();
    if a.position.distance_squared(b.position) >= min_distance * min_distance {
        return false;
    }

    let offset = b.position.xz() - a.position.xz();
    let distance = offset.length();
    let Some(normal) = (distance > f32::EPSILON).then(|| offset / distance) else {
        // Stacked on the same vertical, split along X
        let push = min_distance * 0.5 + SEPARATION_SLOP;
        a.position.x -= push;
        b.position.x += push;
        a.velocity = Vec3::ZERO;
        b.velocity = Vec3::ZERO;
        return true;
    };

    let push = (min_distance - distance) * 0.5 + SEPARATION_SLOP;
    a.position.x -= normal.x * push;
    a.position.z -= normal.y * push;
    b.position.x += normal.x * push;
    b.position.z += normal.y * push;

    let closing = (b.velocity.xz() - a.velocity.xz()).dot(normal);
    if closing >= 0.0 {
        return true;
    }

    // A ball at rest takes no share of the impulse
    let (a_moving, b_moving) = (a.state.is_moving(), b.state.is_moving());
    let share = if a_moving && b_moving { 0.5 } else { 1.0 };
    let impulse = normal * closing * (1.0 + BALL_RESTITUTION) * share;
    if a_moving {
        a.velocity.x += impulse.x;
        a.velocity.z += impulse.y;
    }
    if b_moving {
        b.velocity.x -= impulse.x;
        b.velocity.z -= impulse.y;
    }
    true
}

/// Keep balls from overlapping.
///
/// # Arguments
/// * `config` - Simulation configuration
/// * `hole` - Current hole
/// * `balls` - Query for ball components
pub fn separate_balls(config: Res<BallConfig>, hole: Res<HoleContext>, mut balls: Query<&mut Ball>) {
    let mut pairs = balls.iter_combinations_mut();
    while let Some([mut a, mut b]) = pairs.fetch_next() {
        if resolve_ball_pair(&mut a, &mut b, &config, &hole) {
            trace!("Separated balls of clients {} and {}", a.client, b.client);
        }
    }
}

/// Terrain queries answered by avian's spatial query pipeline.
///
/// Colliders are classified by their [`TerrainSurface`] component; a
/// collider without one is treated as fairway.
#[cfg(feature = "avian")]
pub struct SpatialQueryTerrain<'a, 'w, 's, F> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    pub surface_of: F,
}

#[cfg(feature = "avian")]
impl<F> TerrainQuery for SpatialQueryTerrain<'_, '_, '_, F>
where
    F: Fn(Entity) -> Option<TerrainSurface>,
{
    fn query(&self, origin: Vec3, direction: Vec3, length: f32) -> Option<TerrainQueryResult> {
        let direction = Dir3::new(direction).ok()?;
        if !origin.is_finite() || !(length > 0.0) {
            return None;
        }

        let start = origin - *direction * (length * 0.5);
        let hit = self.spatial_query.cast_ray(
            start,
            direction,
            length,
            true,
            &SpatialQueryFilter::default(),
        )?;

        let surface = (self.surface_of)(hit.entity).unwrap_or_default();
        let intersection = start + *direction * hit.distance;
        let normal = if hit.normal.dot(*direction) > 0.0 {
            -hit.normal
        } else {
            hit.normal
        };

        Some(TerrainQueryResult {
            terrain: surface.terrain,
            trigger: surface.trigger,
            normal,
            intersection,
            penetration: (origin - intersection).dot(*direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{BullsEye, WindState};
    use crate::terrain::{TerrainMesh, TerrainWorld};
    use crate::types::SimulationMode;

    struct Fixture {
        config: BallConfig,
        hole: HoleContext,
        wind: WindState,
        bullseye: BullsEye,
        world: TerrainWorld,
    }

    impl Fixture {
        fn flat(terrain: TerrainId) -> Self {
            let mut mesh = TerrainMesh::default();
            mesh.push_plane(Vec3::ZERO, 50.0, terrain);
            Self {
                config: BallConfig::default(),
                hole: HoleContext::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(-20.0, 0.0, 0.0)),
                wind: WindState::calm(),
                bullseye: BullsEye::default(),
                world: TerrainWorld::new(&mesh, 4.0).unwrap(),
            }
        }

        fn ctx(&self, mode: SimulationMode) -> SimContext<'_> {
            SimContext {
                config: &self.config,
                hole: &self.hole,
                wind: &self.wind,
                bullseye: &self.bullseye,
                terrain: &self.world,
                mode,
            }
        }
    }

    fn flying(position: Vec3, velocity: Vec3) -> Ball {
        let mut ball = Ball::new(Vec3::ZERO);
        ball.position = position;
        ball.velocity = velocity;
        ball.state = BallState::Flight;
        ball
    }

    #[test]
    fn test_shallow_landing_rolls() {
        let fixture = Fixture::flat(TerrainId::Fairway);
        let mut ball = flying(Vec3::new(0.0, -0.01, 0.0), Vec3::new(12.0, -1.5, 0.0));
        let mut events = Vec::new();

        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);
        assert_eq!(ball.state, BallState::Roll);
        assert!(ball.position.y.abs() < 1e-5);
        assert_eq!(ball.velocity.y, 0.0);
        assert!(ball.velocity.x > 0.0 && ball.velocity.x <= 12.0);
        assert!(ball.has_landed);
    }

    #[test]
    fn test_steep_landing_bounces_with_restitution() {
        let fixture = Fixture::flat(TerrainId::Rough);
        let mut ball = flying(Vec3::new(0.0, -0.01, 0.0), Vec3::new(0.0, -10.0, 0.0));
        let mut events = Vec::new();

        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);
        assert_eq!(ball.state, BallState::Flight);
        let restitution = surface::response(TerrainId::Rough).restitution;
        assert!((ball.velocity.y - 10.0 * restitution).abs() < 1e-4);
    }

    #[test]
    fn test_green_landing_putts() {
        let fixture = Fixture::flat(TerrainId::Green);
        let mut ball = flying(Vec3::new(0.0, -0.005, 0.0), Vec3::new(3.0, -1.0, 0.0));
        let mut events = Vec::new();

        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);
        assert_eq!(ball.state, BallState::Putt);
    }

    #[test]
    fn test_water_resets() {
        let fixture = Fixture::flat(TerrainId::Water);
        let mut ball = flying(Vec3::new(0.0, -0.01, 0.0), Vec3::new(5.0, -8.0, 0.0));
        let mut events = Vec::new();

        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);
        assert_eq!(ball.state, BallState::Reset);
        assert_eq!(ball.terrain, TerrainId::Water);
        assert_eq!(ball.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_off_course_below_water_level_resets() {
        let fixture = Fixture::flat(TerrainId::Fairway);
        let mut ball = flying(Vec3::new(500.0, -1.0, 0.0), Vec3::new(5.0, -8.0, 0.0));
        let mut events = Vec::new();

        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);
        assert_eq!(ball.state, BallState::Reset);
        assert_eq!(ball.terrain, TerrainId::Water);
    }

    #[test]
    fn test_deep_contact_buries_ball() {
        let fixture = Fixture::flat(TerrainId::Bunker);
        let mut ball = flying(Vec3::new(0.0, -0.05, 0.0), Vec3::new(1.0, -20.0, 0.0));
        let mut events = Vec::new();

        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);
        assert_eq!(ball.lie, Lie::Buried);
        // Bunker soaks up almost everything
        assert_eq!(ball.state, BallState::Flight);
        assert!(ball.velocity.length() < 1.1);
    }

    #[test]
    fn test_trigger_only_in_real_time() {
        let mut mesh = TerrainMesh::default();
        mesh.push_quad(
            [
                Vec3::new(-5.0, 0.0, -5.0),
                Vec3::new(5.0, 0.0, -5.0),
                Vec3::new(5.0, 0.0, 5.0),
                Vec3::new(-5.0, 0.0, 5.0),
            ],
            TerrainId::Fairway,
            4,
        );
        let mut fixture = Fixture::flat(TerrainId::Fairway);
        fixture.world = TerrainWorld::new(&mesh, 4.0).unwrap();

        let count_triggers = |mode| {
            let mut ball = flying(Vec3::new(0.0, -0.01, 0.0), Vec3::new(0.0, -10.0, 0.0));
            let mut events = Vec::new();
            check_terrain(&mut ball, fixture.ctx(mode), &mut events);
            ball.position.y = -0.01;
            ball.velocity = Vec3::new(0.0, -10.0, 0.0);
            check_terrain(&mut ball, fixture.ctx(mode), &mut events);
            events
                .iter()
                .filter(|e| matches!(e, SimEvent::Trigger(t) if t.trigger == 4))
                .count()
        };

        assert_eq!(count_triggers(SimulationMode::RealTime), 1);
        assert_eq!(count_triggers(SimulationMode::Prediction), 0);
    }

    #[test]
    fn test_first_landing_scores_bullseye() {
        let mut fixture = Fixture::flat(TerrainId::Fairway);
        fixture.bullseye = BullsEye {
            position: Vec3::new(0.5, 0.0, 0.0),
            diameter: 2.0,
            spawn: true,
        };
        let mut ball = flying(Vec3::new(0.0, -0.01, 0.0), Vec3::new(0.0, -10.0, 0.0));
        let mut events = Vec::new();

        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);
        ball.position.y = -0.01;
        ball.velocity = Vec3::new(0.0, -10.0, 0.0);
        check_terrain(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events);

        let scores: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SimEvent::BullsEye(event) => Some(event.accuracy),
                _ => None,
            })
            .collect();
        assert_eq!(scores.len(), 1);
        assert!((scores[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_flag_pole_deflects_ball() {
        let fixture = Fixture::flat(TerrainId::Green);
        let pin = fixture.hole.pin;
        let mut ball = flying(pin + Vec3::new(-0.02, 0.5, 0.0), Vec3::new(10.0, -2.0, 0.0));
        let mut events = Vec::new();

        assert!(check_flag_pole(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events));
        assert!(ball.velocity.x < 0.0);
        assert!(ball.velocity.length() <= fixture.config.flag_pole_max_speed);
        let reach = fixture.config.flag_pole_radius + fixture.config.ball_radius;
        assert!((ball.position.xz() - pin.xz()).length() > reach);
        assert!(matches!(events[0], SimEvent::FlagPole(_)));

        // The same strike is not reported again on the next sub-step
        assert!(!check_flag_pole(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_flag_pole_glancing_strike_reports_once() {
        let fixture = Fixture::flat(TerrainId::Green);
        let pin = fixture.hole.pin;
        let mut events = Vec::new();

        for offset in [Vec2::new(0.013, 0.017), Vec2::new(-0.007, 0.019), Vec2::new(0.021, -0.003)] {
            let mut ball = flying(
                pin + Vec3::new(offset.x, 0.8, offset.y),
                Vec3::new(-3.0, 0.0, -4.0),
            );
            events.clear();
            assert!(check_flag_pole(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events));
            assert!(!check_flag_pole(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events));
            assert_eq!(events.len(), 1);
        }
    }

    #[test]
    fn test_flag_pole_top_kills_speed() {
        let fixture = Fixture::flat(TerrainId::Green);
        let pin = fixture.hole.pin;
        let mut low = flying(pin + Vec3::new(-0.02, 0.5, 0.0), Vec3::new(6.0, 0.0, 0.0));
        let mut high = flying(pin + Vec3::new(-0.02, 1.89, 0.0), Vec3::new(6.0, 0.0, 0.0));
        let mut events = Vec::new();

        check_flag_pole(&mut low, fixture.ctx(SimulationMode::Prediction), &mut events);
        check_flag_pole(&mut high, fixture.ctx(SimulationMode::Prediction), &mut events);
        assert!(high.velocity.length() < low.velocity.length());
        assert!(events.is_empty());
    }

    #[test]
    fn test_flag_pole_misses_above_top() {
        let fixture = Fixture::flat(TerrainId::Green);
        let mut ball = flying(fixture.hole.pin + Vec3::new(0.0, 2.5, 0.0), Vec3::X);
        let mut events = Vec::new();
        assert!(!check_flag_pole(&mut ball, fixture.ctx(SimulationMode::RealTime), &mut events));
    }

    #[test]
    fn test_ball_pair_separation() {
        let config = BallConfig::default();
        let hole = HoleContext::new(Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO);
        let mut a = Ball::new(Vec3::new(0.0, 0.0, 0.0));
        a.state = BallState::Roll;
        let mut b = Ball::new(Vec3::new(0.01, 0.0, 0.01));
        b.state = BallState::Roll;
        b.velocity = Vec3::new(-1.0, 0.0, 0.0);

        assert!(resolve_ball_pair(&mut a, &mut b, &config, &hole));
        let separation = (a.position.xz() - b.position.xz()).length();
        assert!(separation >= config.min_ball_separation());
        assert!(a.velocity.x < 0.0);

        // Already resolved pairs are left alone
        let (a_before, b_before) = (a.clone(), b.clone());
        assert!(!resolve_ball_pair(&mut a, &mut b, &config, &hole));
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_coincident_balls_split() {
        let config = BallConfig::default();
        let hole = HoleContext::new(Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO);
        let mut a = Ball::new(Vec3::new(1.0, 0.0, 1.0));
        let mut b = Ball::new(Vec3::new(1.0, 0.0, 1.0));

        assert!(resolve_ball_pair(&mut a, &mut b, &config, &hole));
        assert!((a.position.xz() - b.position.xz()).length() >= config.min_ball_separation());
        assert!(a.position.is_finite() && b.position.is_finite());
    }

    #[test]
    fn test_resting_ball_keeps_zero_velocity() {
        let config = BallConfig::default();
        let hole = HoleContext::new(Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO);
        let mut resting = Ball::new(Vec3::ZERO);
        resting.state = BallState::Paused;
        let mut rolling = Ball::new(Vec3::new(0.03, 0.0, 0.0));
        rolling.state = BallState::Roll;
        rolling.velocity = Vec3::new(-2.0, 0.0, 0.0);

        assert!(resolve_ball_pair(&mut resting, &mut rolling, &config, &hole));
        assert_eq!(resting.state, BallState::Paused);
        assert_eq!(resting.velocity, Vec3::ZERO);
        assert!((resting.position.xz() - rolling.position.xz()).length() >= config.min_ball_separation());

        // The rolling ball rebounds with the ball restitution
        assert!((rolling.velocity.x - 2.0 * BALL_RESTITUTION).abs() < 1e-5);
    }

    #[test]
    fn test_ball_overhead_is_not_an_overlap() {
        let config = BallConfig::default();
        let hole = HoleContext::new(Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO);
        let mut resting = Ball::new(Vec3::ZERO);
        let mut flying = Ball::new(Vec3::new(0.02, 25.0, 0.0));
        flying.state = BallState::Flight;
        flying.velocity = Vec3::new(-30.0, 5.0, 0.0);

        assert!(!resolve_ball_pair(&mut resting, &mut flying, &config, &hole));
        assert_eq!(flying.position, Vec3::new(0.02, 25.0, 0.0));
        assert_eq!(flying.velocity, Vec3::new(-30.0, 5.0, 0.0));
        assert_eq!(resting.position, Vec3::ZERO);
    }

    #[test]
    fn test_holed_ball_is_not_pushed() {
        let config = BallConfig::default();
        let hole = HoleContext::new(Vec3::ZERO, Vec3::new(-10.0, 0.0, 0.0));
        let mut a = Ball::new(Vec3::ZERO);
        a.holed = true;
        let mut b = Ball::new(Vec3::new(0.01, 0.0, 0.0));

        assert!(!resolve_ball_pair(&mut a, &mut b, &config, &hole));
        assert_eq!(a.position, Vec3::ZERO);
    }
}
