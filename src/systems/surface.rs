//! Per-terrain response tables and the contact math built on them.

use bevy::prelude::*;

use crate::types::{BallState, TerrainId};

/// What a landing on the terrain does to a ball in flight.
///
/// # Variants
/// * `Absorb` - Velocity is scaled down, no change of direction
/// * `RollOrBounce` - A shallow landing starts rolling, a steep one bounces
/// * `Bounce` - Always reflects about the surface normal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactResponse {
    Absorb,
    RollOrBounce,
    Bounce,
}

/// What a rolling ball does on the terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollingResponse {
    /// Keep rolling in the `Roll` state
    Roll,
    /// Switch to (or stay in) the `Putt` state
    Putt,
    /// Stop immediately
    Stop,
}

/// Where a stopped ball goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopRule {
    /// Settle and wait for the end of the turn
    Pause,
    /// Out of bounds, relocate
    Reset,
    /// Settle when the ground is nearly flat, otherwise relocate as scrub
    BySlope,
}

/// Physical response of one terrain type.
///
/// # Fields
/// * `terrain` - The terrain this entry describes; must match its table index
/// * `restitution` - Fraction of speed kept by a bounce or absorbing contact
/// * `friction` - Speed kept per 1/60 s while rolling
/// * `spin_decay` - Fraction of spin kept by a bounce
/// * `spin_addition` - Top spin picked up by a skidding bounce
/// * `slope_resistance` - How much of the slope force the surface cancels (0..1)
/// * `contact` - Landing behaviour
/// * `rolling` - Rolling behaviour
/// * `stop` - Where a stopped ball goes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainResponse {
    pub terrain: TerrainId,
    pub restitution: f32,
    pub friction: f32,
    pub spin_decay: f32,
    pub spin_addition: f32,
    pub slope_resistance: f32,
    pub contact: ContactResponse,
    pub rolling: RollingResponse,
    pub stop: StopRule,
}

/// Response table indexed by [`TerrainId::index`].
pub const RESPONSES: [TerrainResponse; TerrainId::COUNT] = [
    TerrainResponse {
        terrain: TerrainId::Rough,
        restitution: 0.23,
        friction: 0.94,
        spin_decay: 0.3,
        spin_addition: 0.0,
        slope_resistance: 0.8,
        contact: ContactResponse::Bounce,
        rolling: RollingResponse::Stop,
        stop: StopRule::Pause,
    },
    TerrainResponse {
        terrain: TerrainId::Fairway,
        restitution: 0.33,
        friction: 0.975,
        spin_decay: 0.6,
        spin_addition: 0.1,
        slope_resistance: 0.5,
        contact: ContactResponse::RollOrBounce,
        rolling: RollingResponse::Roll,
        stop: StopRule::Pause,
    },
    TerrainResponse {
        terrain: TerrainId::Green,
        restitution: 0.28,
        friction: 0.985,
        spin_decay: 0.7,
        spin_addition: 0.05,
        slope_resistance: 0.4,
        contact: ContactResponse::RollOrBounce,
        rolling: RollingResponse::Putt,
        stop: StopRule::Pause,
    },
    TerrainResponse {
        terrain: TerrainId::Bunker,
        restitution: 0.05,
        friction: 0.8,
        spin_decay: 0.0,
        spin_addition: 0.0,
        slope_resistance: 0.95,
        contact: ContactResponse::Absorb,
        rolling: RollingResponse::Stop,
        stop: StopRule::Pause,
    },
    TerrainResponse {
        terrain: TerrainId::Water,
        restitution: 0.0,
        friction: 0.0,
        spin_decay: 0.0,
        spin_addition: 0.0,
        slope_resistance: 1.0,
        contact: ContactResponse::Absorb,
        rolling: RollingResponse::Stop,
        stop: StopRule::Reset,
    },
    TerrainResponse {
        terrain: TerrainId::Scrub,
        restitution: 0.0,
        friction: 0.0,
        spin_decay: 0.0,
        spin_addition: 0.0,
        slope_resistance: 1.0,
        contact: ContactResponse::Absorb,
        rolling: RollingResponse::Stop,
        stop: StopRule::Reset,
    },
    TerrainResponse {
        terrain: TerrainId::Stone,
        restitution: 0.6,
        friction: 0.99,
        spin_decay: 0.8,
        spin_addition: 0.2,
        slope_resistance: 0.2,
        contact: ContactResponse::RollOrBounce,
        rolling: RollingResponse::Roll,
        stop: StopRule::BySlope,
    },
    TerrainResponse {
        terrain: TerrainId::Hole,
        restitution: 0.28,
        friction: 0.985,
        spin_decay: 0.7,
        spin_addition: 0.05,
        slope_resistance: 0.4,
        contact: ContactResponse::RollOrBounce,
        rolling: RollingResponse::Putt,
        stop: StopRule::Pause,
    },
];

const fn table_is_ordered() -> bool {
    let mut i = 0;
    while i < RESPONSES.len() {
        if RESPONSES[i].terrain.index() != i {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(table_is_ordered(), "terrain response table out of order");

/// Looks up the response of `terrain`.
#[inline]
pub fn response(terrain: TerrainId) -> &'static TerrainResponse {
    &RESPONSES[terrain.index()]
}

impl TerrainResponse {
    /// Resolves where a ball stopping on this terrain goes.
    ///
    /// # Arguments
    /// * `normal` - Surface normal under the ball
    /// * `rest_normal_y` - Normal Y above which the ground counts as flat
    ///
    /// # Returns
    /// The state to enter and the terrain to report
    pub fn stop_state(&self, normal: Vec3, rest_normal_y: f32) -> (BallState, TerrainId) {
        match self.stop {
            StopRule::Pause => (BallState::Paused, self.terrain),
            StopRule::Reset => (BallState::Reset, self.terrain),
            StopRule::BySlope if normal.y >= rest_normal_y => (BallState::Paused, self.terrain),
            StopRule::BySlope => (BallState::Reset, TerrainId::Scrub),
        }
    }

    /// Friction factor for one tick of `dt` seconds. Friction eases off on
    /// slopes so balls keep running downhill.
    pub fn friction_factor(&self, normal: Vec3, dt: f32) -> f32 {
        let slope = (1.0 - normal.y).clamp(0.0, 1.0);
        let per_tick = self.friction + (1.0 - self.friction) * slope * 0.5;
        per_tick.powf(dt * 60.0)
    }

    /// Slope acceleration felt by a rolling ball.
    ///
    /// # Arguments
    /// * `normal` - Surface normal under the ball
    /// * `gravity` - Gravity magnitude
    /// * `fade` - Scale in 0..1, reduced over the roll timeout
    pub fn slope_acceleration(&self, normal: Vec3, gravity: f32, fade: f32) -> Vec3 {
        Vec3::new(normal.x, 0.0, normal.z) * gravity * (1.0 - self.slope_resistance) * fade
    }
}

/// Reflects `velocity` about the plane with unit `normal`.
#[inline]
pub fn reflect(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Cosine of the angle between the incoming velocity and the surface
/// normal: 1 for a vertical drop, 0 for a grazing contact.
pub fn descent(velocity: Vec3, normal: Vec3) -> f32 {
    let speed = velocity.length();
    if speed <= f32::EPSILON {
        return 1.0;
    }
    (-velocity.dot(normal) / speed).clamp(0.0, 1.0)
}

/// Bounce velocity off a surface.
///
/// Keeps the terrain restitution plus a bonus for fast, glancing impacts,
/// so steeper, slower landings lose proportionally more energy.
///
/// # Arguments
/// * `velocity` - Incoming velocity
/// * `normal` - Unit surface normal
/// * `response` - Terrain response
///
/// # Returns
/// The outgoing velocity
pub fn bounce_velocity(velocity: Vec3, normal: Vec3, response: &TerrainResponse) -> Vec3 {
    let speed = velocity.length();
    let bonus = 0.1 * (1.0 - descent(velocity, normal)) * (speed / 30.0).min(1.0);
    reflect(velocity, normal) * (response.restitution + bonus)
}

/// Converts a shallow landing into a rolling velocity.
///
/// The vertical component is dropped and the horizontal speed is scaled
/// back up from the restitution towards the incoming horizontal speed the
/// shallower the landing was. Never faster than the incoming horizontal speed.
pub fn roll_velocity(velocity: Vec3, response: &TerrainResponse) -> Vec3 {
    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    let steepness = descent(velocity, Vec3::Y);
    let keep = response.restitution + (1.0 - response.restitution) * (1.0 - steepness);
    horizontal * keep.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        for terrain in TerrainId::ALL {
            assert_eq!(response(terrain).terrain, terrain);
        }
        assert!(table_is_ordered());
    }

    #[test]
    fn test_out_of_bounds_resets() {
        assert_eq!(
            response(TerrainId::Water).stop_state(Vec3::Y, 0.985),
            (BallState::Reset, TerrainId::Water)
        );
        assert_eq!(
            response(TerrainId::Bunker).stop_state(Vec3::Y, 0.985).0,
            BallState::Paused
        );
    }

    #[test]
    fn test_stone_stops_by_slope() {
        let stone = response(TerrainId::Stone);
        assert_eq!(stone.stop_state(Vec3::Y, 0.985), (BallState::Paused, TerrainId::Stone));

        let steep = Vec3::new(0.5, 0.8, 0.0).normalize();
        assert_eq!(stone.stop_state(steep, 0.985), (BallState::Reset, TerrainId::Scrub));
    }

    #[test]
    fn test_vertical_bounce_keeps_restitution() {
        let rough = response(TerrainId::Rough);
        let out = bounce_velocity(Vec3::new(0.0, -10.0, 0.0), Vec3::Y, rough);
        assert!((out.y - 10.0 * rough.restitution).abs() < 1e-5);
    }

    #[test]
    fn test_glancing_bounce_keeps_more() {
        let rough = response(TerrainId::Rough);
        let steep = bounce_velocity(Vec3::new(0.0, -20.0, 0.0), Vec3::Y, rough);
        let glancing = bounce_velocity(Vec3::new(19.0, -6.4, 0.0), Vec3::Y, rough);
        assert!(glancing.length() / 20.05 > steep.length() / 20.0);
    }

    #[test]
    fn test_roll_velocity_never_speeds_up() {
        let fairway = response(TerrainId::Fairway);
        let v = Vec3::new(10.0, -1.0, 2.0);
        let rolled = roll_velocity(v, fairway);
        assert_eq!(rolled.y, 0.0);
        assert!(rolled.length() <= Vec3::new(10.0, 0.0, 2.0).length());
        assert!(rolled.length() > 0.9 * Vec3::new(10.0, 0.0, 2.0).length() * fairway.restitution);
    }

    #[test]
    fn test_friction_is_time_step_independent() {
        let green = response(TerrainId::Green);
        let one = green.friction_factor(Vec3::Y, 1.0 / 30.0);
        let two = green.friction_factor(Vec3::Y, 1.0 / 60.0).powi(2);
        assert!((one - two).abs() < 1e-5);
    }

    #[test]
    fn test_zero_velocity_descent() {
        assert_eq!(descent(Vec3::ZERO, Vec3::Y), 1.0);
    }
}
