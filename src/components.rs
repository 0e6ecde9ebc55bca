//! Core components for the golf ball simulation.

use bevy::prelude::*;

use crate::types::{BallState, Lie, TerrainId};

/// A golf ball owned by one player.
///
/// The ball carries its own position; [`crate::systems::kinematics::sync_ball_transforms`]
/// copies it to the entity's `Transform`. Positions are measured at the
/// ball's contact point with the ground.
///
/// # Fields
/// * `position` - World position (m)
/// * `velocity` - Current velocity (m/s)
/// * `spin` - Side spin (x) and top spin (y, negative for back spin)
/// * `rotation` - Visual rolling speed coefficient, cosmetic only
/// * `state` - Simulation state
/// * `terrain` - Last known terrain under the ball
/// * `lie` - How the ball sits after its last contact
/// * `delay` - Countdown reused per state: strike delay, roll clock, turn and reset delays
/// * `start_point` - Position at the start of the current stroke
/// * `initial_forward_vector` - Horizontal shot direction captured at the stroke
/// * `initial_side_vector` - Right-hand side of the shot direction
/// * `had_air` - The ball left the green surface over the cup while putting
/// * `check_gimme` - Evaluate the gimme radius once the ball is paused
/// * `client` - Owning player connection, carried through to events
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_golf_ball::components::Ball;
/// use bevy_golf_ball::types::{BallState, TerrainId};
///
/// let ball = Ball::new(Vec3::new(0.0, 0.0, 0.0))
///     .with_client(3)
///     .with_terrain(TerrainId::Fairway);
/// assert_eq!(ball.state, BallState::Idle);
/// ```
#[derive(Component, Reflect, Clone, Debug, PartialEq)]
#[reflect(Component)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    pub spin: Vec2,
    pub rotation: f32,
    pub state: BallState,
    pub terrain: TerrainId,
    pub lie: Lie,
    pub delay: f32,
    pub start_point: Vec3,
    pub initial_forward_vector: Vec3,
    pub initial_side_vector: Vec3,
    pub had_air: bool,
    pub check_gimme: bool,
    pub client: u64,
    /// The ball finished in the cup (or was conceded)
    pub holed: bool,
    /// The ball touched the ground at least once this stroke
    pub has_landed: bool,
    /// Consecutive relocations that ended back near the stroke start
    pub reset_repeats: u8,
    /// Where the previous relocation put the ball
    pub last_reset_position: Option<Vec3>,
    /// Bit set of trigger ids (1..=64) already reported this stroke
    pub touched_triggers: u64,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Ball {
    /// Creates an idle ball resting at `position`.
    ///
    /// # Arguments
    /// * `position` - Resting position on the course
    ///
    /// # Returns
    /// An idle ball on the fairway, sitting up, owned by client 0
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            spin: Vec2::ZERO,
            rotation: 0.0,
            state: BallState::Idle,
            terrain: TerrainId::Fairway,
            lie: Lie::SittingUp,
            delay: 0.0,
            start_point: position,
            initial_forward_vector: Vec3::X,
            initial_side_vector: Vec3::Z,
            had_air: false,
            check_gimme: false,
            client: 0,
            holed: false,
            has_landed: false,
            reset_repeats: 0,
            last_reset_position: None,
            touched_triggers: 0,
        }
    }

    /// Builder pattern: set the owning client.
    pub fn with_client(mut self, client: u64) -> Self {
        self.client = client;
        self
    }

    /// Builder pattern: set the terrain the ball rests on.
    pub fn with_terrain(mut self, terrain: TerrainId) -> Self {
        self.terrain = terrain;
        self
    }

    /// Horizontal distance travelled since the stroke started.
    pub fn stroke_distance(&self) -> f32 {
        (self.position.xz() - self.start_point.xz()).length()
    }

    /// Time spent in the current rolling state. The roll clock runs the
    /// `delay` countdown below zero.
    pub fn state_elapsed(&self) -> f32 {
        (-self.delay).max(0.0)
    }

    /// Records a trigger contact.
    ///
    /// # Returns
    /// `true` the first time `trigger` is touched during this stroke
    pub fn mark_trigger(&mut self, trigger: u8) -> bool {
        if trigger == 0 || trigger > 64 {
            return false;
        }
        let bit = 1u64 << (trigger - 1);
        let first = self.touched_triggers & bit == 0;
        self.touched_triggers |= bit;
        first
    }

    /// Zeroes velocity and spin.
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.spin = Vec2::ZERO;
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.spin.is_finite()
    }
}

/// Terrain classification of a collider, for courses built from avian
/// colliders instead of a [`crate::terrain::TerrainWorld`].
#[cfg(feature = "avian")]
#[derive(Component, Reflect, Clone, Copy, Debug, Default, PartialEq)]
#[reflect(Component)]
pub struct TerrainSurface {
    pub terrain: TerrainId,
    pub trigger: u8,
}

#[cfg(feature = "avian")]
impl TerrainSurface {
    pub fn new(terrain: TerrainId) -> Self {
        Self { terrain, trigger: 0 }
    }

    /// Builder pattern: set the trigger id.
    pub fn with_trigger(mut self, trigger: u8) -> Self {
        self.trigger = trigger;
        self
    }
}
