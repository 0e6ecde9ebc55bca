//! Common types and enums for the golf ball simulation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Terrain classification of a point on the course surface.
///
/// The discriminants match the ids baked into the course collision mesh, so
/// a terrain id can be used directly as an index into the per-terrain
/// response tables (see [`crate::systems::surface`]).
///
/// # Variants
/// * `Rough` - Long grass, absorbs most of a bounce
/// * `Fairway` - Short grass, the ball may start rolling on a shallow landing
/// * `Green` - Putting surface around the pin
/// * `Bunker` - Sand, stops the ball almost dead
/// * `Water` - Out of bounds, the ball is relocated
/// * `Scrub` - Out of bounds, the ball is relocated
/// * `Stone` - Hard surface, bouncy; a ball stopping on a slope is relocated
/// * `Hole` - The cup itself
///
/// # Example
/// ```
/// use bevy_golf_ball::types::TerrainId;
///
/// assert_eq!(TerrainId::from_colour_channel(20), TerrainId::Green);
/// assert!(TerrainId::Water.is_out_of_bounds());
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize,
)]
pub enum TerrainId {
    Rough = 0,
    #[default]
    Fairway,
    Green,
    Bunker,
    Water,
    Scrub,
    Stone,
    Hole,
}

impl TerrainId {
    /// Number of terrain variants; the length of every per-terrain table.
    pub const COUNT: usize = 8;

    /// All variants, in id order.
    pub const ALL: [TerrainId; Self::COUNT] = [
        TerrainId::Rough,
        TerrainId::Fairway,
        TerrainId::Green,
        TerrainId::Bunker,
        TerrainId::Water,
        TerrainId::Scrub,
        TerrainId::Stone,
        TerrainId::Hole,
    ];

    /// Index of this terrain into a `[T; TerrainId::COUNT]` table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a terrain id from the red vertex-colour channel of the course
    /// mesh. Ids are stored in steps of ten; anything past `Hole` is treated
    /// as fairway.
    ///
    /// # Arguments
    /// * `red` - Red channel byte of the first vertex of a triangle
    ///
    /// # Returns
    /// The decoded terrain id
    pub fn from_colour_channel(red: u8) -> Self {
        Self::ALL
            .get(usize::from(red / 10))
            .copied()
            .unwrap_or(TerrainId::Fairway)
    }

    /// Water and scrub send the ball back into play with a penalty.
    pub fn is_out_of_bounds(self) -> bool {
        matches!(self, TerrainId::Water | TerrainId::Scrub)
    }

    /// Terrain a relocated ball may be dropped onto.
    pub fn is_valid_drop(self) -> bool {
        matches!(self, TerrainId::Rough | TerrainId::Fairway | TerrainId::Green)
    }
}

/// Simulation state of a ball.
///
/// # Variants
/// * `Idle` - At rest between strokes, no physics
/// * `Flight` - Airborne, integrated in sub-steps
/// * `Roll` - Rolling on fairway or stone
/// * `Putt` - Rolling on (or over) the green
/// * `Paused` - Settled, waiting to report the end of the turn
/// * `Reset` - Out of bounds, waiting to be relocated
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize,
)]
pub enum BallState {
    #[default]
    Idle,
    Flight,
    Roll,
    Putt,
    Paused,
    Reset,
}

impl BallState {
    /// States in which the ball is moving under simulation.
    pub fn is_moving(self) -> bool {
        matches!(self, BallState::Flight | BallState::Roll | BallState::Putt)
    }

    /// States in which the ball is settled and its velocity is zero.
    pub fn is_stopped(self) -> bool {
        matches!(self, BallState::Paused | BallState::Reset)
    }
}

/// How a resting ball sits in the terrain.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
pub enum Lie {
    Buried = 0,
    #[default]
    SittingUp = 1,
}

/// Selects how the results of a tick leave the simulation.
///
/// The same tick code runs in every mode; only event routing differs.
///
/// # Variants
/// * `RealTime` - Normal per-tick play, every event is forwarded
/// * `FastForward` - Synchronous resolution of a whole stroke. Gameplay
///   events are forwarded, achievement and analytics hooks are dropped
/// * `Prediction` - Speculative run for shot planning, nothing is forwarded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect)]
pub enum SimulationMode {
    #[default]
    RealTime,
    FastForward,
    Prediction,
}

impl SimulationMode {
    /// Achievement/sound hooks only make sense for a human-paced turn.
    pub fn allows_side_effects(self) -> bool {
        self == SimulationMode::RealTime
    }
}

/// Result of a terrain ray query.
///
/// # Fields
/// * `terrain` - Terrain of the nearest triangle hit
/// * `trigger` - Trigger id of that triangle (0 = none)
/// * `normal` - Unit surface normal, facing the ray origin
/// * `intersection` - World-space hit point
/// * `penetration` - Signed depth of the query origin below the surface along
///   the ray. Positive means the ball has sunk into the ground.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_golf_ball::types::{TerrainId, TerrainQueryResult};
///
/// let hit = TerrainQueryResult {
///     terrain: TerrainId::Fairway,
///     trigger: 0,
///     normal: Vec3::Y,
///     intersection: Vec3::ZERO,
///     penetration: 0.01,
/// };
/// assert!(hit.is_below_surface());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainQueryResult {
    pub terrain: TerrainId,
    pub trigger: u8,
    pub normal: Vec3,
    pub intersection: Vec3,
    pub penetration: f32,
}

impl TerrainQueryResult {
    pub fn is_below_surface(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Terrain query abstraction over the course collision world.
///
/// Implemented by [`crate::terrain::TerrainWorld`] and, with the `avian`
/// feature, by an adapter over avian's spatial query pipeline. Everything
/// in the simulation talks to the collision world through this trait.
pub trait TerrainQuery {
    /// Cast a ray centred on `origin`.
    ///
    /// The ray starts half of `length` behind `origin` and ends half of
    /// `length` ahead of it, so a unit downward direction samples a
    /// symmetric window around the ball.
    ///
    /// # Arguments
    /// * `origin` - Centre of the ray
    /// * `direction` - Unit direction of the ray
    /// * `length` - Total length of the ray
    ///
    /// # Returns
    /// The nearest hit, or `None` when the ray misses all geometry. Callers
    /// treat a miss as water.
    fn query(&self, origin: Vec3, direction: Vec3, length: f32) -> Option<TerrainQueryResult>;

    /// Vertical query through `position`, the common case.
    fn query_down(&self, position: Vec3, length: f32) -> Option<TerrainQueryResult> {
        self.query(position, Vec3::NEG_Y, length)
    }
}

/// Club category implied by the stroke, deciding the starting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum ClubKind {
    #[default]
    Full,
    Putter,
}

/// Stroke parameters handed over by the stroke initiator.
///
/// # Fields
/// * `impulse` - Initial velocity of the ball (m/s)
/// * `spin` - Side spin (x) and top spin (y, negative for back spin)
/// * `club` - Full shot or putt
/// * `delay` - Time to wait before the ball leaves (swing animation)
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_golf_ball::types::{ClubKind, StrokeParams};
///
/// let stroke = StrokeParams::new(Vec3::new(30.0, 20.0, 0.0))
///     .with_spin(Vec2::new(0.0, -0.3))
///     .with_delay(1.17);
/// assert_eq!(stroke.club, ClubKind::Full);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StrokeParams {
    pub impulse: Vec3,
    pub spin: Vec2,
    pub club: ClubKind,
    pub delay: f32,
}

impl StrokeParams {
    pub fn new(impulse: Vec3) -> Self {
        Self {
            impulse,
            ..Default::default()
        }
    }

    /// Builder pattern: set spin.
    pub fn with_spin(mut self, spin: Vec2) -> Self {
        self.spin = spin;
        self
    }

    /// Builder pattern: mark as a putt.
    pub fn putt(mut self) -> Self {
        self.club = ClubKind::Putter;
        self
    }

    /// Builder pattern: set the strike delay in seconds.
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}
