//! Events for the golf ball simulation.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Ball;
use crate::resources::HoleContext;
use crate::terrain::TerrainMesh;
use crate::types::{BallState, StrokeParams, TerrainId};

/// Kind of a [`BallEvent`].
///
/// # Variants
/// * `Landed` - The ball came to rest (or went out of bounds)
/// * `Holed` - The turn ended with the ball in the cup
/// * `TurnEnded` - The turn ended with the ball on the course
/// * `Foul` - An out-of-bounds ball was relocated; the player takes a penalty
/// * `Gimme` - The ball was conceded inside the gimme radius
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum BallEventKind {
    Landed,
    Holed,
    TurnEnded,
    Foul,
    Gimme,
}

/// Gameplay event raised by a ball, consumed by scoring and the network layer.
///
/// # Fields
/// * `kind` - What happened
/// * `state` - Ball state after the event
/// * `terrain` - Terrain at the event position
/// * `position` - Ball position, or the pin for `Holed`
/// * `client` - Owning player
/// * `distance` - Horizontal distance from the stroke's start point (m)
#[derive(Message, Clone, Debug, PartialEq)]
pub struct BallEvent {
    pub kind: BallEventKind,
    pub state: BallState,
    pub terrain: TerrainId,
    pub position: Vec3,
    pub client: u64,
    pub distance: f32,
}

impl BallEvent {
    /// Creates an event describing `ball` as it is now.
    ///
    /// # Arguments
    /// * `kind` - Event kind
    /// * `ball` - Ball raising the event
    ///
    /// # Returns
    /// An event positioned at the ball
    pub fn new(kind: BallEventKind, ball: &Ball) -> Self {
        Self {
            kind,
            state: ball.state,
            terrain: ball.terrain,
            position: ball.position,
            client: ball.client,
            distance: ball.stroke_distance(),
        }
    }

    /// Builder pattern: override the reported terrain.
    pub fn with_terrain(mut self, terrain: TerrainId) -> Self {
        self.terrain = terrain;
        self
    }

    /// Builder pattern: override the reported position.
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Whether this event ends the turn.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, BallEventKind::Holed | BallEventKind::TurnEnded)
    }
}

/// Minigame accuracy against the [`crate::resources::BullsEye`].
///
/// `accuracy` is 1 at the centre and falls to 0 at the target's rim.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct BullsEyeEvent {
    pub client: u64,
    pub accuracy: f32,
    pub position: Vec3,
}

/// The ball struck the flagpole. Cosmetic/sound hook, distinct from terrain
/// landings.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct FlagPoleEvent {
    pub position: Vec3,
    pub client: u64,
}

/// The ball touched a triangle tagged with a trigger id. Achievement/sound
/// hook, raised once per trigger per stroke during real-time play only.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct TriggerEvent {
    pub trigger: u8,
    pub position: Vec3,
    pub client: u64,
}

/// Any event the simulation can produce during a tick.
///
/// The tick code collects these into a plain buffer; the caller decides
/// whether to forward them (see [`SimEventWriters`]).
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    Ball(BallEvent),
    BullsEye(BullsEyeEvent),
    FlagPole(FlagPoleEvent),
    Trigger(TriggerEvent),
}

impl SimEvent {
    pub fn as_ball_event(&self) -> Option<&BallEvent> {
        match self {
            SimEvent::Ball(event) => Some(event),
            _ => None,
        }
    }
}

impl From<BallEvent> for SimEvent {
    fn from(event: BallEvent) -> Self {
        SimEvent::Ball(event)
    }
}

/// Writers for every outgoing simulation message.
#[derive(SystemParam)]
pub struct SimEventWriters<'w> {
    pub ball: MessageWriter<'w, BallEvent>,
    pub bullseye: MessageWriter<'w, BullsEyeEvent>,
    pub flag_pole: MessageWriter<'w, FlagPoleEvent>,
    pub trigger: MessageWriter<'w, TriggerEvent>,
}

impl SimEventWriters<'_> {
    /// Forwards one collected event to its message channel.
    pub fn send(&mut self, event: SimEvent) {
        match event {
            SimEvent::Ball(event) => {
                self.ball.write(event);
            }
            SimEvent::BullsEye(event) => {
                self.bullseye.write(event);
            }
            SimEvent::FlagPole(event) => {
                self.flag_pole.write(event);
            }
            SimEvent::Trigger(event) => {
                self.trigger.write(event);
            }
        }
    }

    pub fn send_all(&mut self, events: impl IntoIterator<Item = SimEvent>) {
        for event in events {
            self.send(event);
        }
    }
}

/// Starts a stroke on an idle ball.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_golf_ball::events::StrokeCommand;
/// use bevy_golf_ball::types::StrokeParams;
///
/// let command = StrokeCommand::new(
///     Entity::PLACEHOLDER,
///     StrokeParams::new(Vec3::new(25.0, 18.0, 0.0)),
/// );
/// assert_eq!(command.params.delay, 0.0);
/// ```
#[derive(Message, Clone, Debug)]
pub struct StrokeCommand {
    pub entity: Entity,
    pub params: StrokeParams,
}

impl StrokeCommand {
    pub fn new(entity: Entity, params: StrokeParams) -> Self {
        Self { entity, params }
    }
}

/// Loads a new hole: replaces the [`HoleContext`] and rebuilds the
/// collision world from `mesh`.
#[derive(Message, Clone, Debug)]
pub struct LoadHole {
    pub hole: HoleContext,
    pub mesh: TerrainMesh,
}

/// Resolves the current stroke of `entity` synchronously, forwarding its
/// gameplay events.
#[derive(Message, Clone, Copy, Debug)]
pub struct FastForwardRequest {
    pub entity: Entity,
}

/// Asks where a hypothetical stroke from the current position of `entity`
/// would come to rest. The ball itself is not modified.
///
/// `accuracy` is the prediction time step in seconds; coarser steps are
/// cheaper and less exact.
#[derive(Message, Clone, Debug)]
pub struct PredictionRequest {
    pub entity: Entity,
    pub params: StrokeParams,
    pub accuracy: f32,
}

/// Result of a shot prediction.
///
/// # Fields
/// * `event` - The resting event, or `None` when the step budget ran out
/// * `position` - Ball position when the prediction stopped
/// * `terrain` - Terrain under the ball when the prediction stopped
/// * `steps` - Number of ticks simulated
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionOutcome {
    pub event: Option<BallEvent>,
    pub position: Vec3,
    pub terrain: TerrainId,
    pub steps: u32,
}

/// Answer to a [`PredictionRequest`].
#[derive(Message, Clone, Debug)]
pub struct PredictionResult {
    pub entity: Entity,
    pub outcome: PredictionOutcome,
}

/// Activates a bullseye near the hole target. The seed makes placement
/// reproducible.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct SpawnBullsEye {
    pub seed: u64,
}
