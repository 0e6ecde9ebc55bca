//! # Bevy Golf Ball
//!
//! Authoritative golf ball simulation plugin for Bevy 0.18.
//!
//! ## Features
//! - Sub-stepped flight with wind and side spin
//! - Per-terrain bounce, roll and putt behaviour
//! - Cup capture, lip-outs, flagpole strikes and gimmes
//! - Out-of-bounds relocation towards the stroke's start
//! - Deterministic wind from a seeded noise table
//! - Fast-forward and shot prediction for server-side play
//! - Terrain from a triangle mesh, or avian colliders via the `avian` feature
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_golf_ball::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(GolfBallPluginGroup)
//!         .run();
//! }
//! ```

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
pub mod terrain;
pub mod types;

pub mod prelude {
    pub use crate::components::*;
    pub use crate::events::*;
    pub use crate::resources::*;
    pub use crate::terrain::*;
    pub use crate::types::*;
    pub use crate::GolfBallPluginGroup;
    pub use crate::{GolfBallCorePlugin, GolfBallDebugPlugin, GolfBallSystems};
}

use bevy::prelude::*;

/// System set containing every simulation system in `FixedUpdate`.
///
/// Order gameplay systems that read [`events::BallEvent`] after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GolfBallSystems;

/// Main plugin group that includes all golf ball subsystems.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_golf_ball::prelude::*;
///
/// fn main() {
///     App::new()
///         .add_plugins(DefaultPlugins)
///         .add_plugins(GolfBallPluginGroup)
///         .run();
/// }
/// ```
#[derive(Default)]
pub struct GolfBallPluginGroup;

impl PluginGroup for GolfBallPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(GolfBallCorePlugin)
            .add(GolfBallDebugPlugin)
    }
}

/// Core simulation plugin.
///
/// Runs headless; only needs `Time<Fixed>` and the `FixedUpdate` schedule.
/// Balls are simulated once a hole has been loaded with
/// [`events::LoadHole`].
///
/// # Systems
/// - `apply_hole_data` - Rebuilds the collision world on hole load
/// - `handle_stroke_commands` - Starts strokes on idle balls
/// - `handle_spawn_bullseye` - Activates the minigame target
/// - `update_wind` - Advances the match wind
/// - `advance_balls` - Integrates every ball in play
/// - `separate_balls` - Keeps balls from overlapping
/// - `handle_fast_forward_requests` - Resolves strokes immediately
/// - `handle_prediction_requests` - Answers shot predictions
/// - `sync_ball_transforms` - Copies ball positions to transforms
pub struct GolfBallCorePlugin;

impl Plugin for GolfBallCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::Ball>()
            .register_type::<resources::BallConfig>()
            .register_type::<resources::HoleContext>()
            .register_type::<resources::BullsEye>()
            .register_type::<resources::WindSettings>()
            .init_resource::<resources::BallConfig>()
            .init_resource::<resources::WindSettings>()
            .init_resource::<resources::WindState>()
            .init_resource::<resources::HoleContext>()
            .init_resource::<resources::BullsEye>()
            .add_message::<events::BallEvent>()
            .add_message::<events::BullsEyeEvent>()
            .add_message::<events::FlagPoleEvent>()
            .add_message::<events::TriggerEvent>()
            .add_message::<events::StrokeCommand>()
            .add_message::<events::LoadHole>()
            .add_message::<events::FastForwardRequest>()
            .add_message::<events::PredictionRequest>()
            .add_message::<events::PredictionResult>()
            .add_message::<events::SpawnBullsEye>()
            .add_systems(
                FixedUpdate,
                (
                    systems::logic::apply_hole_data,
                    systems::logic::handle_stroke_commands,
                    systems::bullseye::handle_spawn_bullseye,
                    systems::wind::update_wind,
                    systems::kinematics::advance_balls
                        .run_if(resource_exists::<terrain::TerrainWorld>),
                    systems::collision::separate_balls,
                    (
                        systems::prediction::handle_fast_forward_requests,
                        systems::prediction::handle_prediction_requests,
                    )
                        .run_if(resource_exists::<terrain::TerrainWorld>),
                    systems::kinematics::sync_ball_transforms,
                )
                    .chain()
                    .in_set(GolfBallSystems),
            );

        // Avian colliders stand in for the terrain mesh when no hole mesh is loaded
        #[cfg(feature = "avian")]
        {
            use avian3d::prelude::SpatialQueryPipeline;
            app.register_type::<components::TerrainSurface>().add_systems(
                FixedUpdate,
                systems::kinematics::advance_balls_spatial
                    .after(systems::wind::update_wind)
                    .before(systems::collision::separate_balls)
                    .in_set(GolfBallSystems)
                    .run_if(
                        not(resource_exists::<terrain::TerrainWorld>)
                            .and(resource_exists::<SpatialQueryPipeline>),
                    ),
            );
        }
    }
}

/// Debug plugin for ball, pin and bullseye visualization.
pub struct GolfBallDebugPlugin;

impl Plugin for GolfBallDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, systems::debug::draw_ball_debug);
    }
}
