//! Global resources for the golf ball simulation.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::types::{TerrainId, TerrainQuery};

/// Gimme setting for the round.
///
/// A ball resting on the green within the configured radius of the pin is
/// conceded and finishes the hole without another stroke.
///
/// # Variants
/// * `None` - No gimme
/// * `Leather` - Within the length of a putter grip
/// * `Putter` - Within the length of a putter
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
pub enum GimmeRadius {
    #[default]
    None,
    Leather,
    Putter,
}

impl GimmeRadius {
    /// Maps a lobby setting index {0, 1, 2} to a gimme radius. Unknown
    /// values disable the gimme.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => GimmeRadius::Leather,
            2 => GimmeRadius::Putter,
            _ => GimmeRadius::None,
        }
    }

    /// Radius in metres.
    pub fn radius(self) -> f32 {
        match self {
            GimmeRadius::None => 0.0,
            GimmeRadius::Leather => 0.65,
            GimmeRadius::Putter => 1.0,
        }
    }

    /// Squared radius, compared against squared horizontal distances.
    pub fn radius_squared(self) -> f32 {
        self.radius() * self.radius()
    }
}

/// Global configuration for the golf ball simulation.
///
/// Every tunable of the ball state machine lives here. Positions of a ball
/// are measured at its contact point with the ground, so `ball_radius` is
/// only used for thresholds.
///
/// # Example
/// ```
/// use bevy_golf_ball::resources::{BallConfig, GimmeRadius};
///
/// let config = BallConfig {
///     gimme: GimmeRadius::Putter,
///     debug_draw: true,
///     ..Default::default()
/// };
/// assert_eq!(config.substeps, 3);
/// ```
#[derive(Resource, Reflect, Clone, Debug, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct BallConfig {
    /// Gravity acceleration (m/s², applied downwards)
    pub gravity: f32,
    /// Ball radius (m)
    pub ball_radius: f32,
    /// Cup radius (m). A ball is over the hole when its squared horizontal
    /// distance to the pin is below the square of this.
    pub hole_radius: f32,
    /// Depth a ball must sink below the cup rim to count as holed (m)
    pub cup_depth: f32,
    /// Flight integration sub-steps per tick
    pub substeps: u32,
    /// Squared speed below which a ball is considered stopped (m²/s²)
    pub stop_speed_squared: f32,
    /// Incoming vertical velocity above which a landing on fairway, stone
    /// or green starts a roll instead of a bounce (m/s, negative)
    pub roll_threshold: f32,
    /// Surface normal Y above which a slow ball is allowed to settle
    pub rest_normal_y: f32,
    /// Constant rolling resistance on the ground (m/s²)
    pub rolling_resistance: f32,
    /// Delay between a ball settling and the end of the turn (s)
    pub turn_delay: f32,
    /// Time an out-of-bounds ball is held before it is relocated (s)
    pub reset_delay: f32,
    /// Pause after a relocation before the turn ends (s)
    pub reset_pause: f32,
    /// Roll duration after which slope forces have faded and the ball is stopped (s)
    pub roll_timeout: f32,
    /// Putt duration after which the ball is stopped (s)
    pub putt_timeout: f32,
    /// Scale of the wind acceleration during flight
    pub wind_effect: f32,
    /// Scale of the wind drift on the green
    pub putt_wind_effect: f32,
    /// Top spin contribution to roll acceleration (m/s² per unit spin)
    pub top_spin_roll: f32,
    /// Side spin contribution to lateral flight acceleration (m/s² per unit spin)
    pub side_spin_force: f32,
    /// Radius around the pin in which a putt is drawn towards the cup (m)
    pub attraction_radius: f32,
    /// Strength of the draw towards the cup (m/s²)
    pub attraction_force: f32,
    /// Flagpole radius (m)
    pub flag_pole_radius: f32,
    /// Flagpole height above the pin (m)
    pub flag_pole_height: f32,
    /// Maximum speed of a ball deflected by the flagpole (m/s)
    pub flag_pole_max_speed: f32,
    /// Gimme setting
    pub gimme: GimmeRadius,
    /// Height under which a ball that missed all geometry is in the water (m)
    pub water_level: f32,
    /// Length of the per-tick terrain ray (m)
    pub terrain_ray_length: f32,
    /// Length of the terrain ray used when relocating a ball (m)
    pub reset_ray_length: f32,
    /// Debug visualization
    pub debug_draw: bool,
}

impl Default for BallConfig {
    /// Creates a default BallConfig with standard ball and cup sizes.
    ///
    /// Default values:
    /// - Gravity: 9.8 m/s²
    /// - Ball radius: 0.0215 m, cup radius: 0.058 m
    /// - 3 flight sub-steps
    /// - Turn delay: 2.5 s, reset pause: 0.5 s
    /// - No gimme
    /// - Debug drawing disabled
    fn default() -> Self {
        Self {
            gravity: 9.8,
            ball_radius: 0.0215,
            hole_radius: 0.058,
            cup_depth: 0.0215,
            substeps: 3,
            stop_speed_squared: 0.01,
            roll_threshold: -2.5,
            rest_normal_y: 0.985,
            rolling_resistance: 0.25,
            turn_delay: 2.5,
            reset_delay: 2.5,
            reset_pause: 0.5,
            roll_timeout: 6.0,
            putt_timeout: 10.0,
            wind_effect: 1.0,
            putt_wind_effect: 0.06,
            top_spin_roll: 1.5,
            side_spin_force: 2.0,
            attraction_radius: 0.25,
            attraction_force: 0.4,
            flag_pole_radius: 0.01,
            flag_pole_height: 1.9,
            flag_pole_max_speed: 8.0,
            gimme: GimmeRadius::None,
            water_level: -0.02,
            terrain_ray_length: 20.0,
            reset_ray_length: 400.0,
            debug_draw: false,
        }
    }
}

impl BallConfig {
    /// Gravity as an acceleration vector.
    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::NEG_Y * self.gravity
    }

    /// Distance under which two balls are overlapping.
    pub fn min_ball_separation(&self) -> f32 {
        self.ball_radius * 2.0
    }
}

/// Course data for the current hole.
///
/// Read-only while balls are simulated; replaced between rounds of ticking
/// when a new hole is loaded.
///
/// # Fields
/// * `pin` - Position of the cup
/// * `tee` - Tee position, the last-resort relocation target
/// * `target` - Aim point for the hole (used by CPU players)
/// * `subtarget` - Secondary aim point, e.g. a dog-leg corner
/// * `putt_from_tee` - The tee lies on the green (putting course)
#[derive(Resource, Reflect, Clone, Debug, Default, PartialEq)]
#[reflect(Resource)]
pub struct HoleContext {
    pub pin: Vec3,
    pub tee: Vec3,
    pub target: Vec3,
    pub subtarget: Vec3,
    pub putt_from_tee: bool,
}

impl HoleContext {
    pub fn new(pin: Vec3, tee: Vec3) -> Self {
        Self {
            pin,
            tee,
            target: pin,
            subtarget: pin,
            putt_from_tee: false,
        }
    }

    /// Builder pattern: set the aim points.
    pub fn with_targets(mut self, target: Vec3, subtarget: Vec3) -> Self {
        self.target = target;
        self.subtarget = subtarget;
        self
    }

    /// Classifies the tee and flags the hole as a putting course when it
    /// lies on the green.
    ///
    /// # Arguments
    /// * `terrain` - Collision world of the hole
    /// * `ray_length` - Length of the vertical query through the tee
    pub fn detect_putt_from_tee(&mut self, terrain: &dyn TerrainQuery, ray_length: f32) {
        self.putt_from_tee = terrain
            .query_down(self.tee, ray_length)
            .is_some_and(|hit| hit.terrain == TerrainId::Green);
    }

    /// Horizontal squared distance from `position` to the pin.
    pub fn pin_distance_squared(&self, position: Vec3) -> f32 {
        (position.xz() - self.pin.xz()).length_squared()
    }
}

/// Optional minigame target.
///
/// # Fields
/// * `position` - Centre of the target
/// * `diameter` - Diameter of the scoring area (m)
/// * `spawn` - Whether the target is active
#[derive(Resource, Reflect, Clone, Debug, PartialEq)]
#[reflect(Resource)]
pub struct BullsEye {
    pub position: Vec3,
    pub diameter: f32,
    pub spawn: bool,
}

impl Default for BullsEye {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            diameter: 2.0,
            spawn: false,
        }
    }
}

impl BullsEye {
    /// Places an active target of random size a few metres from `target`.
    ///
    /// # Arguments
    /// * `target` - Aim point of the hole
    /// * `rng` - Random source
    ///
    /// # Returns
    /// An active BullsEye
    pub fn spawn_near(target: Vec3, rng: &mut impl Rng) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let distance = rng.random_range(2.0..6.0);
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * distance;

        Self {
            position: target + offset,
            diameter: rng.random_range(1.0..3.0),
            spawn: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.diameter * 0.5
    }
}

/// Wind model settings.
///
/// Ranges are `(min, max)` in seconds. The seed makes the whole wind
/// sequence reproducible.
#[derive(Resource, Reflect, Clone, Debug, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct WindSettings {
    /// Seed for the wind random stream
    pub seed: u64,
    /// Time between direction changes
    pub direction_period: (f32, f32),
    /// Time between strength changes
    pub strength_period: (f32, f32),
    /// Duration of the blend towards a new target
    pub interpolation_window: (f32, f32),
    /// Mean of the strength noise table
    pub strength_mean: f32,
    /// Standard deviation of the strength noise table
    pub strength_deviation: f32,
}

impl Default for WindSettings {
    fn default() -> Self {
        Self {
            seed: 0x5eed_901f,
            direction_period: (10.0, 22.0),
            strength_period: (8.0, 18.0),
            interpolation_window: (1.0, 2.5),
            strength_mean: 0.5,
            strength_deviation: 0.25,
        }
    }
}

/// Turns a drawn pair of XZ components into a unit direction.
///
/// A zero draw has no direction and points along +Z instead.
pub(crate) fn direction_from_draw(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 0.0, z).normalize_or(Vec3::Z)
}

/// Number of entries in the wind strength noise table.
pub const WIND_NOISE_TABLE_SIZE: usize = 256;

/// Current wind of the match.
///
/// Direction and strength each blend from a source towards a target over an
/// interpolation window. Strength targets are read from a precomputed noise
/// table with a wrapping index, direction targets are drawn from a seeded
/// ChaCha8 stream. Cloning the state clones the stream, so a clone evolves
/// exactly like its source.
#[derive(Resource, Clone)]
pub struct WindState {
    /// Current unit direction in the XZ plane
    pub direction: Vec3,
    /// Current strength (m/s² at a wind effect of 1)
    pub strength: f32,
    pub(crate) direction_source: Vec3,
    pub(crate) direction_target: Vec3,
    pub(crate) strength_source: f32,
    pub(crate) strength_target: f32,
    pub(crate) interp_elapsed: f32,
    pub(crate) interp_duration: f32,
    pub(crate) direction_timer: f32,
    pub(crate) direction_period: f32,
    pub(crate) strength_timer: f32,
    pub(crate) strength_period: f32,
    pub(crate) noise: Vec<f32>,
    pub(crate) noise_index: usize,
    pub(crate) settings: WindSettings,
    pub(crate) rng: ChaCha8Rng,
}

impl WindState {
    /// Creates the wind for a new match.
    ///
    /// # Arguments
    /// * `settings` - Wind timers and seed
    ///
    /// # Returns
    /// A WindState at rest with its first targets already drawn
    pub fn new(settings: &WindSettings) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
        let noise = build_noise_table(&mut rng, settings.strength_mean, settings.strength_deviation);

        let mut wind = Self {
            direction: Vec3::NEG_X,
            strength: 0.0,
            direction_source: Vec3::NEG_X,
            direction_target: Vec3::X,
            strength_source: 0.0,
            strength_target: 0.1,
            interp_elapsed: 0.0,
            interp_duration: 1.0,
            direction_timer: 0.0,
            direction_period: 0.0,
            strength_timer: 0.0,
            strength_period: 1.0,
            noise,
            noise_index: 0,
            settings: settings.clone(),
            rng,
        };
        wind.direction_target = wind.draw_direction();
        wind.strength_target = wind.next_noise();
        wind
    }

    /// Creates a wind that never changes.
    ///
    /// # Arguments
    /// * `direction` - Direction, flattened to the XZ plane
    /// * `strength` - Constant strength
    pub fn fixed(direction: Vec3, strength: f32) -> Self {
        let mut wind = Self::new(&WindSettings::default());
        let direction = Vec3::new(direction.x, 0.0, direction.z).normalize_or(Vec3::NEG_X);

        wind.direction = direction;
        wind.direction_source = direction;
        wind.direction_target = direction;
        wind.strength = strength;
        wind.strength_source = strength;
        wind.strength_target = strength;
        wind.direction_period = f32::INFINITY;
        wind.strength_period = f32::INFINITY;
        wind
    }

    /// Creates a still wind that never changes.
    pub fn calm() -> Self {
        Self::fixed(Vec3::X, 0.0)
    }

    /// Wind acceleration at the current time.
    pub fn force(&self) -> Vec3 {
        self.direction * self.strength
    }

    /// Direction with the strength packed in the unused Y component, the
    /// format sent to clients.
    pub fn packed_direction(&self) -> Vec3 {
        Vec3::new(self.direction.x, self.strength, self.direction.z)
    }

    /// Forces new direction and strength targets on the next update.
    pub fn force_change(&mut self) {
        self.direction_timer = self.direction_period;
        self.strength_timer = self.strength_period;
        if !self.direction_period.is_finite() || !self.strength_period.is_finite() {
            self.direction_period = 0.0;
            self.strength_period = 0.0;
            self.direction_timer = 0.0;
            self.strength_timer = 0.0;
        }
    }

    pub(crate) fn draw_direction(&mut self) -> Vec3 {
        let x = self.rng.random_range(-10..=10) as f32 / 10.0;
        let z = self.rng.random_range(-10..=10) as f32 / 10.0;
        direction_from_draw(x, z)
    }

    pub(crate) fn next_noise(&mut self) -> f32 {
        let value = self.noise[self.noise_index];
        self.noise_index = (self.noise_index + 1) % self.noise.len();
        value
    }

    pub(crate) fn draw_period(&mut self, range: (f32, f32)) -> f32 {
        draw_range(&mut self.rng, range)
    }
}

fn draw_range(rng: &mut ChaCha8Rng, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

fn build_noise_table(rng: &mut ChaCha8Rng, mean: f32, deviation: f32) -> Vec<f32> {
    match Normal::new(mean, deviation) {
        Ok(normal) => (0..WIND_NOISE_TABLE_SIZE)
            .map(|_| normal.sample(rng).clamp(0.1, 1.0))
            .collect(),
        Err(err) => {
            warn!("Invalid wind noise parameters ({err}), using a uniform table");
            (0..WIND_NOISE_TABLE_SIZE)
                .map(|_| rng.random_range(1..=10) as f32 / 10.0)
                .collect()
        }
    }
}

impl FromWorld for WindState {
    fn from_world(world: &mut World) -> Self {
        let settings = world
            .get_resource::<WindSettings>()
            .cloned()
            .unwrap_or_default();
        Self::new(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gimme_radius_mapping() {
        assert_eq!(GimmeRadius::from_index(0).radius_squared(), 0.0);
        assert_eq!(GimmeRadius::from_index(1), GimmeRadius::Leather);
        assert_eq!(GimmeRadius::from_index(2), GimmeRadius::Putter);
        assert_eq!(GimmeRadius::from_index(7), GimmeRadius::None);
        assert!(GimmeRadius::Putter.radius_squared() > GimmeRadius::Leather.radius_squared());
    }

    #[test]
    fn test_noise_table_is_seeded() {
        let a = WindState::new(&WindSettings::default());
        let b = WindState::new(&WindSettings::default());
        let c = WindState::new(&WindSettings {
            seed: 42,
            ..Default::default()
        });

        assert_eq!(a.noise.len(), WIND_NOISE_TABLE_SIZE);
        assert_eq!(a.noise, b.noise);
        assert_ne!(a.noise, c.noise);
        assert!(a.noise.iter().all(|s| (0.1..=1.0).contains(s)));
    }

    #[test]
    fn test_noise_index_wraps() {
        let mut wind = WindState::new(&WindSettings::default());
        let first = wind.noise[0];
        wind.noise_index = WIND_NOISE_TABLE_SIZE - 1;
        wind.next_noise();
        assert_eq!(wind.noise_index, 0);
        assert_eq!(wind.next_noise(), first);
    }

    #[test]
    fn test_zero_direction_draw() {
        let direction = direction_from_draw(0.0, 0.0);
        assert!(direction.is_finite());
        assert_eq!(direction.y, 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-6);

        assert_eq!(direction_from_draw(-0.5, 0.0), Vec3::NEG_X);
        let diagonal = direction_from_draw(0.3, 0.3);
        assert!((diagonal.length() - 1.0).abs() < 1e-6);
        assert!((diagonal.x - diagonal.z).abs() < 1e-6);
    }

    #[test]
    fn test_packed_direction() {
        let wind = WindState::fixed(Vec3::new(0.0, 5.0, 1.0), 0.7);
        assert_eq!(wind.packed_direction(), Vec3::new(0.0, 0.7, 1.0));
    }

    #[test]
    fn test_bullseye_spawns_near_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let target = Vec3::new(50.0, 1.0, 20.0);
        let bullseye = BullsEye::spawn_near(target, &mut rng);

        assert!(bullseye.spawn);
        let distance = bullseye.position.distance(target);
        assert!((2.0..6.0).contains(&distance));
        assert!((1.0..3.0).contains(&bullseye.diameter));
    }
}
