//! Bullseye and gimme detection - 2D radius tests on the horizontal plane.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::events::{BullsEyeEvent, SpawnBullsEye};
use crate::resources::{BullsEye, HoleContext};

/// Accuracy of `position` against a circular target.
///
/// # Arguments
/// * `position` - Point to test
/// * `centre` - Target centre
/// * `radius` - Target radius
///
/// # Returns
/// 1 at the centre falling linearly to 0 at the rim, `None` outside the
/// target or for a degenerate radius
pub fn target_accuracy(position: Vec3, centre: Vec3, radius: f32) -> Option<f32> {
    if !(radius > 0.0) {
        return None;
    }
    let distance = (position.xz() - centre.xz()).length();
    (distance <= radius).then(|| 1.0 - distance / radius)
}

/// Whether `position` lies within the gimme radius of the pin.
///
/// A zero squared radius disables the gimme.
pub fn is_within_gimme(position: Vec3, pin: Vec3, radius_squared: f32) -> bool {
    radius_squared > 0.0 && (position.xz() - pin.xz()).length_squared() <= radius_squared
}

/// Scores a ball's first landing against the bullseye.
///
/// # Returns
/// An event when the target is active and the landing is inside it
pub fn check_bullseye(bullseye: &BullsEye, position: Vec3, client: u64) -> Option<BullsEyeEvent> {
    if !bullseye.spawn {
        return None;
    }
    target_accuracy(position, bullseye.position, bullseye.radius()).map(|accuracy| BullsEyeEvent {
        client,
        accuracy,
        position,
    })
}

/// Activate the bullseye near the hole target on request.
pub fn handle_spawn_bullseye(
    mut requests: MessageReader<SpawnBullsEye>,
    hole: Res<HoleContext>,
    mut bullseye: ResMut<BullsEye>,
) {
    for request in requests.read() {
        let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
        *bullseye = BullsEye::spawn_near(hole.target, &mut rng);
        debug!(
            "Bullseye spawned at {:?}, diameter {:.2}m",
            bullseye.position, bullseye.diameter
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_falls_off_to_rim() {
        let centre = Vec3::new(10.0, 0.0, 10.0);
        assert_eq!(target_accuracy(centre, centre, 1.0), Some(1.0));

        let half = target_accuracy(centre + Vec3::new(0.5, 3.0, 0.0), centre, 1.0).unwrap();
        assert!((half - 0.5).abs() < 1e-6);

        assert_eq!(target_accuracy(centre + Vec3::X * 1.5, centre, 1.0), None);
        assert_eq!(target_accuracy(centre, centre, 0.0), None);
    }

    #[test]
    fn test_gimme_radius_check() {
        let pin = Vec3::new(0.0, 1.0, 0.0);
        let r2 = 0.65 * 0.65;
        assert!(is_within_gimme(Vec3::new(0.5, 1.0, 0.0), pin, r2));
        assert!(!is_within_gimme(Vec3::new(0.7, 1.0, 0.0), pin, r2));
        assert!(!is_within_gimme(pin, pin, 0.0));
    }

    #[test]
    fn test_inactive_bullseye_scores_nothing() {
        let bullseye = BullsEye::default();
        assert!(check_bullseye(&bullseye, bullseye.position, 1).is_none());

        let active = BullsEye {
            spawn: true,
            ..Default::default()
        };
        let event = check_bullseye(&active, active.position, 1).unwrap();
        assert_eq!(event.accuracy, 1.0);
        assert_eq!(event.client, 1);
    }
}
