use bevy::prelude::*;

use crate::components::Ball;
use crate::resources::{BallConfig, BullsEye, HoleContext};
use crate::types::BallState;

/// Draw debug gizmos for balls, the flagpole and the bullseye.
///
/// Balls are drawn oversized so they stay visible from a course camera.
pub fn draw_ball_debug(
    mut gizmos: Gizmos,
    balls: Query<&Ball>,
    config: Res<BallConfig>,
    hole: Res<HoleContext>,
    bullseye: Res<BullsEye>,
) {
    if !config.debug_draw {
        return;
    }

    for ball in balls.iter() {
        let colour = match ball.state {
            BallState::Idle => Color::srgb(1.0, 1.0, 1.0),
            BallState::Flight => Color::srgb(1.0, 0.0, 0.0),
            BallState::Roll | BallState::Putt => Color::srgb(0.0, 0.6, 1.0),
            BallState::Paused => Color::srgb(0.0, 1.0, 0.0),
            BallState::Reset => Color::srgb(1.0, 0.0, 1.0),
        };
        gizmos.sphere(ball.position, 0.1, colour);

        // Velocity, scaled down for visibility
        let end = ball.position + ball.velocity * 0.1;
        gizmos.line(ball.position, end, Color::srgb(1.0, 1.0, 0.0));
    }

    let top = hole.pin + Vec3::Y * config.flag_pole_height;
    gizmos.line(hole.pin, top, Color::srgb(1.0, 1.0, 1.0));
    gizmos.circle(
        Isometry3d::new(hole.pin, Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        config.hole_radius,
        Color::srgb(0.1, 0.1, 0.1),
    );

    if bullseye.spawn {
        gizmos.circle(
            Isometry3d::new(bullseye.position, Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
            bullseye.radius(),
            Color::srgb(1.0, 0.3, 0.0),
        );
    }
}
