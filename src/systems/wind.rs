//! Wind model - slowly varying direction and strength.

use bevy::prelude::*;

use crate::resources::WindState;

/// Advance the match wind by one tick.
///
/// Runs in FixedUpdate every tick, whether or not any ball is moving.
///
/// # Arguments
/// * `time` - Bevy FixedTime resource to get delta time
/// * `wind` - Wind resource to advance
pub fn update_wind(time: Res<Time<Fixed>>, mut wind: ResMut<WindState>) {
    advance_wind(&mut wind, time.delta_secs());
}

/// Advances `wind` by `dt` seconds.
///
/// Blends the current direction and strength towards their targets, then
/// re-targets whichever timer has run out. Every re-target restarts the
/// blend from the current values, so changes are never instantaneous.
///
/// # Arguments
/// * `wind` - Wind state to advance
/// * `dt` - Time step in seconds
pub fn advance_wind(wind: &mut WindState, dt: f32) {
    if !(dt > 0.0) {
        return;
    }

    wind.interp_elapsed = (wind.interp_elapsed + dt).min(wind.interp_duration);
    let t = if wind.interp_duration > 0.0 {
        wind.interp_elapsed / wind.interp_duration
    } else {
        1.0
    };

    // Opposite source and target pass through zero half way
    let previous = wind.direction;
    wind.direction = wind
        .direction_source
        .lerp(wind.direction_target, t)
        .try_normalize()
        .unwrap_or(previous);
    wind.strength = wind.strength_source + (wind.strength_target - wind.strength_source) * t;

    let mut retarget = false;

    wind.direction_timer += dt;
    if wind.direction_timer >= wind.direction_period {
        wind.direction_timer = 0.0;
        let range = wind.settings.direction_period;
        wind.direction_period = wind.draw_period(range);
        wind.direction_target = wind.draw_direction();
        retarget = true;
    }

    wind.strength_timer += dt;
    if wind.strength_timer >= wind.strength_period {
        wind.strength_timer = 0.0;
        let range = wind.settings.strength_period;
        wind.strength_period = wind.draw_period(range);
        wind.strength_target = wind.next_noise();
        retarget = true;
    }

    if retarget {
        wind.direction_source = wind.direction;
        wind.strength_source = wind.strength;
        wind.interp_elapsed = 0.0;
        let window = wind.settings.interpolation_window;
        wind.interp_duration = wind.draw_period(window);
    }

    debug_assert!(
        wind.direction.is_finite() && wind.strength.is_finite(),
        "wind became non-finite"
    );
}
