use bevy::app::ScheduleRunnerPlugin;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_golf_ball::prelude::*;
use std::time::Duration;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))))
        .add_plugins(LogPlugin::default())
        .add_plugins(GolfBallCorePlugin)
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(BallConfig {
            gimme: GimmeRadius::Leather,
            ..Default::default()
        })
        .add_systems(Startup, setup_round)
        .add_systems(FixedUpdate, (play_strokes, report_events).after(GolfBallSystems))
        .run();
}

#[derive(Resource)]
struct Round {
    player: Entity,
    strokes: u32,
}

const MAX_STROKES: u32 = 8;

/// A straight par 3: fairway, a pond short of the green, and the green.
fn build_hole() -> LoadHole {
    let pin = Vec3::new(120.0, 0.0, 0.0);
    let tee = Vec3::new(-10.0, 0.0, 0.0);

    let mut mesh = TerrainMesh::default();
    mesh.push_rect(Vec2::new(-20.0, -40.0), Vec2::new(60.0, 40.0), 0.0, TerrainId::Fairway);
    mesh.push_rect(Vec2::new(60.0, -40.0), Vec2::new(80.0, 40.0), -0.4, TerrainId::Water);
    mesh.push_rect(Vec2::new(80.0, -40.0), Vec2::new(100.0, 40.0), 0.0, TerrainId::Rough);
    mesh.push_green_with_cup(pin, 20.0, 0.065);

    LoadHole {
        hole: HoleContext::new(pin, tee).with_targets(Vec3::new(110.0, 0.0, 0.0), pin),
        mesh,
    }
}

fn setup_round(mut commands: Commands, mut loads: MessageWriter<LoadHole>) {
    let hole = build_hole();
    let tee = hole.hole.tee;
    loads.write(hole);

    let player = commands
        .spawn((Ball::new(tee).with_client(1), Transform::from_translation(tee)))
        .id();
    commands.insert_resource(Round { player, strokes: 0 });
    info!("[SETUP] Ball on the tee at {:?}", tee);
}

/// Hit the next stroke whenever the ball is idle: a full shot off the
/// green, a putt weighted by distance on it.
fn play_strokes(
    terrain: Option<Res<TerrainWorld>>,
    hole: Res<HoleContext>,
    mut round: ResMut<Round>,
    balls: Query<&Ball>,
    mut strokes: MessageWriter<StrokeCommand>,
) {
    if terrain.is_none() {
        return;
    }
    let Ok(ball) = balls.get(round.player) else {
        return;
    };
    if ball.state != BallState::Idle || ball.holed {
        return;
    }

    let to_pin = Vec3::new(hole.pin.x - ball.position.x, 0.0, hole.pin.z - ball.position.z);
    let distance = to_pin.length();
    let Some(direction) = to_pin.try_normalize() else {
        return;
    };

    let params = if ball.terrain == TerrainId::Green {
        StrokeParams::new(direction * (distance * 0.95 + 0.6).min(6.0)).putt()
    } else {
        let speed = (distance * 9.8 * 0.7).sqrt().min(40.0);
        StrokeParams::new(direction * speed * 0.8 + Vec3::Y * speed * 0.6)
            .with_spin(Vec2::new(0.0, 0.3))
            .with_delay(0.5)
    };

    round.strokes += 1;
    info!(
        "[STROKE {}] {:.1}m to the pin from {:?}",
        round.strokes, distance, ball.terrain
    );
    strokes.write(StrokeCommand::new(round.player, params));
}

fn report_events(
    mut events: MessageReader<BallEvent>,
    mut bullseye: MessageReader<BullsEyeEvent>,
    round: Res<Round>,
    mut exit: MessageWriter<AppExit>,
) {
    for event in bullseye.read() {
        info!("[BULLSEYE] accuracy {:.2}", event.accuracy);
    }

    for event in events.read() {
        info!(
            "[{:?}] {:?} at {:?}, {:.1}m from the stroke start",
            event.kind, event.terrain, event.position, event.distance
        );

        let finished = event.kind == BallEventKind::Holed
            || (event.kind == BallEventKind::TurnEnded && round.strokes >= MAX_STROKES);
        if finished {
            info!("[FINISHED] {} strokes", round.strokes);
            exit.write(AppExit::Success);
        }
    }
}
