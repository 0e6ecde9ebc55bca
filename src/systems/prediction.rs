//! Fast-forward and shot prediction - running a stroke to completion
//! without waiting for real time.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::components::Ball;
use crate::events::{
    BallEvent, BallEventKind, FastForwardRequest, PredictionOutcome, PredictionRequest,
    PredictionResult, SimEvent, SimEventWriters,
};
use crate::resources::{BallConfig, BullsEye, HoleContext, WindState};
use crate::systems::kinematics::{advance, SimContext};
use crate::systems::logic::start_stroke;
use crate::systems::wind::advance_wind;
use crate::terrain::TerrainWorld;
use crate::types::{BallState, SimulationMode};

/// Time step used when a request does not give a usable one.
pub const NOMINAL_DT: f32 = 1.0 / 60.0;

/// Step budget of a prediction.
pub const MAX_PREDICTION_STEPS: u32 = 600;

/// Step budget of a fast-forward. A stroke still running afterwards
/// carries on in real time.
pub const MAX_FAST_FORWARD_STEPS: u32 = 3600;

fn usable_dt(dt: f32) -> f32 {
    if dt > 0.0 && dt.is_finite() {
        dt
    } else {
        NOMINAL_DT
    }
}

/// Predicts where a moving ball first comes to rest.
///
/// Runs on a copy of the ball and of the wind, so neither the ball nor the
/// match wind is touched, and raises no side effects.
///
/// # Arguments
/// * `ball` - Ball with the stroke already started
/// * `ctx` - Simulation context; its mode is ignored
/// * `accuracy` - Time step in seconds
///
/// # Returns
/// The first `Landed` event, or an outcome without event when the step
/// budget ran out first
pub fn run_prediction(ball: &Ball, ctx: SimContext, accuracy: f32) -> PredictionOutcome {
    let dt = usable_dt(accuracy);
    let mut ball = ball.clone();
    let mut wind = ctx.wind.clone();
    let mut events = Vec::new();
    let mut steps = 0;

    while steps < MAX_PREDICTION_STEPS && ball.state.is_moving() {
        steps += 1;
        advance_wind(&mut wind, dt);
        let step_ctx = SimContext {
            wind: &wind,
            mode: SimulationMode::Prediction,
            ..ctx
        };
        advance(&mut ball, step_ctx, dt, &mut events);

        let landed = events.drain(..).find_map(|event| match event {
            SimEvent::Ball(event) if event.kind == BallEventKind::Landed => Some(event),
            _ => None,
        });
        if let Some(event) = landed {
            return PredictionOutcome {
                position: event.position,
                terrain: event.terrain,
                event: Some(event),
                steps,
            };
        }
    }

    PredictionOutcome {
        event: None,
        position: ball.position,
        terrain: ball.terrain,
        steps,
    }
}

/// Resolves the current stroke of `ball` synchronously.
///
/// Ticks at `dt` until the ball is idle again, skipping the waits between
/// settling, relocation and the end of the turn. The match wind is
/// advanced on a copy. Every event is appended to `events`.
///
/// # Returns
/// The event that ended the turn, or `None` if the stroke did not finish
/// within the step budget
pub fn fast_forward(
    ball: &mut Ball,
    ctx: SimContext,
    dt: f32,
    events: &mut Vec<SimEvent>,
) -> Option<BallEvent> {
    let dt = usable_dt(dt);
    let mut wind = ctx.wind.clone();
    let mut terminal = None;

    for _ in 0..MAX_FAST_FORWARD_STEPS {
        if ball.state == BallState::Idle {
            break;
        }
        if ball.state.is_stopped() {
            ball.delay = ball.delay.min(0.0);
        }

        advance_wind(&mut wind, dt);
        let step_ctx = SimContext {
            wind: &wind,
            mode: SimulationMode::FastForward,
            ..ctx
        };

        let first = events.len();
        advance(ball, step_ctx, dt, events);
        if let Some(event) = events[first..]
            .iter()
            .filter_map(SimEvent::as_ball_event)
            .find(|event| event.is_terminal())
        {
            terminal = Some(event.clone());
        }
    }

    if ball.state != BallState::Idle {
        debug!(
            "Client {} fast-forward gave up in {:?} at {:?}",
            ball.client, ball.state, ball.position
        );
    }
    terminal
}

/// Resolve requested strokes immediately.
///
/// Uses the fixed timestep as the simulation step. Gameplay events are
/// forwarded as if the stroke had been played out in real time.
///
/// # Arguments
/// * `requests` - Message reader for fast-forward requests
/// * `time` - Bevy FixedTime resource to get the timestep
/// * `writers` - Message writers for simulation events
/// * `balls` - Query for ball components
#[allow(clippy::too_many_arguments)]
pub fn handle_fast_forward_requests(
    mut requests: MessageReader<FastForwardRequest>,
    time: Res<Time<Fixed>>,
    config: Res<BallConfig>,
    hole: Res<HoleContext>,
    wind: Res<WindState>,
    bullseye: Res<BullsEye>,
    terrain: Res<TerrainWorld>,
    mut writers: SimEventWriters,
    mut balls: Query<&mut Ball>,
) {
    let ctx = SimContext {
        config: &config,
        hole: &hole,
        wind: &wind,
        bullseye: &bullseye,
        terrain: &*terrain,
        mode: SimulationMode::FastForward,
    };
    let dt = time.timestep().as_secs_f32();

    for request in requests.read() {
        let Ok(mut ball) = balls.get_mut(request.entity) else {
            warn!("Fast-forward for unknown ball {:?}", request.entity);
            continue;
        };

        let mut events = Vec::new();
        let terminal = fast_forward(&mut ball, ctx, dt, &mut events);
        debug!(
            "Fast-forwarded {:?}: {:?}",
            request.entity,
            terminal.as_ref().map(|event| event.kind)
        );
        writers.send_all(events);
    }
}

/// Answer shot predictions.
///
/// An idle ball is struck with the requested stroke on a copy; a ball
/// already in motion has its current stroke predicted.
///
/// # Arguments
/// * `requests` - Message reader for prediction requests
/// * `results` - Message writer for prediction results
/// * `balls` - Query for ball components
#[allow(clippy::too_many_arguments)]
pub fn handle_prediction_requests(
    mut requests: MessageReader<PredictionRequest>,
    config: Res<BallConfig>,
    hole: Res<HoleContext>,
    wind: Res<WindState>,
    bullseye: Res<BullsEye>,
    terrain: Res<TerrainWorld>,
    mut results: MessageWriter<PredictionResult>,
    balls: Query<&Ball>,
) {
    let ctx = SimContext {
        config: &config,
        hole: &hole,
        wind: &wind,
        bullseye: &bullseye,
        terrain: &*terrain,
        mode: SimulationMode::Prediction,
    };

    for request in requests.read() {
        let Ok(ball) = balls.get(request.entity) else {
            warn!("Prediction for unknown ball {:?}", request.entity);
            continue;
        };

        let mut probe = ball.clone();
        if probe.state == BallState::Idle {
            start_stroke(&mut probe, &request.params, &hole);
        }
        results.write(PredictionResult {
            entity: request.entity,
            outcome: run_prediction(&probe, ctx, request.accuracy),
        });
    }
}
