pub mod components;
pub mod config;
pub mod court;
pub mod error;
pub mod geometry;
pub mod params;
pub mod phase;
pub mod resources;
pub mod scene;
pub mod scheduler;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::*;
pub use court::*;
pub use error::*;
pub use geometry::Aabb;
pub use params::*;
pub use phase::*;
pub use resources::*;
pub use scene::*;
pub use scheduler::*;
pub use simulation::*;

use hecs::World;
use systems::*;

/// Run one tick of the Pong simulation.
///
/// Nothing moves outside the playing phases or when no time has passed.
/// Returns the phase transition if this tick ended the match.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    court: &Court,
    config: &Config,
    phase: &mut PhaseMachine,
    score: &mut Score,
    events: &mut Events,
    input: &InputSnapshot,
) -> Option<TransitionResult> {
    // Clear events at start of tick
    events.clear();

    if !phase.is_simulating() {
        return None;
    }

    if time.dt_ms > 0.0 {
        // 1. Ingest held keys, then let the bot pick its direction
        ingest_inputs(world, input);
        drive_bots(world);

        // 2. Move paddles and keep them in the court
        move_paddles(world, time, config);
        contain_paddles(world, court, config);

        // 3. Move ball
        move_ball(world, time);

        // 4. Resolve contacts (walls, then paddles)
        bounce_off_walls(world, court, events);
        deflect_off_paddles(world, config, events);

        // 5. Check scoring (ball reached a goal zone)
        check_goals(world, court, config, score, events);
    }

    time.now_ms += f64::from(time.dt_ms);

    phase.evaluate_score(score, config.win_score, config.win_margin)
}

/// Helper to create a paddle entity at its spawn point
pub fn create_paddle(world: &mut World, config: &Config, side: Side, pilot: Pilot) -> hecs::Entity {
    let paddle = Paddle::new(side, config.paddle_spawn(side), config.paddle_size());
    world.spawn((paddle, pilot, PaddleIntent::new()))
}

/// Helper to create the ball entity
pub fn create_ball(
    world: &mut World,
    config: &Config,
    pos: glam::Vec2,
    vel: glam::Vec2,
) -> hecs::Entity {
    world.spawn((Ball::new(pos, config.ball_extent(), vel),))
}
