use hecs::World;

use crate::{
    create_ball, create_paddle, step, Ball, Config, Court, Events, InputSnapshot, MatchPhase,
    Mode, Paddle, PhaseAction, PhaseMachine, Pilot, Scene, Score, Side, Time, TransitionResult,
};

/// Everything one match needs, owned by the update loop.
///
/// Renderers read it through [`Simulation::scene`].
pub struct Simulation {
    pub world: World,
    pub time: Time,
    pub court: Court,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub phase: PhaseMachine,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        let court = Court::new(&config);
        let mut world = World::new();

        // Create paddles; the right one is handed to the bot on mode select
        create_paddle(&mut world, &config, Side::Left, Pilot::Human);
        create_paddle(&mut world, &config, Side::Right, Pilot::Human);

        // First serve leaves from player 1
        let server = Paddle::new(Side::Left, config.paddle_spawn(Side::Left), config.paddle_size());
        let mut ball = Ball::new(court.center(), config.ball_extent(), glam::Vec2::ZERO);
        ball.serve_from(
            &server,
            court.height / 2.0,
            config.serve_gap,
            config.ball_base_speed,
        );
        create_ball(&mut world, &config, ball.pos, ball.vel);

        Self {
            world,
            time: Time::default(),
            court,
            config,
            score: Score::new(),
            events: Events::new(),
            phase: PhaseMachine::new(),
        }
    }

    /// Handle a mode-select key. Ignored outside the intro.
    pub fn select_mode(&mut self, mode: Mode) -> TransitionResult {
        let result = self.phase.transition(PhaseAction::SelectMode(mode));
        if result.success {
            let opponent = match mode {
                Mode::SinglePlayer => Pilot::Bot,
                Mode::MultiPlayer => Pilot::Human,
            };
            for (_entity, (paddle, pilot)) in self.world.query_mut::<(&Paddle, &mut Pilot)>() {
                if paddle.side == Side::Right {
                    *pilot = opponent;
                }
            }
        }
        result
    }

    /// Advance the match by `dt_ms` milliseconds with the given held keys
    pub fn tick(&mut self, dt_ms: f32, input: &InputSnapshot) -> Option<TransitionResult> {
        self.time.dt_ms = dt_ms;
        let result = step(
            &mut self.world,
            &mut self.time,
            &self.court,
            &self.config,
            &mut self.phase,
            &mut self.score,
            &mut self.events,
            input,
        );
        if let Some(result) = result {
            tracing::info!(phase = ?result.to_phase, score = %self.score, "match over");
        }
        result
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase.phase()
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| *p)
    }

    pub fn pilot(&self, side: Side) -> Option<Pilot> {
        self.world
            .query::<(&Paddle, &Pilot)>()
            .iter()
            .find(|(_e, (p, _))| p.side == side)
            .map(|(_e, (_, pilot))| *pilot)
    }

    /// Read-only view for the renderer
    pub fn scene(&self, fps: f32) -> Scene {
        Scene::build(self, fps)
    }
}
