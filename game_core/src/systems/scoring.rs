use hecs::World;

use crate::{Ball, Config, Court, Events, Paddle, Score, Side};

/// Check if the ball reached a goal zone (scoring)
///
/// The side that conceded serves the next ball at base speed, so any speed
/// gained during the rally is lost.
pub fn check_goals(
    world: &mut World,
    court: &Court,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
) {
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let conceding = if ball.bounds().intersects(&court.left_goal) {
            Side::Left
        } else if ball.bounds().intersects(&court.right_goal) {
            Side::Right
        } else {
            continue;
        };
        let scorer = conceding.opponent();

        score.increment(scorer);
        events.scored(scorer);
        tracing::debug!(?scorer, points = score.get(scorer), score = %score, "goal");

        if let Some(server) = paddles.iter().find(|p| p.side == conceding) {
            ball.serve_from(
                server,
                court.height / 2.0,
                config.serve_gap,
                config.ball_base_speed,
            );
        } else {
            ball.pos = court.center();
            ball.vel = glam::Vec2::new(
                conceding.serve_sign() * config.ball_base_speed,
                config.ball_base_speed,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Pilot};
    use glam::Vec2;

    fn setup_world() -> (World, Config, Court, Score, Events) {
        let config = Config::new();
        let court = Court::new(&config);
        let mut world = World::new();
        create_paddle(&mut world, &config, Side::Left, Pilot::Human);
        create_paddle(&mut world, &config, Side::Right, Pilot::Human);
        (world, config, court, Score::new(), Events::new())
    }

    #[test]
    fn test_player2_scores_on_left_goal() {
        let (mut world, config, court, mut score, mut events) = setup_world();
        // Fast ball deep in the left goal
        let ball = create_ball(&mut world, &config, Vec2::new(-30.0, 100.0), Vec2::new(-0.9, -0.4));

        check_goals(&mut world, &court, &config, &mut score, &mut events);

        assert_eq!(score, Score { p1: 0, p2: 1 });
        assert!(events.right_scored);
        assert!(!events.left_scored);

        let ball = *world.get::<&Ball>(ball).unwrap();
        assert_eq!(ball.vel, Vec2::new(0.3, 0.3), "speed growth is discarded");
        assert_eq!(ball.pos.y, 240.0);
        assert_eq!(ball.bounds().left(), 50.0 + config.serve_gap, "serves from player 1");
    }

    #[test]
    fn test_player1_scores_on_right_goal() {
        let (mut world, config, court, mut score, mut events) = setup_world();
        let ball = create_ball(&mut world, &config, Vec2::new(670.0, 400.0), Vec2::new(0.5, 0.1));

        check_goals(&mut world, &court, &config, &mut score, &mut events);

        assert_eq!(score, Score { p1: 1, p2: 0 });
        assert!(events.left_scored);

        let ball = *world.get::<&Ball>(ball).unwrap();
        assert_eq!(ball.vel, Vec2::new(-0.3, 0.3));
        assert_eq!(ball.bounds().right(), 590.0 - config.serve_gap, "serves from player 2");
    }

    #[test]
    fn test_ball_off_screen_but_short_of_goal_does_not_score() {
        let (mut world, config, court, mut score, mut events) = setup_world();
        // Left edge of screen is 0, goal starts at -24
        create_ball(&mut world, &config, Vec2::new(-10.0, 240.0), Vec2::new(-0.3, 0.0));

        check_goals(&mut world, &court, &config, &mut score, &mut events);

        assert_eq!(score, Score::new());
        assert!(!events.left_scored && !events.right_scored);
    }

    #[test]
    fn test_multiple_scores_accumulate() {
        let (mut world, config, court, mut score, mut events) = setup_world();
        let ball = create_ball(&mut world, &config, Vec2::new(670.0, 240.0), Vec2::new(0.3, 0.0));

        check_goals(&mut world, &court, &config, &mut score, &mut events);
        world.get::<&mut Ball>(ball).unwrap().pos.x = 670.0;
        check_goals(&mut world, &court, &config, &mut score, &mut events);

        assert_eq!(score.p1, 2, "Scores should accumulate");
        assert_eq!(score.p2, 0);
    }

    #[test]
    fn test_serve_without_paddles_uses_court_centre() {
        let config = Config::new();
        let court = Court::new(&config);
        let mut world = World::new();
        let (mut score, mut events) = (Score::new(), Events::new());
        let ball = create_ball(&mut world, &config, Vec2::new(-30.0, 240.0), Vec2::ZERO);

        check_goals(&mut world, &court, &config, &mut score, &mut events);

        let ball = *world.get::<&Ball>(ball).unwrap();
        assert_eq!(ball.pos, court.center());
        assert_eq!(ball.vel, Vec2::new(0.3, 0.3));
    }
}
