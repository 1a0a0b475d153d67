use std::f32::consts::FRAC_PI_2;

use hecs::World;

use crate::{geometry, Ball, Config, Court, Events, Paddle, Side};

/// Keep paddles between the walls, `paddle_epsilon` units clear of each
pub fn contain_paddles(world: &mut World, court: &Court, config: &Config) {
    let (lo, hi) = config.paddle_band(court);
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.pos.y = geometry::clamp(paddle.pos.y, lo, hi);
    }
}

/// Bounce the ball off the top and bottom walls
pub fn bounce_off_walls(world: &mut World, court: &Court, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.bounds().intersects(&court.top) {
            let penetration = court.top.bottom() - ball.bounds().top();
            ball.vel.y = -ball.vel.y;
            ball.pos.y += 2.0 * penetration;
            events.ball_hit_wall = true;
        }
        if ball.bounds().intersects(&court.bottom) {
            let penetration = court.bottom.top() - ball.bounds().bottom();
            ball.vel.y = -ball.vel.y;
            ball.pos.y += 2.0 * penetration;
            events.ball_hit_wall = true;
        }
    }
}

/// Check ball collisions with both paddles
pub fn deflect_off_paddles(world: &mut World, config: &Config, events: &mut Events) {
    // Collect paddles first so the ball can be borrowed mutably
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for paddle in &paddles {
            if deflect(ball, paddle, config) {
                tracing::debug!(
                    side = ?paddle.side,
                    vx = ball.vel.x,
                    vy = ball.vel.y,
                    speed = ball.vel.length(),
                    "ball hit paddle"
                );
                events.ball_hit_paddle = true;
            }
        }
    }
}

/// Resolve one ball/paddle contact. Returns true if the ball was deflected.
///
/// The vector from the paddle centre to the ball centre is scaled by the
/// paddle size, so the paddle behaves like a unit square when classifying
/// which face was struck. Only the face pointing into the court resolves;
/// a ball touching the back or the far side of a paddle is left alone.
pub fn deflect(ball: &mut Ball, paddle: &Paddle, config: &Config) -> bool {
    let p = paddle.bounds();
    let b = ball.bounds();
    if !p.intersects(&b) {
        return false;
    }

    let om = (b.center() - p.center()) / p.size();
    let angle = om.y.atan2(om.x);
    let front_face = match paddle.side {
        Side::Left => angle.abs() < FRAC_PI_2,
        Side::Right => angle.abs() > FRAC_PI_2,
    };
    if !front_face {
        return false;
    }

    // abs() so a second contact in the same tick keeps the direction
    ball.vel.x = paddle.side.serve_sign() * ball.vel.x.abs();
    ball.vel.y = (b.center().y - p.center().y) / config.deflection_damping;

    let half = b.width() / 2.0;
    ball.pos.x = match paddle.side {
        Side::Left => p.right() + half,
        Side::Right => p.left() - half,
    };

    ball.vel *= config.ball_speed_growth;
    true
}
