use hecs::World;

use crate::{Ball, Paddle, PaddleIntent, Pilot};

/// Steer bot paddles toward the ball.
///
/// The bot only reacts to where the ball is now: it climbs while the ball's
/// top edge is above its own, drops while the ball's bottom edge is below
/// its own, and holds otherwise.
pub fn drive_bots(world: &mut World) {
    let ball = match world.query::<&Ball>().iter().next() {
        Some((_e, ball)) => ball.bounds(),
        None => return, // No ball in world
    };

    for (_entity, (paddle, pilot, intent)) in
        world.query_mut::<(&Paddle, &Pilot, &mut PaddleIntent)>()
    {
        if *pilot != Pilot::Bot {
            continue;
        }
        let bounds = paddle.bounds();
        intent.dir = if ball.top() < bounds.top() {
            -1
        } else if ball.bottom() > bounds.bottom() {
            1
        } else {
            0
        };
    }
}
