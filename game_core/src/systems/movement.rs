use hecs::World;

use crate::{Ball, Config, Paddle, PaddleIntent, Pilot, Time};

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, time: &Time, config: &Config) {
    for (_entity, (paddle, pilot, intent)) in
        world.query_mut::<(&mut Paddle, &Pilot, &PaddleIntent)>()
    {
        if intent.dir != 0 {
            let divisor = match pilot {
                Pilot::Human => config.human_divisor,
                Pilot::Bot => config.bot_divisor,
            };
            paddle.pos.y += intent.dir as f32 * config.move_distance * time.dt_ms / divisor;
        }
    }
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World, time: &Time) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel * time.dt_ms;
    }
}
