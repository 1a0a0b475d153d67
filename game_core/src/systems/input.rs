use hecs::World;

use crate::{InputSnapshot, Paddle, PaddleIntent, Pilot};

/// Turn the held keys into intents for human-driven paddles
pub fn ingest_inputs(world: &mut World, input: &InputSnapshot) {
    for (_entity, (paddle, pilot, intent)) in
        world.query_mut::<(&Paddle, &Pilot, &mut PaddleIntent)>()
    {
        if *pilot == Pilot::Human {
            intent.dir = input.dir(paddle.side);
        }
    }
}
