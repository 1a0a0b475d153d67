/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Court
    pub const COURT_WIDTH: f32 = 640.0;
    pub const COURT_HEIGHT: f32 = 480.0;
    pub const BORDER_SIZE: f32 = 12.0;
    pub const MARGIN: f32 = 50.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    pub const PADDLE_START_OFFSET: f32 = 25.0; // above the vertical centre
    pub const PADDLE_EPSILON: f32 = 5.0; // gap kept between paddle and wall
    pub const MOVE_DISTANCE: f32 = 20.0;
    pub const HUMAN_DIVISOR: f32 = 50.0;
    pub const BOT_DIVISOR: f32 = 40.0; // steeper than human: bot moves faster

    // Ball (units per millisecond)
    pub const BALL_SIZE: f32 = 16.0;
    pub const BALL_BASE_SPEED: f32 = 0.3;
    pub const BALL_SPEED_GROWTH: f32 = 1.02; // per paddle contact, uncapped
    pub const DEFLECTION_DAMPING: f32 = 100.0;
    pub const SERVE_GAP: f32 = 5.0;

    // Score
    pub const WIN_SCORE: u32 = 10;
    pub const WIN_MARGIN: u32 = 2;

    // Loop
    pub const FRAMES_PER_SECOND: u32 = 60;
    pub const MAX_FRAMESKIP: u32 = 10;
}
