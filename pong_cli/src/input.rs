//! Keyboard input handling

use std::collections::HashSet;
use std::io::{BufRead, Lines};
use std::ops::ControlFlow;

use game_core::{Ball, InputSnapshot, Mode, Paddle, Side, Simulation};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    M,
    Up,
    Down,
    Escape,
}

/// Discrete events delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Close,
    KeyPressed(Key),
}

/// Map a key name as the browser reports it, or its short form
pub fn key_from_name(name: &str) -> Option<Key> {
    match name {
        "w" | "W" => Some(Key::W),
        "s" | "S" => Some(Key::S),
        "m" | "M" => Some(Key::M),
        "ArrowUp" | "Up" | "up" => Some(Key::Up),
        "ArrowDown" | "Down" | "down" => Some(Key::Down),
        "Escape" | "Esc" | "esc" => Some(Key::Escape),
        _ => None,
    }
}

/// Something that produces key events and can be asked which keys are held
pub trait InputSource {
    /// Drain pending events. Scripted sources may look at the match to
    /// decide what to press.
    fn poll(&mut self, sim: &Simulation) -> Vec<InputEvent>;

    fn is_held(&self, key: Key) -> bool;
}

impl<I: InputSource + ?Sized> InputSource for Box<I> {
    fn poll(&mut self, sim: &Simulation) -> Vec<InputEvent> {
        (**self).poll(sim)
    }

    fn is_held(&self, key: Key) -> bool {
        (**self).is_held(key)
    }
}

/// Sample the four movement keys. W/S drive player 1, Up/Down player 2.
pub fn snapshot(source: &impl InputSource) -> InputSnapshot {
    InputSnapshot {
        p1_up: source.is_held(Key::W),
        p1_down: source.is_held(Key::S),
        p2_up: source.is_held(Key::Up),
        p2_down: source.is_held(Key::Down),
    }
}

/// Apply one discrete event. Breaks when the game should close.
pub fn apply_event(sim: &mut Simulation, event: InputEvent) -> ControlFlow<()> {
    match event {
        InputEvent::Close | InputEvent::KeyPressed(Key::Escape) => {
            tracing::info!(?event, "close requested");
            return ControlFlow::Break(());
        }
        InputEvent::KeyPressed(Key::S) => {
            sim.select_mode(Mode::SinglePlayer);
        }
        InputEvent::KeyPressed(Key::M) => {
            sim.select_mode(Mode::MultiPlayer);
        }
        InputEvent::KeyPressed(_) => {}
    }
    ControlFlow::Continue(())
}

/// Plays the human side(s) headlessly by holding the movement keys.
///
/// Strategy:
/// 1. Press the mode key once.
/// 2. If the ball is heading our way, predict where it crosses our paddle
///    and move there.
/// 3. Otherwise drift back to the middle to cover the most court.
/// 4. Press Escape once the match is over, if asked to.
pub struct ScriptedInput {
    mode: Mode,
    mode_sent: bool,
    quit_when_over: bool,
    held: HashSet<Key>,
}

impl ScriptedInput {
    pub fn new(mode: Mode, quit_when_over: bool) -> Self {
        Self {
            mode,
            mode_sent: false,
            quit_when_over,
            held: HashSet::new(),
        }
    }

    fn steer(&mut self, side: Side, dir: i8) {
        let (up, down) = match side {
            Side::Left => (Key::W, Key::S),
            Side::Right => (Key::Up, Key::Down),
        };
        self.held.remove(&up);
        self.held.remove(&down);
        match dir {
            d if d < 0 => {
                self.held.insert(up);
            }
            d if d > 0 => {
                self.held.insert(down);
            }
            _ => {}
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, sim: &Simulation) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if !self.mode_sent {
            self.mode_sent = true;
            let key = match self.mode {
                Mode::SinglePlayer => Key::S,
                Mode::MultiPlayer => Key::M,
            };
            events.push(InputEvent::KeyPressed(key));
        }

        if sim.phase.is_terminal() {
            self.held.clear();
            if self.quit_when_over {
                events.push(InputEvent::KeyPressed(Key::Escape));
            }
            return events;
        }

        let sides: &[Side] = match self.mode {
            Mode::SinglePlayer => &[Side::Left],
            Mode::MultiPlayer => &[Side::Left, Side::Right],
        };
        if let Some(ball) = sim.ball() {
            for &side in sides {
                if let Some(paddle) = sim.paddle(side) {
                    let dir = autopilot_dir(&ball, &paddle, sim.court.height);
                    self.steer(side, dir);
                }
            }
        }
        events
    }

    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Replays a key tape, one line per tick.
///
/// Key names on a line are held for that tick. A name prefixed with `+` is
/// pressed once instead. The end of the tape closes the game.
///
/// ```text
/// +m
/// w Down
/// w Down
/// ```
pub struct TapeInput<R> {
    lines: Lines<R>,
    line_no: usize,
    held: HashSet<Key>,
}

impl<R: BufRead> TapeInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            held: HashSet::new(),
        }
    }
}

impl<R: BufRead> InputSource for TapeInput<R> {
    fn poll(&mut self, _sim: &Simulation) -> Vec<InputEvent> {
        self.held.clear();
        let line = match self.lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                tracing::warn!(%err, line = self.line_no + 1, "key tape unreadable");
                return vec![InputEvent::Close];
            }
            None => return vec![InputEvent::Close],
        };
        self.line_no += 1;

        let mut events = Vec::new();
        for token in line.split_whitespace() {
            let (pressed, name) = match token.strip_prefix('+') {
                Some(name) => (true, name),
                None => (false, token),
            };
            match key_from_name(name) {
                Some(key) if pressed => events.push(InputEvent::KeyPressed(key)),
                Some(key) => {
                    self.held.insert(key);
                }
                None => tracing::warn!(line = self.line_no, token, "unknown key on tape"),
            }
        }
        events
    }

    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

const AUTOPILOT_DEADZONE: f32 = 10.0;

/// Direction a paddle should move to meet the ball
fn autopilot_dir(ball: &Ball, paddle: &Paddle, court_height: f32) -> i8 {
    let bounds = paddle.bounds();
    let incoming = match paddle.side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    };

    let target_y = if incoming {
        let face_x = match paddle.side {
            Side::Left => bounds.right(),
            Side::Right => bounds.left(),
        };
        let time_to_reach = ((face_x - ball.pos.x) / ball.vel.x).max(0.0);
        fold_into(ball.pos.y + ball.vel.y * time_to_reach, court_height)
    } else {
        court_height / 2.0
    };

    let diff = target_y - bounds.center().y;
    if diff > AUTOPILOT_DEADZONE {
        1
    } else if diff < -AUTOPILOT_DEADZONE {
        -1
    } else {
        0
    }
}

/// Reflect a predicted y back into `[0, height]`, as the walls would
fn fold_into(y: f32, height: f32) -> f32 {
    let period = 2.0 * height;
    let y = y.rem_euclid(period);
    if y > height {
        period - y
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Config, MatchPhase};
    use glam::Vec2;
    use std::io::Cursor;

    #[test]
    fn test_key_from_name() {
        assert_eq!(key_from_name("w"), Some(Key::W));
        assert_eq!(key_from_name("ArrowDown"), Some(Key::Down));
        assert_eq!(key_from_name("Escape"), Some(Key::Escape));
        assert_eq!(key_from_name("q"), None);
    }

    #[test]
    fn test_mode_keys_select_mode() {
        let mut sim = Simulation::new(Config::new());
        assert!(apply_event(&mut sim, InputEvent::KeyPressed(Key::M)).is_continue());
        assert_eq!(sim.phase(), MatchPhase::MultiPlayer);

        // S now only means "player 1 down"
        apply_event(&mut sim, InputEvent::KeyPressed(Key::S));
        assert_eq!(sim.phase(), MatchPhase::MultiPlayer);
    }

    #[test]
    fn test_close_and_escape_break() {
        let mut sim = Simulation::new(Config::new());
        assert!(apply_event(&mut sim, InputEvent::Close).is_break());
        assert!(apply_event(&mut sim, InputEvent::KeyPressed(Key::Escape)).is_break());
    }

    #[test]
    fn test_scripted_input_presses_mode_key_once() {
        let sim = Simulation::new(Config::new());
        let mut input = ScriptedInput::new(Mode::SinglePlayer, true);
        assert_eq!(input.poll(&sim), vec![InputEvent::KeyPressed(Key::S)]);
        assert!(input.poll(&sim).is_empty());
    }

    #[test]
    fn test_scripted_input_chases_incoming_ball() {
        let mut sim = Simulation::new(Config::new());
        sim.select_mode(Mode::SinglePlayer);
        for (_e, ball) in sim.world.query_mut::<&mut Ball>() {
            ball.pos = Vec2::new(320.0, 100.0);
            ball.vel = Vec2::new(-0.3, 0.0);
        }
        let mut input = ScriptedInput::new(Mode::SinglePlayer, true);
        input.poll(&sim);

        let snap = snapshot(&input);
        assert!(snap.p1_up && !snap.p1_down);
        assert!(!snap.p2_up && !snap.p2_down, "bot side is not scripted");
    }

    #[test]
    fn test_scripted_input_quits_when_over() {
        let mut sim = Simulation::new(Config::new());
        sim.select_mode(Mode::MultiPlayer);
        sim.phase.transition(game_core::PhaseAction::Player1Wins);
        let mut input = ScriptedInput::new(Mode::MultiPlayer, true);
        let events = input.poll(&sim);
        assert!(events.contains(&InputEvent::KeyPressed(Key::Escape)));
    }

    #[test]
    fn test_tape_presses_and_holds() {
        let sim = Simulation::new(Config::new());
        let mut tape = TapeInput::new(Cursor::new("+m\nw Down\n\nw q\n"));

        assert_eq!(tape.poll(&sim), vec![InputEvent::KeyPressed(Key::M)]);
        assert!(!tape.is_held(Key::M), "presses are not held");

        assert!(tape.poll(&sim).is_empty());
        let snap = snapshot(&tape);
        assert!(snap.p1_up && snap.p2_down);
        assert!(!snap.p1_down && !snap.p2_up);

        tape.poll(&sim);
        assert_eq!(snapshot(&tape), InputSnapshot::new(), "blank line releases");

        // Unknown names are skipped
        assert!(tape.poll(&sim).is_empty());
        assert!(tape.is_held(Key::W));
    }

    #[test]
    fn test_tape_end_closes() {
        let sim = Simulation::new(Config::new());
        let mut tape = TapeInput::new(Cursor::new("+s\n"));
        tape.poll(&sim);

        let events = tape.poll(&sim);
        assert_eq!(events, vec![InputEvent::Close]);
        let mut sim = sim;
        assert!(apply_event(&mut sim, events[0]).is_break());
    }

    #[test]
    fn test_boxed_source_forwards() {
        let sim = Simulation::new(Config::new());
        let mut boxed: Box<dyn InputSource> = Box::new(TapeInput::new(Cursor::new("Up\n")));
        assert!(boxed.poll(&sim).is_empty());
        assert!(snapshot(&boxed).p2_up);
    }

    #[test]
    fn test_fold_into_reflects_off_walls() {
        assert_eq!(fold_into(100.0, 480.0), 100.0);
        assert_eq!(fold_into(500.0, 480.0), 460.0);
        assert_eq!(fold_into(-20.0, 480.0), 20.0);
    }
}
