use std::fmt;

use serde::Serialize;

use crate::Side;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub dt_ms: f32,  // Milliseconds elapsed since the previous tick
    pub now_ms: f64, // Total simulated milliseconds
}

impl Time {
    pub fn new(dt_ms: f32, now_ms: f64) -> Self {
        Self { dt_ms, now_ms }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub p1: u32, // Left player
    pub p2: u32, // Right player
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.p1 += 1,
            Side::Right => self.p2 += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.p1,
            Side::Right => self.p2,
        }
    }

    /// Deuce-style rule: a side wins once it reaches `win_score` with a lead
    /// of at least `margin`.
    pub fn has_winner(&self, win_score: u32, margin: u32) -> Option<Side> {
        let wins = |own: u32, other: u32| own >= win_score && own >= other + margin;
        if wins(self.p1, self.p2) {
            Some(Side::Left)
        } else if wins(self.p2, self.p1) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}   {}", self.p1, self.p2)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.left_scored = false;
        self.right_scored = false;
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
    }

    pub fn scored(&mut self, side: Side) {
        match side {
            Side::Left => self.left_scored = true,
            Side::Right => self.right_scored = true,
        }
    }
}

/// Held movement keys, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub p1_up: bool,
    pub p1_down: bool,
    pub p2_up: bool,
    pub p2_down: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// -1 = up, 0 = stop, 1 = down. Up wins when both are held.
    pub fn dir(&self, side: Side) -> i8 {
        let (up, down) = match side {
            Side::Left => (self.p1_up, self.p1_down),
            Side::Right => (self.p2_up, self.p2_down),
        };
        if up {
            -1
        } else if down {
            1
        } else {
            0
        }
    }

    pub fn hold(&mut self, side: Side, dir: i8) {
        let (up, down) = match side {
            Side::Left => (&mut self.p1_up, &mut self.p1_down),
            Side::Right => (&mut self.p2_up, &mut self.p2_down),
        };
        *up = dir < 0;
        *down = dir > 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment() {
        let mut score = Score::new();
        score.increment(Side::Left);
        score.increment(Side::Right);
        score.increment(Side::Right);
        assert_eq!(score.p1, 1);
        assert_eq!(score.p2, 2);
        assert_eq!(score.get(Side::Right), 2);
    }

    #[test]
    fn test_score_no_winner_below_threshold() {
        let score = Score { p1: 9, p2: 0 };
        assert_eq!(score.has_winner(10, 2), None);
    }

    #[test]
    fn test_score_winner_at_threshold_with_margin() {
        assert_eq!(Score { p1: 10, p2: 8 }.has_winner(10, 2), Some(Side::Left));
        assert_eq!(Score { p1: 3, p2: 10 }.has_winner(10, 2), Some(Side::Right));
    }

    #[test]
    fn test_score_deuce_needs_two_point_lead() {
        assert_eq!(Score { p1: 10, p2: 9 }.has_winner(10, 2), None);
        assert_eq!(Score { p1: 11, p2: 10 }.has_winner(10, 2), None);
        assert_eq!(Score { p1: 12, p2: 10 }.has_winner(10, 2), Some(Side::Left));
        assert_eq!(Score { p1: 13, p2: 15 }.has_winner(10, 2), Some(Side::Right));
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score { p1: 3, p2: 11 }.to_string(), "3   11");
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.scored(Side::Left);
        events.scored(Side::Right);
        events.ball_hit_paddle = true;
        events.ball_hit_wall = true;

        events.clear();

        assert!(!events.left_scored);
        assert!(!events.right_scored);
        assert!(!events.ball_hit_paddle);
        assert!(!events.ball_hit_wall);
    }

    #[test]
    fn test_input_up_wins_over_down() {
        let input = InputSnapshot {
            p1_up: true,
            p1_down: true,
            ..InputSnapshot::new()
        };
        assert_eq!(input.dir(Side::Left), -1);
        assert_eq!(input.dir(Side::Right), 0);
    }

    #[test]
    fn test_input_hold() {
        let mut input = InputSnapshot::new();
        input.hold(Side::Right, 1);
        assert_eq!(input.dir(Side::Right), 1);
        input.hold(Side::Right, -1);
        assert!(input.p2_up && !input.p2_down);
        input.hold(Side::Right, 0);
        assert_eq!(input.dir(Side::Right), 0);
    }
}
