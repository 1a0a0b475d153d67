//! Match State Machine
//!
//! Intro waits for a mode choice, the playing phases run the simulation, and
//! the two result phases are terminal.

use serde::Serialize;

use crate::{Score, Side};

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPhase {
    Intro,
    SinglePlayer,
    MultiPlayer,
    Player1Won,
    Player1Lost,
}

/// Mode picked on the intro screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SinglePlayer,
    MultiPlayer,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    SelectMode(Mode),
    Player1Wins,
    Player1Loses,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_phase: MatchPhase,
    pub to_phase: MatchPhase,
    pub action: PhaseAction,
}

/// Match finite state machine
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: MatchPhase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::Intro,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: PhaseAction) -> bool {
        self.get_next_phase(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: PhaseAction) -> TransitionResult {
        let from_phase = self.phase;

        match self.get_next_phase(action) {
            Some(next_phase) => {
                self.phase = next_phase;
                tracing::info!(?from_phase, to_phase = ?next_phase, ?action, "phase transition");
                TransitionResult {
                    success: true,
                    from_phase,
                    to_phase: next_phase,
                    action,
                }
            }
            None => {
                tracing::debug!(phase = ?from_phase, ?action, "rejected phase transition");
                TransitionResult {
                    success: false,
                    from_phase,
                    to_phase: from_phase,
                    action,
                }
            }
        }
    }

    /// Apply the win rule to the current score. Returns the transition when
    /// the match just ended.
    pub fn evaluate_score(
        &mut self,
        score: &Score,
        win_score: u32,
        margin: u32,
    ) -> Option<TransitionResult> {
        if !self.is_simulating() {
            return None;
        }
        let action = match score.has_winner(win_score, margin)? {
            Side::Left => PhaseAction::Player1Wins,
            Side::Right => PhaseAction::Player1Loses,
        };
        Some(self.transition(action))
    }

    /// Get next phase for a given action (if valid)
    fn get_next_phase(&self, action: PhaseAction) -> Option<MatchPhase> {
        use MatchPhase::*;

        match (self.phase, action) {
            (Intro, PhaseAction::SelectMode(Mode::SinglePlayer)) => Some(SinglePlayer),
            (Intro, PhaseAction::SelectMode(Mode::MultiPlayer)) => Some(MultiPlayer),

            (SinglePlayer | MultiPlayer, PhaseAction::Player1Wins) => Some(Player1Won),
            (SinglePlayer | MultiPlayer, PhaseAction::Player1Loses) => Some(Player1Lost),

            // Terminal phases and out-of-order actions
            _ => None,
        }
    }

    /// True while paddles, bot, physics and scoring run
    pub fn is_simulating(&self) -> bool {
        matches!(self.phase, MatchPhase::SinglePlayer | MatchPhase::MultiPlayer)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, MatchPhase::Player1Won | MatchPhase::Player1Lost)
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase() {
        let fsm = PhaseMachine::new();
        assert_eq!(fsm.phase(), MatchPhase::Intro);
        assert!(!fsm.is_simulating());
        assert!(!fsm.is_terminal());
    }

    #[test]
    fn test_select_single_player() {
        let mut fsm = PhaseMachine::new();
        let result = fsm.transition(PhaseAction::SelectMode(Mode::SinglePlayer));
        assert!(result.success);
        assert_eq!(fsm.phase(), MatchPhase::SinglePlayer);
    }

    #[test]
    fn test_select_multi_player() {
        let mut fsm = PhaseMachine::new();
        fsm.transition(PhaseAction::SelectMode(Mode::MultiPlayer));
        assert_eq!(fsm.phase(), MatchPhase::MultiPlayer);
        assert!(fsm.is_simulating());
    }

    #[test]
    fn test_mode_select_only_accepted_in_intro() {
        let mut fsm = PhaseMachine::new();
        fsm.transition(PhaseAction::SelectMode(Mode::SinglePlayer));
        let result = fsm.transition(PhaseAction::SelectMode(Mode::MultiPlayer));
        assert!(!result.success);
        assert_eq!(result.to_phase, MatchPhase::SinglePlayer);
        assert_eq!(fsm.phase(), MatchPhase::SinglePlayer);
    }

    #[test]
    fn test_result_rejected_from_intro() {
        let mut fsm = PhaseMachine::new();
        assert!(!fsm.can_transition(PhaseAction::Player1Wins));
        let result = fsm.transition(PhaseAction::Player1Loses);
        assert!(!result.success);
        assert_eq!(fsm.phase(), MatchPhase::Intro);
    }

    #[test]
    fn test_terminal_phases_have_no_exit() {
        let mut fsm = PhaseMachine::new();
        fsm.transition(PhaseAction::SelectMode(Mode::MultiPlayer));
        fsm.transition(PhaseAction::Player1Wins);
        assert_eq!(fsm.phase(), MatchPhase::Player1Won);
        assert!(fsm.is_terminal());

        for action in [
            PhaseAction::SelectMode(Mode::SinglePlayer),
            PhaseAction::SelectMode(Mode::MultiPlayer),
            PhaseAction::Player1Wins,
            PhaseAction::Player1Loses,
        ] {
            assert!(!fsm.can_transition(action), "{action:?} left a terminal phase");
        }
    }

    #[test]
    fn test_evaluate_score_ends_match() {
        let mut fsm = PhaseMachine::new();
        fsm.transition(PhaseAction::SelectMode(Mode::SinglePlayer));

        assert_eq!(fsm.evaluate_score(&Score { p1: 10, p2: 9 }, 10, 2), None);
        assert_eq!(fsm.phase(), MatchPhase::SinglePlayer);

        let result = fsm
            .evaluate_score(&Score { p1: 10, p2: 12 }, 10, 2)
            .expect("match should end");
        assert_eq!(result.to_phase, MatchPhase::Player1Lost);
        assert_eq!(fsm.phase(), MatchPhase::Player1Lost);
    }

    #[test]
    fn test_evaluate_score_ignored_outside_play() {
        let mut fsm = PhaseMachine::new();
        assert_eq!(fsm.evaluate_score(&Score { p1: 10, p2: 0 }, 10, 2), None);
        assert_eq!(fsm.phase(), MatchPhase::Intro);
    }
}
