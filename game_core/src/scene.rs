//! Draw list handed to the renderer once per frame.

use glam::Vec2;
use serde::Serialize;

use crate::{Aabb, MatchPhase, Score, Side, Simulation};

pub const TITLE: &str = "Corona Pong";
pub const INSTRUCTIONS: &str = "Press S for singleplayer or M for multiplayer";

/// What a piece of text is for, so renderers can pick font size and colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextKind {
    Title,
    Instructions,
    Score,
    Fps,
    Winner,
    Condolence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub kind: TextKind,
    pub content: String,
}

/// The ball image, anchored at its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSprite {
    pub center: Vec2,
    pub bounds: Aabb,
    pub vel: Vec2,
}

/// Everything visible this frame. Empty collections mean "not drawn".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub phase: MatchPhase,
    pub score: Score,
    pub divider: Option<Aabb>,
    pub zones: Vec<Aabb>,
    pub paddles: Vec<Aabb>,
    pub ball: Option<BallSprite>,
    pub texts: Vec<Text>,
}

impl Scene {
    pub fn build(sim: &Simulation, fps: f32) -> Self {
        let phase = sim.phase();
        let mut scene = Scene {
            phase,
            score: sim.score,
            divider: None,
            zones: Vec::new(),
            paddles: Vec::new(),
            ball: None,
            texts: Vec::new(),
        };

        match phase {
            MatchPhase::Intro => {
                scene.push_text(TextKind::Title, TITLE);
                scene.push_text(TextKind::Instructions, INSTRUCTIONS);
            }
            MatchPhase::SinglePlayer | MatchPhase::MultiPlayer => {
                scene.divider = Some(sim.court.divider);
                scene.zones = sim.court.zones().to_vec();
                scene.paddles = [Side::Left, Side::Right]
                    .into_iter()
                    .filter_map(|side| sim.paddle(side))
                    .map(|paddle| paddle.bounds())
                    .collect();
                scene.ball = sim.ball().map(|ball| BallSprite {
                    center: ball.pos,
                    bounds: ball.bounds(),
                    vel: ball.vel,
                });
                scene.push_text(TextKind::Score, sim.score.to_string());
                scene.push_text(TextKind::Fps, format_fps(fps));
            }
            MatchPhase::Player1Won => {
                scene.push_text(TextKind::Winner, "Player1 has won this game.");
                scene.push_text(TextKind::Condolence, "We wish Player2 a speedy recovery!");
            }
            MatchPhase::Player1Lost => {
                scene.push_text(TextKind::Winner, "Player2 has won this game.");
                scene.push_text(TextKind::Condolence, "We wish Player1 a speedy recovery!");
            }
        }
        scene
    }

    fn push_text(&mut self, kind: TextKind, content: impl Into<String>) {
        self.texts.push(Text {
            kind,
            content: content.into(),
        });
    }

    /// First text of the given kind, if drawn
    pub fn text(&self, kind: TextKind) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.content.as_str())
    }
}

pub fn format_fps(fps: f32) -> String {
    format!("{:.0} fps", fps)
}
