//! Headless renderers. They consume the same [`Scene`] a window would draw.

use std::io::Write;

use anyhow::Context;
use game_core::{MatchPhase, Scene, Score};

pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()>;
}

/// Logs phase changes and goals instead of drawing
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: Option<(MatchPhase, Score)>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()> {
        let current = (scene.phase, scene.score);
        if self.last == Some(current) {
            return Ok(());
        }

        match self.last {
            Some((phase, _)) if phase == scene.phase => {
                tracing::info!(score = %scene.score, "goal");
            }
            _ => {
                let headline = scene.texts.first().map(|t| t.content.as_str());
                tracing::info!(phase = ?scene.phase, score = %scene.score, headline, "phase");
            }
        }
        self.last = Some(current);
        Ok(())
    }
}

/// Writes every scene as one JSON line
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, scene).context("failed to encode scene")?;
        self.out.write_all(b"\n").context("failed to write scene")?;
        Ok(())
    }
}

/// Sends each scene to two renderers
pub struct Tee<A, B>(pub A, pub B);

impl<A: Renderer, B: Renderer> Renderer for Tee<A, B> {
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()> {
        self.0.render(scene)?;
        self.1.render(scene)
    }
}

impl<R: Renderer> Renderer for Option<R> {
    fn render(&mut self, scene: &Scene) -> anyhow::Result<()> {
        match self {
            Some(renderer) => renderer.render(scene),
            None => Ok(()),
        }
    }
}
