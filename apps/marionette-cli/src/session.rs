use marionette_input::{Keymap, Puppeteer};
use marionette_kernel::{Figure, FigureError, PoseCommand};
use marionette_render::{DebugTextRenderer, RenderView, Renderer, RetainedScene};

use crate::config::MarionetteConfig;

/// One interactive session: figure, scene, and input collaborator.
///
/// Each frame polls input, applies at most one command, then redraws, so a
/// redraw never observes a partially updated pose tree.
///
/// The figure's event log is session-scoped: it keeps every applied
/// command so `pose --events` can dump the whole run, and is dropped with
/// the session.
pub struct Session {
    pub figure: Figure,
    pub scene: RetainedScene,
    puppeteer: Puppeteer,
    keymap: Keymap,
    renderer: DebugTextRenderer,
    view: RenderView,
    frame_count: u64,
}

impl Session {
    pub fn new(config: MarionetteConfig) -> anyhow::Result<Self> {
        let mut scene = RetainedScene::new();
        let figure = Figure::build(config.figure, &mut scene)?;
        let puppeteer = Puppeteer::with_step(config.step)?;
        Ok(Self {
            figure,
            scene,
            puppeteer,
            keymap: config.keymap,
            renderer: DebugTextRenderer::new(),
            view: RenderView::default(),
            frame_count: 0,
        })
    }

    /// Run one frame with `held_keys` pressed. Returns the applied command
    /// and the redrawn frame.
    pub fn frame<'a>(
        &mut self,
        held_keys: impl IntoIterator<Item = &'a str>,
    ) -> Result<(Option<PoseCommand>, String), FigureError> {
        self.frame_count += 1;
        let held = self.keymap.actions(held_keys);
        let command = self.puppeteer.poll(&held);
        if let Some(command) = command {
            self.figure.apply(command, &mut self.scene)?;
            tracing::debug!(frame = self.frame_count, %command, "frame applied command");
        }
        Ok((command, self.redraw()))
    }

    /// Apply a command directly, bypassing input.
    pub fn apply(&mut self, command: PoseCommand) -> Result<(), FigureError> {
        self.figure.apply(command, &mut self.scene)
    }

    pub fn redraw(&self) -> String {
        self.renderer.render(&self.scene, &self.view)
    }

    pub fn selected(&self) -> marionette_kernel::SegmentId {
        self.puppeteer.selected()
    }
}

/// Split a key script into frames: frames are separated by `,`, keys held
/// together within a frame by `+`. An empty frame holds nothing.
pub fn parse_key_script(script: &str) -> Vec<Vec<String>> {
    script
        .split(',')
        .map(|frame| {
            frame
                .split('+')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect()
}
