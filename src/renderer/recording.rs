//! Canvas that records draw calls instead of rasterizing them

use std::convert::Infallible;

use glam::Vec2;

use super::{Canvas, Color};

/// One recorded canvas call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    SetDrawColor(Color),
    Line { from: Vec2, to: Vec2 },
    FilledCircle { center: Vec2, radius: f32 },
    Present,
}

/// Records the commands of the frame in progress; `clear` starts a new frame
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    pub size: (u32, u32),
    commands: Vec<DrawCommand>,
    frames_presented: u64,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Commands issued since the most recent clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Canvas for RecordingCanvas {
    type Error = Infallible;

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_draw_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetDrawColor(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FilledCircle { center, radius });
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Present);
        self.frames_presented += 1;
        Ok(())
    }
}
