//! Rendering
//!
//! The scene draws itself through the small [`Canvas`] trait. Backends:
//! - [`RecordingCanvas`]: records draw commands (tests, headless runs)
//! - [`GpuCanvas`]: WebGPU vertex pipeline

pub mod pipeline;
pub mod recording;
pub mod shapes;
pub mod vertex;

pub use pipeline::GpuCanvas;
pub use recording::{DrawCommand, RecordingCanvas};

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{SceneState, ShadowFrame, cast_shadow_rays};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized components, sRGB-encoded
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Normalized components with color channels decoded to linear light
    pub fn to_linear_f32(self) -> [f32; 4] {
        fn decode(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b), self.a as f32 / 255.0]
    }
}

/// Colors for scene elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(20, 20, 20);
    pub const RAY: Color = Color::rgba(255, 255, 255, 255);
    pub const OCCLUDER: Color = Color::rgb(100, 100, 100);
    pub const LIGHT: Color = Color::rgb(255, 255, 0);
}

/// Minimal drawing surface
///
/// Coordinates are canvas pixels, origin top-left, y down.
pub trait Canvas {
    type Error;

    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    /// Color for subsequent line and circle draws
    fn set_draw_color(&mut self, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2);
    fn draw_filled_circle(&mut self, center: Vec2, radius: f32);
    /// Show everything drawn since the last clear
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Draw one full frame: background, rays, occluder, light
pub fn render_scene<C: Canvas>(
    state: &SceneState,
    settings: &Settings,
    canvas: &mut C,
) -> Result<ShadowFrame, C::Error> {
    let frame = cast_shadow_rays(&state.light, &state.occluder, settings);

    canvas.clear(colors::BACKGROUND);

    canvas.set_draw_color(colors::RAY);
    for segment in &frame.segments {
        canvas.draw_line(segment.start, segment.end);
    }

    canvas.set_draw_color(colors::OCCLUDER);
    canvas.draw_filled_circle(state.occluder.center, state.occluder.radius);

    canvas.set_draw_color(colors::LIGHT);
    canvas.draw_filled_circle(state.light.center, state.light.radius);

    canvas.present()?;

    log::trace!(
        "Frame: {} rays, {} clipped, half-spread {:.4} rad",
        frame.segments.len(),
        frame.clipped_count(),
        frame.cone.half_spread
    );
    Ok(frame)
}
