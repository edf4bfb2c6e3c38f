//! Frame loop
//!
//! One iteration drains pending input into the scene, then draws a frame.
//! Platform front ends (web, headless) only feed events and call
//! [`App::frame`].

use crate::renderer::{Canvas, render_scene};
use crate::settings::{Settings, SettingsError};
use crate::sim::{InputEvent, LoopControl, SceneState, ShadowFrame, drain_events};

/// Scene, settings and the canvas it draws on
pub struct App<C: Canvas> {
    pub state: SceneState,
    pub settings: Settings,
    pub canvas: C,
    frame_count: u64,
    last_frame: Option<ShadowFrame>,
}

impl<C: Canvas> App<C> {
    pub fn new(settings: Settings, canvas: C) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!(
            "Scene: light at ({:.0}, {:.0}) r={}, occluder at ({:.0}, {:.0}) r={}, {} rays, precedence {}",
            settings.light_center.x,
            settings.light_center.y,
            settings.light_radius,
            settings.occluder_center.x,
            settings.occluder_center.y,
            settings.occluder_radius,
            settings.ray_count,
            settings.press_precedence.as_str(),
        );
        Ok(Self {
            state: SceneState::new(&settings),
            settings,
            canvas,
            frame_count: 0,
            last_frame: None,
        })
    }

    /// Run one loop iteration: apply `events` in order, then render
    ///
    /// The frame is drawn even when a quit arrives; the caller stops looping
    /// on `LoopControl::Quit`.
    pub fn frame<I>(&mut self, events: I) -> Result<LoopControl, C::Error>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let control = drain_events(&mut self.state, events, &self.settings);
        debug_assert!(self.state.is_separated(1e-2));

        let frame = render_scene(&self.state, &self.settings, &mut self.canvas)?;
        self.frame_count += 1;
        self.last_frame = Some(frame);
        Ok(control)
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Rays of the most recent frame
    pub fn last_frame(&self) -> Option<&ShadowFrame> {
        self.last_frame.as_ref()
    }
}
