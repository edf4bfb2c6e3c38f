//! Input events and per-frame event draining
//!
//! Events are applied to the scene one at a time, in arrival order.

use glam::Vec2;

use super::state::SceneState;
use crate::settings::Settings;

/// Mouse/pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button / primary touch
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index
    pub fn from_dom_index(index: i16) -> Self {
        match index {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other.max(0) as u16),
        }
    }
}

/// A discrete input event in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerDown { button: PointerButton, position: Vec2 },
    PointerUp { button: PointerButton },
    PointerMove { position: Vec2 },
}

/// Whether the outer loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Apply a single event to the scene
pub fn handle_event(state: &mut SceneState, event: &InputEvent, settings: &Settings) -> LoopControl {
    match *event {
        InputEvent::Quit => {
            log::info!("Quit requested");
            return LoopControl::Quit;
        }
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            position,
        } => {
            state.press(position, settings.hit_test_buffer, settings.press_precedence);
        }
        // Only the primary button grabs
        InputEvent::PointerDown { .. } => {}
        InputEvent::PointerUp { .. } => state.release(),
        InputEvent::PointerMove { position } => {
            state.drag_to(position);
        }
    }
    LoopControl::Continue
}

/// Apply every pending event in order
///
/// A quit does not cut the drain short; the remaining events still apply and
/// the quit is reported once all are consumed.
pub fn drain_events<I>(state: &mut SceneState, events: I, settings: &Settings) -> LoopControl
where
    I: IntoIterator<Item = InputEvent>,
{
    let mut control = LoopControl::Continue;
    for event in events {
        if handle_event(state, &event, settings) == LoopControl::Quit {
            control = LoopControl::Quit;
        }
    }
    control
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DragTarget;

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            position: Vec2::new(x, y),
        }
    }

    fn up() -> InputEvent {
        InputEvent::PointerUp {
            button: PointerButton::Primary,
        }
    }

    fn move_to(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove {
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_drag_light_session() {
        let settings = Settings::default();
        let mut state = SceneState::new(&settings);

        let control = drain_events(
            &mut state,
            [down(100.0, 100.0), move_to(150.0, 120.0), move_to(200.0, 90.0)],
            &settings,
        );
        assert_eq!(control, LoopControl::Continue);
        assert_eq!(state.drag, DragTarget::Light);
        assert_eq!(state.light.center, Vec2::new(200.0, 90.0));
        assert_eq!(state.occluder.center, settings.occluder_center);
    }

    #[test]
    fn test_release_then_move_is_ignored() {
        let settings = Settings::default();
        let mut state = SceneState::new(&settings);

        drain_events(&mut state, [down(400.0, 300.0), move_to(500.0, 400.0)], &settings);
        assert_eq!(state.drag, DragTarget::Occluder);
        assert_eq!(state.occluder.center, Vec2::new(500.0, 400.0));

        drain_events(&mut state, [up(), move_to(600.0, 100.0)], &settings);
        assert_eq!(state.drag, DragTarget::None);
        assert_eq!(state.occluder.center, Vec2::new(500.0, 400.0));
    }

    #[test]
    fn test_release_without_drag_is_harmless() {
        let settings = Settings::default();
        let mut state = SceneState::new(&settings);
        drain_events(&mut state, [up(), up()], &settings);
        assert_eq!(state, SceneState::new(&settings));
    }

    #[test]
    fn test_secondary_button_does_not_grab() {
        let settings = Settings::default();
        let mut state = SceneState::new(&settings);
        let press = InputEvent::PointerDown {
            button: PointerButton::Secondary,
            position: Vec2::new(100.0, 100.0),
        };
        drain_events(&mut state, [press, move_to(200.0, 200.0)], &settings);
        assert_eq!(state.drag, DragTarget::None);
        assert_eq!(state.light.center, settings.light_center);
    }

    #[test]
    fn test_any_button_release_ends_drag() {
        let settings = Settings::default();
        let mut state = SceneState::new(&settings);
        let release = InputEvent::PointerUp {
            button: PointerButton::Middle,
        };
        drain_events(&mut state, [down(100.0, 100.0), release], &settings);
        assert_eq!(state.drag, DragTarget::None);
    }

    #[test]
    fn test_quit_still_drains_remaining_events() {
        let settings = Settings::default();
        let mut state = SceneState::new(&settings);
        let control = drain_events(
            &mut state,
            [down(100.0, 100.0), InputEvent::Quit, move_to(120.0, 140.0)],
            &settings,
        );
        assert_eq!(control, LoopControl::Quit);
        assert_eq!(state.light.center, Vec2::new(120.0, 140.0));
    }

    #[test]
    fn test_dom_button_mapping() {
        assert_eq!(PointerButton::from_dom_index(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom_index(1), PointerButton::Middle);
        assert_eq!(PointerButton::from_dom_index(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom_index(4), PointerButton::Other(4));
    }
}
