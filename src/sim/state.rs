//! Scene state and the drag state machine
//!
//! All mutable state of the visualization lives in [`SceneState`]; it is
//! passed explicitly to input handling and rendering each frame.

use glam::Vec2;

use super::collision::resolve_drag;
use super::geometry::Circle;
use crate::settings::{PressPrecedence, Settings};

/// Which circle, if any, follows the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    Light,
    Occluder,
}

impl DragTarget {
    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragTarget::None)
    }
}

/// Complete scene state
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// The light ("sun")
    pub light: Circle,
    /// The circle casting the shadow
    pub occluder: Circle,
    /// Current drag
    pub drag: DragTarget,
}

impl SceneState {
    /// Scene at its configured starting positions
    pub fn new(settings: &Settings) -> Self {
        Self {
            light: Circle::new(settings.light_center, settings.light_radius),
            occluder: Circle::new(settings.occluder_center, settings.occluder_radius),
            drag: DragTarget::None,
        }
    }

    /// Start dragging whichever circle is under `pos`
    ///
    /// A press that lands on neither circle leaves the drag target as is.
    pub fn press(&mut self, pos: Vec2, buffer: f32, precedence: PressPrecedence) {
        let on_light = self.light.hit_test(pos, buffer);
        let on_occluder = self.occluder.hit_test(pos, buffer);

        let target = match (on_light, on_occluder, precedence) {
            (true, true, PressPrecedence::OccluderFirst) => DragTarget::Occluder,
            (true, true, PressPrecedence::LightFirst) => DragTarget::Light,
            (true, false, _) => DragTarget::Light,
            (false, true, _) => DragTarget::Occluder,
            (false, false, _) => return,
        };

        log::debug!("Drag start: {:?} at ({:.1}, {:.1})", target, pos.x, pos.y);
        self.drag = target;
    }

    /// Stop any drag
    pub fn release(&mut self) {
        if self.drag.is_dragging() {
            log::debug!("Drag end: {:?}", self.drag);
        }
        self.drag = DragTarget::None;
    }

    /// Move the dragged circle toward `pos`, kept clear of the other circle
    ///
    /// Returns whether a circle moved.
    pub fn drag_to(&mut self, pos: Vec2) -> bool {
        let (dragged, other) = match self.drag {
            DragTarget::None => return false,
            DragTarget::Light => (&mut self.light, &self.occluder),
            DragTarget::Occluder => (&mut self.occluder, &self.light),
        };

        // If the pointer lands dead on the other center, keep the current side
        let fallback = dragged.center - other.center;
        let resolved = resolve_drag(pos, dragged.radius, other.center, other.radius, fallback);
        if resolved != pos {
            log::trace!(
                "Clamped {:?} from ({:.1}, {:.1}) to ({:.1}, {:.1})",
                self.drag,
                pos.x,
                pos.y,
                resolved.x,
                resolved.y
            );
        }

        let moved = dragged.center != resolved;
        dragged.center = resolved;
        moved
    }

    /// Whether the light and occluder are clear of each other (within `epsilon`)
    pub fn is_separated(&self, epsilon: f32) -> bool {
        self.light.distance_to(&self.occluder) >= self.light.radius + self.occluder.radius - epsilon
    }
}
