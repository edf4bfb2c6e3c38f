//! Scene simulation
//!
//! Geometry and interaction logic, free of rendering and platform code:
//! - Rays and circles
//! - Ray-circle intersection and drag separation
//! - Shadow cone ray casting
//! - Drag state machine driven by input events

pub mod collision;
pub mod geometry;
pub mod shadow;
pub mod state;
pub mod tick;

pub use collision::{forward_hit, ray_circle_intersection, resolve_drag};
pub use geometry::{Circle, Ray, safe_direction};
pub use shadow::{RaySegment, ShadowCone, ShadowFrame, cast_shadow_rays, sample_angle};
pub use state::{DragTarget, SceneState};
pub use tick::{InputEvent, LoopControl, PointerButton, drain_events, handle_event};
