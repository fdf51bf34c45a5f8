use glam::Vec2;

use crate::constants::NARROW_VIEWPORT_WIDTH;

/// Raw input forwarded by the host, in client (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { client_x: f32, client_y: f32 },
    Wheel { delta_y: f32 },
    Click { client_x: f32, client_y: f32 },
}

/// Viewport dimensions captured once at activation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_VIEWPORT_WIDTH
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

/// Map client coordinates to [-1, 1]², +y up. A degenerate viewport maps to
/// the centre.
#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, viewport: Viewport) -> Vec2 {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (client_x / viewport.width) * 2.0 - 1.0;
    let y = -((client_y / viewport.height) * 2.0 - 1.0);
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

/// Latest-sample pointer state. Samples overwrite each other; nothing is
/// queued. Wheel input is applied by the scenes as it arrives.
#[derive(Clone, Copy, Debug)]
pub struct InputTracker {
    viewport: Viewport,
    pointer: Vec2,
    client: Option<Vec2>,
}

impl InputTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: Vec2::ZERO,
            client: None,
        }
    }

    pub fn record(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { client_x, client_y }
            | InputEvent::Click { client_x, client_y } => {
                self.pointer = normalize_pointer(client_x, client_y, self.viewport);
                self.client = Some(Vec2::new(client_x, client_y));
            }
            InputEvent::Wheel { .. } => {}
        }
    }

    /// Normalized pointer in [-1, 1]², +y up.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Last pointer position in client pixels; `None` until the first sample.
    #[inline]
    pub fn client_position(&self) -> Option<Vec2> {
        self.client
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn pointer_corners_and_centre() {
        assert_eq!(normalize_pointer(0.0, 0.0, VIEW), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(800.0, 600.0, VIEW), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_pointer(400.0, 300.0, VIEW), Vec2::ZERO);
    }

    #[test]
    fn pointer_outside_viewport_is_clamped() {
        let p = normalize_pointer(-50.0, 900.0, VIEW);
        assert_eq!(p, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn zero_viewport_maps_to_centre() {
        let p = normalize_pointer(10.0, 10.0, Viewport::new(0.0, 0.0));
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn samples_overwrite() {
        let mut t = InputTracker::new(VIEW);
        t.record(InputEvent::PointerMove {
            client_x: 0.0,
            client_y: 0.0,
        });
        t.record(InputEvent::PointerMove {
            client_x: 800.0,
            client_y: 300.0,
        });
        t.record(InputEvent::Wheel { delta_y: 120.0 });
        assert_eq!(t.pointer(), Vec2::new(1.0, 0.0));
        assert_eq!(t.client_position(), Some(Vec2::new(800.0, 300.0)));
    }

    #[test]
    fn no_client_position_before_pointer_input() {
        let mut t = InputTracker::new(VIEW);
        t.record(InputEvent::Wheel { delta_y: 40.0 });
        assert_eq!(t.client_position(), None);
        assert_eq!(t.pointer(), Vec2::ZERO);
    }

    #[test]
    fn narrow_threshold_is_exclusive() {
        assert!(Viewport::new(639.0, 800.0).is_narrow());
        assert!(!Viewport::new(640.0, 800.0).is_narrow());
    }
}
