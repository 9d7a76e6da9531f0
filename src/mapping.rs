//! Device to source-pixel coordinate mapping
//!
//! The page raster is usually shown scaled. Pointer events arrive in device
//! pixels relative to the host surface and are mapped into the raster's own
//! pixel grid, with independent horizontal and vertical scale factors.

use crate::domain::{Point, Viewport};

/// Map a device position into source-pixel space
///
/// Callers guarantee `display_width` and `display_height` are positive.
#[allow(clippy::too_many_arguments)]
pub fn map(
    device_x: f32,
    device_y: f32,
    origin_x: f32,
    origin_y: f32,
    display_width: f32,
    display_height: f32,
    backing_width: f32,
    backing_height: f32,
) -> Point {
    let scale_x = backing_width / display_width;
    let scale_y = backing_height / display_height;
    Point {
        x: (device_x - origin_x) * scale_x,
        y: (device_y - origin_y) * scale_y,
    }
}

/// Map a device position onto a page raster of `backing` size shown in `viewport`
pub fn map_to_page(device_x: f32, device_y: f32, viewport: &Viewport, backing: (u32, u32)) -> Point {
    map(
        device_x,
        device_y,
        viewport.left,
        viewport.top,
        viewport.width,
        viewport.height,
        backing.0 as f32,
        backing.1 as f32,
    )
}

/// Inverse of `map_to_page`, for hosts drawing point handles over the page
pub fn to_device(point: Point, viewport: &Viewport, backing: (u32, u32)) -> (f32, f32) {
    let scale_x = viewport.width / backing.0 as f32;
    let scale_y = viewport.height / backing.1 as f32;
    (
        viewport.left + point.x * scale_x,
        viewport.top + point.y * scale_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_identity_when_unscaled() {
        let p = map(50.0, 70.0, 0.0, 0.0, 100.0, 100.0, 100.0, 100.0);
        assert_eq!(p, Point::new(50.0, 70.0));
    }

    #[test]
    fn test_map_uses_independent_scales() {
        // 400x300 display of an 800x1200 raster, displayed at (10, 20)
        let p = map(110.0, 95.0, 10.0, 20.0, 400.0, 300.0, 800.0, 1200.0);
        assert_eq!(p, Point::new(200.0, 300.0));
    }

    #[test]
    fn test_map_outside_display_is_not_clamped() {
        let p = map(0.0, 0.0, 10.0, 10.0, 50.0, 50.0, 100.0, 100.0);
        assert_eq!(p, Point::new(-20.0, -20.0));
    }

    #[test]
    fn test_to_device_inverts_map_to_page() {
        let viewport = Viewport {
            left: 16.0,
            top: 8.0,
            width: 612.0,
            height: 792.0,
        };
        let backing = (1224, 1584);
        let page = map_to_page(320.0, 410.0, &viewport, backing);
        let (dx, dy) = to_device(page, &viewport, backing);
        assert!((dx - 320.0).abs() < 1e-3);
        assert!((dy - 410.0).abs() < 1e-3);
    }
}
