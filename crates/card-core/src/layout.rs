//! Sizing of the letter relative to the camera's view.

use crate::constants::*;
use crate::state::Camera;
use glam::{Vec2, Vec3};

/// Width and height of the view frustum slice at `distance` from the camera.
pub fn visible_extent(camera: &Camera, distance: f32) -> Vec2 {
    let h = 2.0 * (camera.fovy_radians() / 2.0).tan() * distance.abs();
    Vec2::new(h * camera.aspect, h)
}

/// Largest DIN A4 letter that fits in `ZOOM_VIEW_FILL` of the view at the
/// camera's distance from the origin, with the given viewport aspect.
pub fn fit_letter(camera: &Camera, aspect: f32) -> Vec2 {
    let mut cam = camera.clone();
    cam.aspect = aspect;
    let visible = visible_extent(&cam, cam.position.z);
    let max_w = visible.x * ZOOM_VIEW_FILL;
    let max_h = visible.y * ZOOM_VIEW_FILL;

    let mut width = max_w;
    let mut height = width * DIN_A4_RATIO;
    if height > max_h {
        height = max_h;
        width = height / DIN_A4_RATIO;
    }
    Vec2::new(width, height)
}

/// Scale that stretches the base letter box to `fit` (width, height).
#[inline]
pub fn zoomed_scale(fit: Vec2) -> Vec3 {
    Vec3::new(fit.x / 2.0, LETTER_THICKNESS_SCALE, fit.y / 2.0)
}

#[inline]
pub fn opened_scale() -> Vec3 {
    Vec3::new(
        OPENED_WIDTH,
        LETTER_THICKNESS_SCALE,
        OPENED_WIDTH * DIN_A4_RATIO,
    )
}
