use glam::Vec2;
use web_sys as web;

/// Pointer position in the canvas' backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    canvas_px_from_client(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

/// Scale a CSS-pixel offset inside the canvas rect to backing-store pixels.
#[inline]
pub fn canvas_px_from_client(x_css: f32, y_css: f32, css_size: Vec2, backing_size: Vec2) -> Vec2 {
    if css_size.x <= 0.0 || css_size.y <= 0.0 {
        return backing_size * 0.5;
    }
    Vec2::new(
        (x_css / css_size.x) * backing_size.x,
        (y_css / css_size.y) * backing_size.y,
    )
}

/// Keys that act like a click on the letter.
#[inline]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}
