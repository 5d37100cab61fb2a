use glam::Vec3;

// Shared scene and timing constants used by the card logic and the web frontend.

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 5.0);

// Letter box geometry (width x thickness x depth before scaling)
pub const LETTER_SIZE: Vec3 = Vec3::new(2.0, 0.1, 1.0);
pub const LETTER_START_ROTATION: Vec3 = Vec3::new(
    std::f32::consts::FRAC_PI_4, // 45°
    std::f32::consts::FRAC_PI_6, // 30°
    0.0,
);

// Idle spin about Y while the card is not zoomed (radians per second)
pub const SPIN_RATE: f32 = 0.3;

// DIN A4 height / width
pub const DIN_A4_RATIO: f32 = 1.414;
pub const OPENED_WIDTH: f32 = 2.0;
pub const LETTER_THICKNESS_SCALE: f32 = 0.1;
// Share of the visible area the zoomed letter may cover
pub const ZOOM_VIEW_FILL: f32 = 0.9;
pub const ZOOMED_ROTATION: Vec3 = Vec3::new(
    std::f32::consts::FRAC_PI_2,
    std::f32::consts::FRAC_PI_2,
    0.0,
);

// Transition durations (seconds)
pub const OPEN_DURATION: f32 = 1.5;
pub const ZOOM_DURATION: f32 = 1.5;
pub const BURST_DURATION: f32 = 3.0;
pub const BURST_FADE_DURATION: f32 = 0.5;

// Heart burst
pub const BURST_PARTICLES: usize = 30;
pub const PARTICLE_SIZE: f32 = 0.2;
pub const BURST_SPREAD_XZ: f32 = 4.0; // offsets drawn from [-SPREAD/2, SPREAD/2)
pub const BURST_RISE_Y: f32 = 4.0; // offsets drawn from [0, RISE)

#[inline]
pub fn letter_half_extents() -> Vec3 {
    LETTER_SIZE * 0.5
}
