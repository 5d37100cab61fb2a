//! Easing curves used by the card transitions.

/// Easing curve applied to a tween's normalized progress.
///
/// The `Power2*` family follows the cubic curves commonly sold under that name
/// by web tweening libraries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    Power2In,
    Power2Out,
    Power2InOut,
}

impl Ease {
    /// Map progress `t` (clamped to 0..=1) onto the curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
