use crate::constants::*;
use crate::easing::Ease;
use crate::state::{HeartBurst, Particle};
use crate::tween::{Channel, Completion, TweenSpec};
use glam::Vec3;
use rand::Rng;

/// Random flight offset for one heart: sideways in X/Z, always upward in Y.
pub fn random_offset<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * BURST_SPREAD_XZ,
        rng.gen::<f32>() * BURST_RISE_Y,
        (rng.gen::<f32>() - 0.5) * BURST_SPREAD_XZ,
    )
}

/// Create the heart burst at the group origin together with the tweens that
/// fling each heart outward.
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, group_rotation: Vec3) -> (HeartBurst, Vec<TweenSpec>) {
    let particles = vec![Particle::default(); BURST_PARTICLES];
    let tweens = (0..BURST_PARTICLES)
        .map(|i| {
            TweenSpec::new(
                Channel::ParticlePosition(i),
                particles[i].position + random_offset(rng),
                BURST_DURATION,
                Ease::Power2Out,
            )
        })
        .collect();
    (
        HeartBurst {
            rotation: group_rotation,
            particles,
        },
        tweens,
    )
}

/// Fade every still-visible heart to transparent; each retires on completion.
pub fn fade_out(burst: &HeartBurst) -> Vec<TweenSpec> {
    burst
        .particles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.visible)
        .map(|(i, _)| {
            TweenSpec::new(
                Channel::ParticleOpacity(i),
                0.0,
                BURST_FADE_DURATION,
                Ease::Power2Out,
            )
            .on_complete(Completion::RetireParticle(i))
        })
        .collect()
}
