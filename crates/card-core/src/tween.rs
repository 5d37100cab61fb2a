//! Property tweens for the fixed set of animated scene values.
//!
//! Not a general animation system: each tween drives one
//! [`Channel`] of the [`Scene`] and may carry a [`Completion`] that the card
//! interprets once the tween reaches its target.

use crate::easing::Ease;
use crate::state::Scene;
use glam::Vec3;
use smallvec::SmallVec;

/// Animated scene property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    LetterPosition,
    LetterRotation,
    LetterScale,
    CameraPosition,
    CameraRotation,
    ParticlePosition(usize),
    ParticleOpacity(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenValue {
    Vec3(Vec3),
    Scalar(f32),
}

impl From<Vec3> for TweenValue {
    fn from(v: Vec3) -> Self {
        TweenValue::Vec3(v)
    }
}

impl From<f32> for TweenValue {
    fn from(v: f32) -> Self {
        TweenValue::Scalar(v)
    }
}

impl TweenValue {
    fn lerp(self, to: TweenValue, t: f32) -> TweenValue {
        match (self, to) {
            (TweenValue::Vec3(a), TweenValue::Vec3(b)) => TweenValue::Vec3(a.lerp(b, t)),
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(a + (b - a) * t),
            // Mismatched kinds cannot interpolate; jump to the target.
            (_, b) => b,
        }
    }
}

/// Follow-up the card performs when a tween finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    StopSpin,
    RetireParticle(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub channel: Channel,
    pub target: TweenValue,
    pub duration: f32,
    pub ease: Ease,
    pub on_complete: Option<Completion>,
}

impl TweenSpec {
    pub fn new(channel: Channel, target: impl Into<TweenValue>, duration: f32, ease: Ease) -> Self {
        Self {
            channel,
            target: target.into(),
            duration,
            ease,
            on_complete: None,
        }
    }

    pub fn on_complete(mut self, completion: Completion) -> Self {
        self.on_complete = Some(completion);
        self
    }
}

#[derive(Clone, Debug)]
struct Tween {
    spec: TweenSpec,
    from: TweenValue,
    elapsed: f32,
}

#[derive(Clone, Debug, Default)]
pub struct Tweener {
    tweens: Vec<Tween>,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween from the channel's current value. A running tween on the
    /// same channel is dropped without firing its completion.
    pub fn start(&mut self, scene: &Scene, spec: TweenSpec) {
        let Some(from) = read(scene, spec.channel) else {
            log::warn!("[tween] no value for {:?}; ignoring", spec.channel);
            return;
        };
        self.tweens.retain(|t| t.spec.channel != spec.channel);
        self.tweens.push(Tween {
            spec,
            from,
            elapsed: 0.0,
        });
    }

    pub fn start_all(&mut self, scene: &Scene, specs: impl IntoIterator<Item = TweenSpec>) {
        for spec in specs {
            self.start(scene, spec);
        }
    }

    /// Advance every tween by `dt_sec`, write the eased values into `scene`
    /// and return the completions of tweens that finished, in start order.
    pub fn tick(&mut self, dt_sec: f32, scene: &mut Scene) -> SmallVec<[Completion; 4]> {
        let dt = dt_sec.max(0.0);
        let mut done = SmallVec::new();
        self.tweens.retain_mut(|tw| {
            tw.elapsed += dt;
            let progress = if tw.spec.duration > 0.0 {
                (tw.elapsed / tw.spec.duration).min(1.0)
            } else {
                1.0
            };
            let value = tw.from.lerp(tw.spec.target, tw.spec.ease.apply(progress));
            write(scene, tw.spec.channel, value);
            if progress >= 1.0 {
                if let Some(c) = tw.spec.on_complete {
                    done.push(c);
                }
                false
            } else {
                true
            }
        });
        done
    }

    /// Drop tweens whose channel matches, without firing completions.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(Channel) -> bool) {
        self.tweens.retain(|t| !pred(t.spec.channel));
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn is_animating(&self, channel: Channel) -> bool {
        self.tweens.iter().any(|t| t.spec.channel == channel)
    }
}

fn read(scene: &Scene, channel: Channel) -> Option<TweenValue> {
    let letter = &scene.letter.transform;
    let particle = |i: usize| scene.burst.as_ref().and_then(|b| b.particles.get(i));
    match channel {
        Channel::LetterPosition => Some(letter.position.into()),
        Channel::LetterRotation => Some(letter.rotation.into()),
        Channel::LetterScale => Some(letter.scale.into()),
        Channel::CameraPosition => Some(scene.camera.position.into()),
        Channel::CameraRotation => Some(scene.camera.rotation.into()),
        Channel::ParticlePosition(i) => particle(i).map(|p| p.position.into()),
        Channel::ParticleOpacity(i) => particle(i).map(|p| p.opacity.into()),
    }
}

fn write(scene: &mut Scene, channel: Channel, value: TweenValue) {
    match (channel, value) {
        (Channel::LetterPosition, TweenValue::Vec3(v)) => scene.letter.transform.position = v,
        (Channel::LetterRotation, TweenValue::Vec3(v)) => scene.letter.transform.rotation = v,
        (Channel::LetterScale, TweenValue::Vec3(v)) => scene.letter.transform.scale = v,
        (Channel::CameraPosition, TweenValue::Vec3(v)) => scene.camera.position = v,
        (Channel::CameraRotation, TweenValue::Vec3(v)) => scene.camera.rotation = v,
        (Channel::ParticlePosition(i), TweenValue::Vec3(v)) => {
            if let Some(p) = scene.burst.as_mut().and_then(|b| b.particles.get_mut(i)) {
                p.position = v;
            }
        }
        (Channel::ParticleOpacity(i), TweenValue::Scalar(v)) => {
            if let Some(p) = scene.burst.as_mut().and_then(|b| b.particles.get_mut(i)) {
                p.opacity = v;
            }
        }
        (channel, value) => {
            log::warn!("[tween] {:?} cannot take {:?}", channel, value);
        }
    }
}
