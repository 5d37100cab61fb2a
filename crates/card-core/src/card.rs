//! The card's interaction state machine.
//!
//! `Closed → Opened → Zoomed`, each step triggered by a click that hits the
//! letter. The card never touches the platform directly; it reports what the
//! frontend has to do as [`Effect`]s.

use crate::assets::TextureSlot;
use crate::burst;
use crate::constants::*;
use crate::easing::Ease;
use crate::layout;
use crate::picking::{ray_from_ndc, ray_obb};
use crate::state::{sanitize_aspect, Face, Scene};
use crate::tween::{Channel, Completion, TweenSpec, Tweener};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Closed,
    Opened,
    Zoomed,
}

/// Work the frontend performs on behalf of the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    LoadTexture(TextureSlot),
    ReleaseTexture(TextureSlot),
    RetireParticle(usize),
    Download,
    StateChanged(CardState),
}

pub type Effects = SmallVec<[Effect; 4]>;

pub struct Card {
    state: CardState,
    scene: Scene,
    tweens: Tweener,
    rng: StdRng,
}

impl Card {
    pub fn new(aspect: f32, seed: u64) -> Self {
        Self {
            state: CardState::Closed,
            scene: Scene::new(aspect),
            tweens: Tweener::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Effects needed before the first frame.
    pub fn boot(&self) -> Effects {
        let mut fx = Effects::new();
        fx.push(Effect::LoadTexture(TextureSlot::Envelope));
        fx
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tweens(&self) -> &Tweener {
        &self.tweens
    }

    /// Whether a pointer at `ndc` is over the letter.
    pub fn hit_test(&self, ndc: Vec2) -> bool {
        let ray = ray_from_ndc(&self.scene.camera, ndc);
        ray_obb(&ray, &self.scene.letter.transform, letter_half_extents()).is_some()
    }

    /// Handle a click at `ndc`. Misses are ignored.
    pub fn click(&mut self, ndc: Vec2) -> Effects {
        if !self.hit_test(ndc) {
            return Effects::new();
        }
        self.activate()
    }

    /// Advance to the next step as if the letter had been clicked.
    pub fn activate(&mut self) -> Effects {
        match self.state {
            CardState::Closed => self.open(),
            CardState::Opened => self.zoom(),
            CardState::Zoomed => {
                log::info!("[card] download requested");
                let mut fx = Effects::new();
                fx.push(Effect::Download);
                fx
            }
        }
    }

    fn open(&mut self) -> Effects {
        self.tweens.start(
            &self.scene,
            TweenSpec::new(
                Channel::LetterScale,
                layout::opened_scale(),
                OPEN_DURATION,
                Ease::Power2InOut,
            ),
        );
        self.scene.letter.face = Face::Letter;

        let (hearts, flights) = burst::spawn(&mut self.rng, self.scene.letter.transform.rotation);
        self.scene.burst = Some(hearts);
        self.tweens.start_all(&self.scene, flights);

        self.state = CardState::Opened;
        log::info!("[card] opened");
        Effects::from_iter([
            Effect::LoadTexture(TextureSlot::Letter),
            Effect::ReleaseTexture(TextureSlot::Envelope),
            Effect::LoadTexture(TextureSlot::Heart),
            Effect::StateChanged(CardState::Opened),
        ])
    }

    fn zoom(&mut self) -> Effects {
        let (cam_pos, cam_rot) = self.scene.initial_camera();
        let fit = layout::fit_letter(&self.scene.camera, self.scene.camera.aspect);
        let specs = [
            TweenSpec::new(
                Channel::LetterRotation,
                ZOOMED_ROTATION,
                ZOOM_DURATION,
                Ease::Power2InOut,
            )
            .on_complete(Completion::StopSpin),
            TweenSpec::new(
                Channel::LetterScale,
                layout::zoomed_scale(fit),
                ZOOM_DURATION,
                Ease::Power2InOut,
            ),
            TweenSpec::new(
                Channel::LetterPosition,
                Vec3::ZERO,
                ZOOM_DURATION,
                Ease::Power2InOut,
            ),
            TweenSpec::new(Channel::CameraPosition, cam_pos, ZOOM_DURATION, Ease::Power2InOut),
            TweenSpec::new(Channel::CameraRotation, cam_rot, ZOOM_DURATION, Ease::Power2InOut),
        ];
        self.tweens.start_all(&self.scene, specs);
        if let Some(hearts) = &self.scene.burst {
            let fades = burst::fade_out(hearts);
            self.tweens.start_all(&self.scene, fades);
        }

        self.state = CardState::Zoomed;
        log::info!("[card] zoomed ({:.2} x {:.2})", fit.x, fit.y);
        Effects::from_iter([Effect::StateChanged(CardState::Zoomed)])
    }

    /// Advance the idle spin and all tweens by `dt_sec` seconds.
    pub fn tick(&mut self, dt_sec: f32) -> Effects {
        let dt = dt_sec.max(0.0);
        if self.scene.letter.spinning {
            self.scene.letter.transform.rotation.y += SPIN_RATE * dt;
            if let Some(hearts) = &mut self.scene.burst {
                hearts.rotation.y += SPIN_RATE * dt;
            }
        }

        let mut fx = Effects::new();
        for done in self.tweens.tick(dt, &mut self.scene) {
            match done {
                Completion::StopSpin => {
                    self.scene.letter.spinning = false;
                }
                Completion::RetireParticle(i) => self.retire_particle(i, &mut fx),
            }
        }
        fx
    }

    fn retire_particle(&mut self, index: usize, fx: &mut Effects) {
        let Some(hearts) = &mut self.scene.burst else {
            return;
        };
        let Some(p) = hearts.particles.get_mut(index) else {
            return;
        };
        if !p.visible {
            return;
        }
        p.visible = false;
        fx.push(Effect::RetireParticle(index));
        if hearts.visible_count() == 0 {
            self.scene.burst = None;
            self.tweens.cancel_where(|c| {
                matches!(c, Channel::ParticlePosition(_) | Channel::ParticleOpacity(_))
            });
            fx.push(Effect::ReleaseTexture(TextureSlot::Heart));
            log::info!("[card] heart burst finished");
        }
    }

    /// Viewport aspect changed; a zoomed letter is refitted to the new view.
    pub fn resize(&mut self, aspect: f32) {
        let aspect = sanitize_aspect(aspect);
        self.scene.camera.aspect = aspect;
        if self.state == CardState::Zoomed {
            let fit = layout::fit_letter(&self.scene.camera, aspect);
            self.tweens.start(
                &self.scene,
                TweenSpec::new(
                    Channel::LetterScale,
                    layout::zoomed_scale(fit),
                    ZOOM_DURATION,
                    Ease::Power2InOut,
                ),
            );
        }
    }
}
