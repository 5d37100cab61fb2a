use card_core::{
    Channel, Completion, Ease, HeartBurst, Particle, Scene, TweenSpec, Tweener,
};
use glam::Vec3;

fn scene_with_hearts(n: usize) -> Scene {
    let mut scene = Scene::new(1.0);
    scene.burst = Some(HeartBurst {
        rotation: Vec3::ZERO,
        particles: vec![Particle::default(); n],
    });
    scene
}

#[test]
fn easing_endpoints() {
    for ease in [Ease::Linear, Ease::Power2In, Ease::Power2Out, Ease::Power2InOut] {
        assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
        assert_eq!(ease.apply(1.0), 1.0, "{:?}", ease);
        // out-of-range progress is clamped
        assert_eq!(ease.apply(-3.0), 0.0, "{:?}", ease);
        assert_eq!(ease.apply(7.0), 1.0, "{:?}", ease);
    }
}

#[test]
fn easing_midpoints() {
    assert!((Ease::Linear.apply(0.5) - 0.5).abs() < 1e-6);
    assert!((Ease::Power2In.apply(0.5) - 0.125).abs() < 1e-6);
    assert!((Ease::Power2Out.apply(0.5) - 0.875).abs() < 1e-6);
    assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
    assert!(Ease::Power2InOut.apply(0.25) < 0.25);
    assert!(Ease::Power2InOut.apply(0.75) > 0.75);
}

#[test]
fn easing_is_monotonic() {
    for ease in [Ease::Power2In, Ease::Power2Out, Ease::Power2InOut] {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.apply(i as f32 / 100.0);
            assert!(v >= prev, "{:?} dipped at {}", ease, i);
            prev = v;
        }
    }
}

#[test]
fn linear_tween_interpolates_from_start_value() {
    let mut scene = Scene::new(1.0);
    scene.letter.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let mut tw = Tweener::new();
    tw.start(
        &scene,
        TweenSpec::new(Channel::LetterPosition, Vec3::new(3.0, 2.0, 0.0), 1.0, Ease::Linear),
    );
    assert!(tw.is_animating(Channel::LetterPosition));

    let done = tw.tick(0.5, &mut scene);
    assert!(done.is_empty());
    let p = scene.letter.transform.position;
    assert!((p - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-5);

    tw.tick(0.6, &mut scene);
    assert!((scene.letter.transform.position - Vec3::new(3.0, 2.0, 0.0)).length() < 1e-5);
    assert!(tw.is_idle());
}

#[test]
fn new_tween_on_same_channel_replaces_old() {
    let mut scene = Scene::new(1.0);
    let mut tw = Tweener::new();
    tw.start(
        &scene,
        TweenSpec::new(Channel::LetterScale, Vec3::splat(2.0), 1.0, Ease::Linear)
            .on_complete(Completion::StopSpin),
    );
    tw.tick(0.5, &mut scene);
    tw.start(
        &scene,
        TweenSpec::new(Channel::LetterScale, Vec3::splat(3.0), 1.0, Ease::Linear),
    );
    assert_eq!(tw.len(), 1);

    let done = tw.tick(2.0, &mut scene);
    assert!(done.is_empty(), "replaced tween must not fire its completion");
    assert!((scene.letter.transform.scale - Vec3::splat(3.0)).length() < 1e-5);
}

#[test]
fn different_channels_run_side_by_side() {
    let mut scene = Scene::new(1.0);
    let mut tw = Tweener::new();
    tw.start_all(
        &scene,
        [
            TweenSpec::new(Channel::LetterScale, Vec3::splat(2.0), 1.0, Ease::Linear),
            TweenSpec::new(Channel::CameraPosition, Vec3::new(0.0, 0.0, 9.0), 1.0, Ease::Linear),
        ],
    );
    assert_eq!(tw.len(), 2);
    tw.tick(1.0, &mut scene);
    assert!((scene.camera.position.z - 9.0).abs() < 1e-5);
    assert!((scene.letter.transform.scale.x - 2.0).abs() < 1e-5);
}

#[test]
fn zero_duration_completes_on_next_tick() {
    let mut scene = Scene::new(1.0);
    let mut tw = Tweener::new();
    tw.start(
        &scene,
        TweenSpec::new(Channel::LetterRotation, Vec3::new(1.0, 2.0, 3.0), 0.0, Ease::Power2Out)
            .on_complete(Completion::StopSpin),
    );
    let done = tw.tick(0.0, &mut scene);
    assert_eq!(done.as_slice(), &[Completion::StopSpin]);
    assert_eq!(scene.letter.transform.rotation, Vec3::new(1.0, 2.0, 3.0));
    assert!(tw.is_idle());
}

#[test]
fn negative_dt_does_not_rewind() {
    let mut scene = Scene::new(1.0);
    let mut tw = Tweener::new();
    tw.start(
        &scene,
        TweenSpec::new(Channel::LetterPosition, Vec3::X, 1.0, Ease::Linear),
    );
    tw.tick(0.5, &mut scene);
    tw.tick(-10.0, &mut scene);
    assert!((scene.letter.transform.position.x - 0.5).abs() < 1e-5);
}

#[test]
fn completions_follow_start_order() {
    let mut scene = scene_with_hearts(3);
    let mut tw = Tweener::new();
    for i in [2, 0, 1] {
        tw.start(
            &scene,
            TweenSpec::new(Channel::ParticleOpacity(i), 0.0, 0.5, Ease::Power2Out)
                .on_complete(Completion::RetireParticle(i)),
        );
    }
    let done = tw.tick(1.0, &mut scene);
    assert_eq!(
        done.as_slice(),
        &[
            Completion::RetireParticle(2),
            Completion::RetireParticle(0),
            Completion::RetireParticle(1),
        ]
    );
    let burst = scene.burst.as_ref().unwrap();
    assert!(burst.particles.iter().all(|p| p.opacity == 0.0));
}

#[test]
fn particle_channels_need_a_burst() {
    let scene = Scene::new(1.0);
    let mut tw = Tweener::new();
    tw.start(
        &scene,
        TweenSpec::new(Channel::ParticleOpacity(0), 0.0, 1.0, Ease::Linear),
    );
    assert!(tw.is_idle());

    let scene = scene_with_hearts(1);
    tw.start(
        &scene,
        TweenSpec::new(Channel::ParticlePosition(5), Vec3::Y, 1.0, Ease::Linear),
    );
    assert!(tw.is_idle());
}

#[test]
fn cancel_where_drops_matching_tweens_silently() {
    let mut scene = scene_with_hearts(2);
    let mut tw = Tweener::new();
    tw.start(
        &scene,
        TweenSpec::new(Channel::ParticleOpacity(0), 0.0, 0.1, Ease::Linear)
            .on_complete(Completion::RetireParticle(0)),
    );
    tw.start(
        &scene,
        TweenSpec::new(Channel::ParticlePosition(1), Vec3::Y, 0.1, Ease::Linear),
    );
    tw.start(
        &scene,
        TweenSpec::new(Channel::LetterScale, Vec3::splat(2.0), 0.1, Ease::Linear),
    );
    tw.cancel_where(|c| matches!(c, Channel::ParticlePosition(_) | Channel::ParticleOpacity(_)));
    assert_eq!(tw.len(), 1);
    assert!(tw.tick(1.0, &mut scene).is_empty());
    assert_eq!(scene.burst.as_ref().unwrap().particles[0].opacity, 1.0);
}
