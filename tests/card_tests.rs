// Host-side tests for the card's interaction flow.

use card_core::{
    layout, Card, CardState, Effect, Face, TextureSlot, CAMERA_START, LETTER_START_ROTATION,
    SPIN_RATE, ZOOMED_ROTATION,
};
use glam::{Vec2, Vec3};

const ASPECT: f32 = 16.0 / 9.0;
const CENTRE: Vec2 = Vec2::ZERO;
const CORNER: Vec2 = Vec2::new(0.95, 0.95);

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

/// Tick in 100 ms steps for `seconds`, collecting every effect.
fn run(card: &mut Card, seconds: f32) -> Vec<Effect> {
    let steps = (seconds / 0.1).ceil() as usize;
    let mut out = Vec::new();
    for _ in 0..steps {
        out.extend(card.tick(0.1));
    }
    out
}

#[test]
fn boot_requests_envelope_texture() {
    let card = Card::new(ASPECT, 1);
    assert_eq!(card.boot().as_slice(), &[Effect::LoadTexture(TextureSlot::Envelope)]);
    assert_eq!(card.state(), CardState::Closed);
    assert_eq!(card.scene().letter.face, Face::Envelope);
    assert_eq!(card.scene().camera.position, CAMERA_START);
}

#[test]
fn closed_letter_spins_about_y() {
    let mut card = Card::new(ASPECT, 1);
    card.tick(1.0);
    let rot = card.scene().letter.transform.rotation;
    assert!((rot.y - (LETTER_START_ROTATION.y + SPIN_RATE)).abs() < 1e-5);
    assert!((rot.x - LETTER_START_ROTATION.x).abs() < 1e-6);
}

#[test]
fn click_that_misses_does_nothing() {
    let mut card = Card::new(ASPECT, 1);
    assert!(card.click(CORNER).is_empty());
    assert_eq!(card.state(), CardState::Closed);
    assert!(card.tweens().is_idle());
}

#[test]
fn first_hit_opens_the_envelope() {
    let mut card = Card::new(ASPECT, 1);
    let fx = card.click(CENTRE);
    assert_eq!(
        fx.as_slice(),
        &[
            Effect::LoadTexture(TextureSlot::Letter),
            Effect::ReleaseTexture(TextureSlot::Envelope),
            Effect::LoadTexture(TextureSlot::Heart),
            Effect::StateChanged(CardState::Opened),
        ]
    );
    assert_eq!(card.state(), CardState::Opened);
    assert_eq!(card.scene().letter.face, Face::Letter);

    let burst = card.scene().burst.as_ref().expect("burst spawned");
    assert_eq!(burst.particles.len(), card_core::BURST_PARTICLES);
    assert_eq!(burst.rotation, card.scene().letter.transform.rotation);
    assert!(burst.particles.iter().all(|p| p.visible && p.opacity == 1.0));
}

#[test]
fn opening_scales_letter_to_din_a4() {
    let mut card = Card::new(ASPECT, 1);
    card.click(CENTRE);
    run(&mut card, 2.0);
    assert!(approx_vec(
        card.scene().letter.transform.scale,
        layout::opened_scale()
    ));
    // still spinning while opened
    assert!(card.scene().letter.spinning);
}

#[test]
fn hearts_fly_upward_within_burst_bounds() {
    let mut card = Card::new(ASPECT, 5);
    card.click(CENTRE);
    run(&mut card, 3.5);
    let burst = card.scene().burst.as_ref().expect("burst alive while opened");
    for p in &burst.particles {
        assert!(p.position.y >= 0.0 && p.position.y < 4.0);
        assert!(p.position.x >= -2.0 && p.position.x < 2.0);
        assert!(p.position.z >= -2.0 && p.position.z < 2.0);
    }
    assert!(burst.particles.iter().any(|p| p.position != Vec3::ZERO));
}

#[test]
fn second_hit_zooms_and_settles() {
    let mut card = Card::new(ASPECT, 1);
    card.click(CENTRE);
    run(&mut card, 0.5);
    let fx = card.click(CENTRE);
    assert_eq!(fx.as_slice(), &[Effect::StateChanged(CardState::Zoomed)]);
    assert_eq!(card.state(), CardState::Zoomed);

    let effects = run(&mut card, 2.0);
    let scene = card.scene();
    assert!(!scene.letter.spinning);
    assert!(approx_vec(scene.letter.transform.rotation, ZOOMED_ROTATION));
    assert!(approx_vec(scene.letter.transform.position, Vec3::ZERO));
    assert!(approx_vec(scene.camera.position, CAMERA_START));

    let fit = layout::fit_letter(&scene.camera, ASPECT);
    assert!(approx_vec(scene.letter.transform.scale, layout::zoomed_scale(fit)));

    // every heart retired exactly once, then the texture is released once
    let retired = effects
        .iter()
        .filter(|e| matches!(e, Effect::RetireParticle(_)))
        .count();
    assert_eq!(retired, card_core::BURST_PARTICLES);
    let releases: Vec<_> = effects
        .iter()
        .filter(|e| **e == Effect::ReleaseTexture(TextureSlot::Heart))
        .collect();
    assert_eq!(releases.len(), 1);
    assert!(scene.burst.is_none());
    assert!(card.tweens().is_idle());
}

#[test]
fn spin_stops_only_after_zoom_rotation_completes() {
    let mut card = Card::new(ASPECT, 1);
    card.click(CENTRE);
    card.click(CENTRE);
    card.tick(0.5);
    assert!(card.scene().letter.spinning);
    run(&mut card, 1.5);
    assert!(!card.scene().letter.spinning);
    let before = card.scene().letter.transform.rotation;
    card.tick(1.0);
    assert_eq!(card.scene().letter.transform.rotation, before);
}

#[test]
fn zoomed_clicks_request_download_every_time() {
    let mut card = Card::new(ASPECT, 1);
    card.click(CENTRE);
    card.click(CENTRE);
    run(&mut card, 2.0);
    for _ in 0..2 {
        let fx = card.click(CENTRE);
        assert_eq!(fx.as_slice(), &[Effect::Download]);
        assert_eq!(card.state(), CardState::Zoomed);
    }
}

#[test]
fn activate_steps_without_hit_test() {
    let mut card = Card::new(ASPECT, 1);
    assert!(card.activate().contains(&Effect::StateChanged(CardState::Opened)));
    assert!(card.activate().contains(&Effect::StateChanged(CardState::Zoomed)));
    assert_eq!(card.activate().as_slice(), &[Effect::Download]);
}

#[test]
fn resize_leaves_closed_letter_alone() {
    let mut card = Card::new(ASPECT, 1);
    card.resize(0.5);
    run(&mut card, 2.0);
    assert_eq!(card.scene().camera.aspect, 0.5);
    assert_eq!(card.scene().letter.transform.scale, Vec3::ONE);
    assert!(card.tweens().is_idle());
}

#[test]
fn resize_refits_zoomed_letter() {
    let mut card = Card::new(ASPECT, 1);
    card.activate();
    card.activate();
    run(&mut card, 2.0);
    let wide = card.scene().letter.transform.scale;

    card.resize(0.5);
    run(&mut card, 2.0);
    let scene = card.scene();
    let fit = layout::fit_letter(&scene.camera, 0.5);
    assert!(approx_vec(scene.letter.transform.scale, layout::zoomed_scale(fit)));
    // portrait viewport is width-limited, so the letter narrows
    assert!(scene.letter.transform.scale.x < wide.x);
}

#[test]
fn degenerate_aspect_is_sanitized() {
    let mut card = Card::new(0.0, 1);
    assert_eq!(card.scene().camera.aspect, 1.0);
    card.resize(f32::NAN);
    assert_eq!(card.scene().camera.aspect, 1.0);
}

#[test]
fn same_seed_gives_same_burst() {
    let mut a = Card::new(ASPECT, 99);
    let mut b = Card::new(ASPECT, 99);
    a.activate();
    b.activate();
    run(&mut a, 1.0);
    run(&mut b, 1.0);
    let pa: Vec<Vec3> = a.scene().burst.as_ref().unwrap().particles.iter().map(|p| p.position).collect();
    let pb: Vec<Vec3> = b.scene().burst.as_ref().unwrap().particles.iter().map(|p| p.position).collect();
    assert_eq!(pa, pb);
}
