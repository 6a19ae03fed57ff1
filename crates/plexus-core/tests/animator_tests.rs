use plexus_core::{Animator, DrawCommand, FieldConfig, RecordingSurface, Rgb};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn animator(width: f32, height: f32) -> Animator<StdRng> {
    Animator::new(width, height, FieldConfig::default(), StdRng::seed_from_u64(9))
}

#[test]
fn test_frame_clears_then_draws_particles_then_links() {
    let mut a = animator(700.0, 700.0);
    let mut surface = RecordingSurface::new();

    let stats = a.frame(&mut surface);

    assert_eq!(stats.particles, 32);
    assert_eq!(stats.links, surface.lines().count());
    assert!(!stats.reinitialized);
    assert_eq!(
        surface.commands[0],
        DrawCommand::Clear {
            width: 700.0,
            height: 700.0
        }
    );

    let last_circle = surface
        .commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Circle { .. }))
        .unwrap();
    let first_line = surface
        .commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Line { .. }));
    if let Some(first_line) = first_line {
        assert!(first_line > last_circle, "links are drawn after every particle");
    }
    assert_eq!(a.frames(), 1);
}

#[test]
fn test_pointer_updates_are_last_write_wins() {
    let mut a = animator(700.0, 700.0);
    assert!(!a.pointer().is_present());

    a.set_pointer(10.0, 10.0);
    a.set_pointer(20.0, 30.0);
    assert_eq!(a.pointer().position, Some(glam::Vec2::new(20.0, 30.0)));
    assert_eq!(a.pointer().radius, 150.0);

    a.clear_pointer();
    assert!(!a.pointer().is_present());
}

#[test]
fn test_pointer_radius_comes_from_config() {
    let config = FieldConfig {
        pointer_radius: 80.0,
        ..FieldConfig::default()
    };
    let a = Animator::new(700.0, 700.0, config, StdRng::seed_from_u64(1));
    assert_eq!(a.pointer().radius, 80.0);
}

#[test]
fn test_resize_is_deferred_to_next_frame() {
    let mut a = animator(700.0, 700.0);
    let before: Vec<_> = a.field().particles().to_vec();

    a.resize(1400.0, 700.0);

    assert!(a.has_pending_resize());
    assert_eq!(a.field().width(), 700.0, "no reinitialization outside a frame");
    assert_eq!(a.field().particles(), &before[..]);

    let mut surface = RecordingSurface::new();
    let stats = a.frame(&mut surface);

    assert!(stats.reinitialized);
    assert!(!a.has_pending_resize());
    assert_eq!(stats.particles, 65);
    assert_eq!(
        surface.commands[0],
        DrawCommand::Clear {
            width: 1400.0,
            height: 700.0
        }
    );
    for old in &before {
        assert!(
            !a.field().particles().iter().any(|p| p.position == old.position || p.base == old.base),
            "a particle survived the resize"
        );
    }
}

#[test]
fn test_multiple_resizes_collapse_to_last() {
    let mut a = animator(700.0, 700.0);
    a.resize(300.0, 300.0);
    a.resize(900.0, 500.0);

    let mut surface = RecordingSurface::new();
    a.frame(&mut surface);

    assert_eq!(a.field().width(), 900.0);
    assert_eq!(a.field().height(), 500.0);
    assert_eq!(a.field().len(), 30);

    surface.reset();
    let stats = a.frame(&mut surface);
    assert!(!stats.reinitialized, "resize applied only once");
}

#[test]
fn test_resize_to_same_size_still_replaces_particles() {
    let mut a = animator(700.0, 700.0);
    let before: Vec<_> = a.field().particles().to_vec();

    a.resize(700.0, 700.0);
    a.frame(&mut RecordingSurface::new());

    assert_eq!(a.field().len(), before.len());
    assert_ne!(a.field().particles(), &before[..]);
}

#[test]
fn test_pointer_leave_lets_particles_return() {
    let config = FieldConfig {
        drift_amplitude: 0.0,
        ..FieldConfig::default()
    };
    let mut a = Animator::new(700.0, 700.0, config, StdRng::seed_from_u64(3));
    let mut surface = RecordingSurface::new();
    let target = a.field().particles()[0].position;

    a.set_pointer(target.x + 5.0, target.y + 5.0);
    for _ in 0..10 {
        surface.reset();
        a.frame(&mut surface);
    }
    let pushed = a.field().particles()[0].offset().length();
    assert!(pushed > 1.0, "pointer should displace the particle, offset {pushed}");

    a.clear_pointer();
    for _ in 0..100 {
        surface.reset();
        a.frame(&mut surface);
    }
    let settled = a.field().particles()[0].offset().length();
    assert!(settled < pushed * 0.01, "particle should settle: {pushed} -> {settled}");
}

#[test]
fn test_frames_counter() {
    let mut a = animator(400.0, 400.0);
    let mut surface = RecordingSurface::new();
    for _ in 0..5 {
        a.frame(&mut surface);
    }
    assert_eq!(a.frames(), 5);
    assert_eq!(surface.clear_count(), 5);
}

#[test]
fn test_step_applies_resize_without_drawing() {
    let mut a = animator(700.0, 700.0);
    a.resize(1400.0, 700.0);

    assert!(a.step());
    assert_eq!(a.field().len(), 65);
    assert!(!a.step(), "resize consumed by the first step");
    assert_eq!(a.frames(), 2);
}

#[test]
fn test_particle_color_survives_resize() {
    let mut a = animator(700.0, 700.0);
    let red = Rgb::new(255, 0, 0);

    a.field_mut().set_particle_color(red);
    assert!(a.field().particles().iter().all(|p| p.color == red));

    a.resize(800.0, 700.0);
    let mut surface = RecordingSurface::new();
    let stats = a.frame(&mut surface);

    assert!(stats.reinitialized);
    assert!(!a.field().is_empty());
    for (i, p) in a.field().particles().iter().enumerate() {
        assert_eq!(p.color, red, "particle {i} lost the new color: {}", p.color.to_hex());
    }
    assert_eq!(surface.commands[1], DrawCommand::FillColor(red.to_css()));
}

#[test]
fn test_non_finite_resize_empties_field() {
    let mut a = animator(700.0, 700.0);
    a.resize(f32::INFINITY, 700.0);

    let stats = a.frame(&mut RecordingSurface::new());

    assert!(stats.reinitialized);
    assert_eq!(stats.particles, 0);
    assert_eq!(stats.links, 0);
}
