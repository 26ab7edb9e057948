use super::*;

fn seeded(kind: EffectKind, w: f64, h: f64, seed: u64) -> ParticleField {
    ParticleField::with_rng(kind, w, h, StdRng::seed_from_u64(seed)).unwrap()
}

fn assert_in_bounds(field: &ParticleField) {
    let (w, h) = field.size();
    for p in field.particles() {
        assert!(p.y >= -p.radius && p.y <= h, "y out of bounds: {p:?}");
        assert!(p.x >= 0.0 && p.x <= w, "x out of bounds: {p:?}");
    }
}

#[test]
fn population_per_kind() {
    assert_eq!(seeded(EffectKind::Rain, 300.0, 400.0, 1).particles().len(), 80);
    assert_eq!(seeded(EffectKind::Snow, 300.0, 400.0, 1).particles().len(), 50);
    assert_eq!(seeded(EffectKind::Sparkles, 300.0, 400.0, 1).particles().len(), 50);
}

#[test]
fn seeding_ranges() {
    let field = seeded(EffectKind::Snow, 320.0, 240.0, 7);
    for p in field.particles() {
        assert!((0.0..320.0).contains(&p.x));
        assert!((0.0..240.0).contains(&p.y));
        assert!((0.5..2.5).contains(&p.speed));
        assert!((1.0..3.0).contains(&p.radius));
        assert!((0.2..0.7).contains(&p.opacity));
        assert!((0.0..TAU).contains(&p.phase));
    }
}

#[test]
fn non_simulated_kinds_and_empty_sizes_have_no_field() {
    for kind in [EffectKind::None, EffectKind::Orbs, EffectKind::Grain] {
        assert!(ParticleField::new(kind, 300.0, 300.0).is_none(), "{kind:?}");
    }
    assert!(ParticleField::new(EffectKind::Snow, 0.0, 300.0).is_none());
    assert!(ParticleField::new(EffectKind::Snow, 300.0, -1.0).is_none());
    assert!(ParticleField::new(EffectKind::Rain, f64::NAN, 300.0).is_none());
}

#[test]
fn rain_moves_down_and_left() {
    let mut field = seeded(EffectKind::Rain, 1000.0, 10_000.0, 3);
    let before = field.particles()[0];
    field.step();
    let after = field.particles()[0];
    // A 10k-tall canvas keeps the first step clear of the wrap for this seed.
    if before.y + 4.0 * before.speed <= 10_000.0 && before.x >= 0.5 {
        assert!((after.y - (before.y + 4.0 * before.speed)).abs() < 1e-9);
        assert!((after.x - (before.x - 0.5)).abs() < 1e-9);
    }
}

#[test]
fn snow_drifts_by_sine_of_height() {
    let mut field = seeded(EffectKind::Snow, 1000.0, 10_000.0, 11);
    let before = field.particles()[0];
    field.step();
    let after = field.particles()[0];
    let y = before.y + before.speed;
    let x = before.x + (y / 50.0).sin();
    if y <= 10_000.0 && (0.0..=1000.0).contains(&x) {
        assert!((after.y - y).abs() < 1e-9);
        assert!((after.x - x).abs() < 1e-9);
    }
}

#[test]
fn sparkles_rise_slowly() {
    let mut field = seeded(EffectKind::Sparkles, 500.0, 500.0, 5);
    let before: Vec<f64> = field.particles().iter().map(|p| p.y).collect();
    field.step();
    for (b, p) in before.iter().zip(field.particles()) {
        if *b - 0.1 >= -p.radius {
            assert!((p.y - (b - 0.1)).abs() < 1e-9);
        } else {
            assert!((p.y - 500.0).abs() < 1e-9);
        }
    }
}

#[test]
fn particles_stay_in_bounds_over_many_ticks() {
    for (i, kind) in [EffectKind::Rain, EffectKind::Snow, EffectKind::Sparkles].into_iter().enumerate() {
        let mut field = seeded(kind, 120.0, 90.0, 100 + i as u64);
        for t in 0..2_000 {
            field.tick(f64::from(t) * 16.0);
            assert_in_bounds(&field);
        }
    }
}

#[test]
fn wrap_rules() {
    let mut rng = StdRng::seed_from_u64(9);
    let base = Particle { x: 10.0, y: 10.0, speed: 1.0, radius: 2.0, opacity: 0.5, phase: 0.0 };

    let mut p = Particle { y: 101.0, ..base };
    wrap(&mut p, 50.0, 100.0, &mut rng);
    assert!((p.y + 2.0).abs() < 1e-9);
    assert!((0.0..50.0).contains(&p.x));

    let mut p = Particle { x: -0.1, ..base };
    wrap(&mut p, 50.0, 100.0, &mut rng);
    assert!((p.x - 50.0).abs() < 1e-9);

    let mut p = Particle { x: 50.1, ..base };
    wrap(&mut p, 50.0, 100.0, &mut rng);
    assert!(p.x.abs() < 1e-9);

    let mut p = Particle { y: -2.5, ..base };
    wrap(&mut p, 50.0, 100.0, &mut rng);
    assert!((p.y - 100.0).abs() < 1e-9);
}

#[test]
fn frames_clear_then_one_shape_per_particle() {
    let mut field = seeded(EffectKind::Rain, 200.0, 200.0, 2);
    let frame = field.tick(16.0);
    assert_eq!(frame.commands[0], DrawCommand::Clear { width: 200.0, height: 200.0 });
    assert_eq!(frame.shape_count(), 80);
    assert!(frame.commands[1..].iter().all(|c| matches!(c, DrawCommand::Line { width, .. } if (*width - 1.0).abs() < f64::EPSILON)));
}

#[test]
fn rain_stroke_geometry() {
    let field = seeded(EffectKind::Rain, 200.0, 200.0, 4);
    let p = field.particles()[0];
    let frame = field.draw(0.0);
    let DrawCommand::Line { x1, y1, x2, y2, color, .. } = frame.commands[1] else {
        panic!("expected line");
    };
    assert_eq!((x1, y1, x2, y2), (p.x, p.y, p.x - 2.0, p.y + 15.0));
    assert_eq!(color, Rgba::new(255, 255, 255, p.opacity));
}

#[test]
fn sparkle_twinkle_and_rotation() {
    let field = seeded(EffectKind::Sparkles, 200.0, 200.0, 8);
    let p = field.particles()[0];
    let t = 1234.0;
    let frame = field.draw(t);
    let DrawCommand::Cross { angle, color, radius, .. } = frame.commands[1] else {
        panic!("expected cross");
    };
    assert!((angle - (t / 1000.0 + p.x)).abs() < 1e-9);
    assert!((radius - p.radius).abs() < 1e-9);
    assert_eq!((color.r, color.g, color.b), (255, 255, 200));
    assert!((color.a - p.opacity * (t / 500.0 + p.x + p.phase).sin().abs()).abs() < 1e-9);
    assert!(color.a <= p.opacity);
}

#[test]
fn snow_draws_white_discs() {
    let field = seeded(EffectKind::Snow, 200.0, 200.0, 6);
    let frame = field.draw(0.0);
    assert!(frame.commands[1..].iter().all(|c| matches!(c, DrawCommand::Disc { color, .. } if color.r == 255 && color.b == 255)));
}

#[derive(Default)]
struct Tally {
    clears: usize,
    lines: usize,
    discs: usize,
    crosses: usize,
}

impl Surface for Tally {
    fn clear(&mut self, _: f64, _: f64) {
        self.clears += 1;
    }
    fn line(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: Rgba) {
        self.lines += 1;
    }
    fn disc(&mut self, _: f64, _: f64, _: f64, _: Rgba) {
        self.discs += 1;
    }
    fn cross(&mut self, _: f64, _: f64, _: f64, _: f64, _: Rgba) {
        self.crosses += 1;
    }
}

#[test]
fn replay_dispatches_in_order() {
    let mut tally = Tally::default();
    seeded(EffectKind::Sparkles, 100.0, 100.0, 1).draw(0.0).replay(&mut tally);
    assert_eq!((tally.clears, tally.lines, tally.discs, tally.crosses), (1, 0, 0, 50));
}

#[test]
fn overlay_styles() {
    assert_eq!(EffectKind::None.overlay_style(), OverlayStyle::Hidden);
    assert_eq!(EffectKind::Rain.overlay_style(), OverlayStyle::Canvas);
    assert_eq!(EffectKind::Grain.overlay_style(), OverlayStyle::Grain { opacity: 0.5 });
    let OverlayStyle::Orbs(orbs) = EffectKind::Orbs.overlay_style() else {
        panic!("orbs");
    };
    assert_eq!(orbs.len(), 3);
    assert!(orbs.iter().all(|o| o.animation_delay_ms < ORB_ANIMATION_MS));
}

#[test]
fn kind_parses_and_serializes_lowercase() {
    for kind in EffectKind::ALL {
        let wire = serde_json::to_string(&kind).unwrap();
        let name = wire.trim_matches('"');
        assert_eq!(name.parse::<EffectKind>().unwrap(), kind);
    }
    assert!("fireworks".parse::<EffectKind>().is_err());
}

#[test]
fn rgba_css() {
    assert_eq!(Rgba::new(255, 255, 200, 0.5).css(), "rgba(255, 255, 200, 0.5)");
}
