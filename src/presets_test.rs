use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn catalog_sizes() {
    assert_eq!(templates().len(), 11);
    assert_eq!(layouts().len(), 5);
    assert_eq!(STICKER_PRESETS.len(), 32);
}

#[test]
fn ids_are_unique_and_resolvable() {
    for t in templates() {
        assert_eq!(template(t.id).map(|x| x.name), Some(t.name));
        assert_eq!(templates().iter().filter(|o| o.id == t.id).count(), 1);
    }
    for l in layouts() {
        assert_eq!(layout(l.id).map(|x| x.name), Some(l.name));
    }
    assert!(template("missing").is_none());
    assert!(layout("missing").is_none());
}

#[test]
fn templates_never_carry_content() {
    for t in templates() {
        assert!(t.state.text.is_none() && t.state.author.is_none() && t.state.date.is_none(), "{}", t.id);
    }
}

#[test]
fn layouts_place_all_three_elements() {
    for l in layouts() {
        assert!(l.state.text_pos.is_some() && l.state.author_pos.is_some() && l.state.date_pos.is_some());
        assert!(l.state.text_align.is_some());
        assert!(l.state.bg_color.is_none());
    }
}

#[test]
fn film_template_clears_image() {
    let film = template("film").unwrap();
    assert_eq!(film.state.bg_image, Some(None));
    assert_eq!(film.state.aspect_ratio, Some(AspectRatio::Landscape));
    assert_eq!(film.state.effect, Some(EffectKind::Grain));
}

#[test]
fn hsl_conversion() {
    assert_eq!(hsl_to_hex(0.0, 0.0, 100.0), "#ffffff");
    assert_eq!(hsl_to_hex(0.0, 0.0, 0.0), "#000000");
    assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#ff0000");
    assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00ff00");
    assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000ff");
    assert_eq!(hsl_to_hex(210.0, 0.0, 50.0), "#808080");
}

#[test]
fn random_style_shape() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let style = random_style(&mut rng);
        assert!(style.text.is_none() && style.author.is_none() && style.date.is_none());
        assert_eq!(style.bg_gradient_type, Some(GradientType::None));
        assert_eq!(style.bg_image, Some(None));
        assert_eq!(style.border_color, style.font_color);
        assert!(style.text_pos.is_some());

        let width = style.border_width.unwrap();
        assert!(width == 0.0 || (1.0..=8.0).contains(&width));
        assert!((0.0..30.0).contains(&style.border_radius.unwrap()));

        let bg = style.bg_color.unwrap();
        assert_eq!(bg.len(), 7);
        assert!(bg.starts_with('#'));
    }
}

#[test]
fn random_style_is_reproducible_with_seed() {
    let a = random_style(&mut StdRng::seed_from_u64(99));
    let b = random_style(&mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}
