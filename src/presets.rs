//! Built-in presets: card templates, layout presets, sticker glyphs and the
//! random style generator.
//!
//! Templates and layouts are sparse [`PartialCardState`] updates. A template
//! never carries text, author or date; applying one restyles the card
//! without touching what it says.

#[cfg(test)]
#[path = "presets_test.rs"]
mod presets_test;

use std::sync::LazyLock;

use rand::Rng;

use crate::card::{
    AspectRatio, BorderStyle, FontFamily, GradientType, PartialCardState, Position, TextAlign,
};
use crate::effects::EffectKind;

/// A named restyle of the whole card.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    /// Swatch color for template pickers.
    pub preview_color: &'static str,
    pub state: PartialCardState,
}

/// A named arrangement of the three text elements.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub state: PartialCardState,
}

/// Glyph stickers offered by the sticker picker.
pub const STICKER_PRESETS: [&str; 32] = [
    "✨", "💫", "🌟", "🌙", "☀️", "☁️", "🌸", "🌹", "🌿", "🍃", "❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "☕",
    "🍵", "📚", "🎵", "🎨", "📷", "🚲", "✈️", "❝", "❞", "『", "』", "「", "」",
];

fn pos(x: f64, y: f64) -> Option<Position> {
    Some(Position { x, y })
}

fn color(hex: &str) -> Option<String> {
    Some(hex.to_owned())
}

// =============================================================================
// LAYOUTS
// =============================================================================

static LAYOUTS: LazyLock<Vec<LayoutPreset>> = LazyLock::new(|| {
    let layout = |id, name, text: (f64, f64), author: (f64, f64), date: (f64, f64), align| LayoutPreset {
        id,
        name,
        state: PartialCardState {
            text_pos: pos(text.0, text.1),
            author_pos: pos(author.0, author.1),
            date_pos: pos(date.0, date.1),
            text_align: Some(align),
            ..PartialCardState::default()
        },
    };
    vec![
        layout("center", "居中", (50.0, 45.0), (50.0, 65.0), (50.0, 70.0), TextAlign::Center),
        layout("poster-bottom", "海报", (10.0, 80.0), (10.0, 92.0), (90.0, 92.0), TextAlign::Left),
        layout("vertical-classic", "古风", (80.0, 50.0), (20.0, 80.0), (20.0, 85.0), TextAlign::VerticalRl),
        layout("cinematic", "字幕", (50.0, 85.0), (50.0, 95.0), (50.0, 10.0), TextAlign::Center),
        layout("magazine", "杂志", (15.0, 20.0), (85.0, 85.0), (15.0, 10.0), TextAlign::Left),
    ]
});

#[must_use]
pub fn layouts() -> &'static [LayoutPreset] {
    &LAYOUTS
}

#[must_use]
pub fn layout(id: &str) -> Option<&'static LayoutPreset> {
    LAYOUTS.iter().find(|l| l.id == id)
}

// =============================================================================
// TEMPLATES
// =============================================================================

static TEMPLATES: LazyLock<Vec<Template>> = LazyLock::new(|| {
    vec![
        Template {
            id: "simple-white",
            name: "极简白",
            preview_color: "#ffffff",
            state: PartialCardState {
                bg_color: color("#ffffff"),
                font_color: color("#333333"),
                font_family: Some(FontFamily::Noto),
                text_align: Some(TextAlign::Center),
                border_width: Some(0.0),
                noise: Some(false),
                effect: Some(EffectKind::None),
                text_pos: pos(50.0, 45.0),
                author_pos: pos(50.0, 65.0),
                bg_gradient_type: Some(GradientType::None),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "dreamy-cloud",
            name: "梦幻云彩",
            preview_color: "#e0c3fc",
            state: PartialCardState {
                bg_color: color("#ffffff"),
                font_color: color("#4a044e"),
                font_family: Some(FontFamily::Huangyou),
                text_align: Some(TextAlign::Center),
                effect: Some(EffectKind::Orbs),
                bg_gradient_type: Some(GradientType::None),
                text_pos: pos(50.0, 50.0),
                author_pos: pos(50.0, 75.0),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "winter-snow",
            name: "冬日雪景",
            preview_color: "#1e293b",
            state: PartialCardState {
                bg_color: color("#0f172a"),
                bg_gradient_start: color("#0f172a"),
                bg_gradient_end: color("#334155"),
                bg_gradient_type: Some(GradientType::LinearToBottom),
                font_color: color("#f8fafc"),
                font_family: Some(FontFamily::Noto),
                text_align: Some(TextAlign::Center),
                effect: Some(EffectKind::Snow),
                text_pos: pos(50.0, 45.0),
                author_pos: pos(50.0, 65.0),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "magic-sparkle",
            name: "魔法星尘",
            preview_color: "#4c1d95",
            state: PartialCardState {
                bg_color: color("#2e1065"),
                bg_gradient_start: color("#2e1065"),
                bg_gradient_end: color("#4c1d95"),
                bg_gradient_type: Some(GradientType::Radial),
                font_color: color("#e9d5ff"),
                font_family: Some(FontFamily::Zcool),
                text_align: Some(TextAlign::Center),
                effect: Some(EffectKind::Sparkles),
                text_pos: pos(50.0, 50.0),
                stickers: Some(Vec::new()),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "dark-mood",
            name: "暗夜",
            preview_color: "#1a1a1a",
            state: PartialCardState {
                bg_color: color("#1a1a1a"),
                font_color: color("#e5e5e5"),
                font_family: Some(FontFamily::Wenkai),
                text_align: Some(TextAlign::Left),
                noise: Some(true),
                effect: Some(EffectKind::None),
                text_pos: pos(15.0, 40.0),
                author_pos: pos(15.0, 60.0),
                bg_gradient_type: Some(GradientType::None),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "peach",
            name: "蜜桃",
            preview_color: "#ffecd2",
            state: PartialCardState {
                bg_color: color("#ffecd2"),
                bg_gradient_start: color("#ffecd2"),
                bg_gradient_end: color("#fcb69f"),
                bg_gradient_type: Some(GradientType::LinearToBottomRight),
                font_color: color("#5d4037"),
                font_family: Some(FontFamily::Zcool),
                text_align: Some(TextAlign::Center),
                border_radius: Some(12.0),
                effect: Some(EffectKind::None),
                text_pos: pos(50.0, 50.0),
                author_pos: pos(50.0, 70.0),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "film",
            name: "电影感",
            preview_color: "#000000",
            state: PartialCardState {
                bg_color: color("#000000"),
                font_color: color("#ffeb3b"),
                font_family: Some(FontFamily::Noto),
                text_align: Some(TextAlign::Center),
                aspect_ratio: Some(AspectRatio::Landscape),
                bg_image: Some(None),
                bg_overlay_opacity: Some(0.3),
                bg_overlay_color: color("#000000"),
                effect: Some(EffectKind::Grain),
                text_pos: pos(50.0, 80.0),
                author_pos: pos(50.0, 92.0),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "retro-paper",
            name: "信纸",
            preview_color: "#fdfbf7",
            state: PartialCardState {
                bg_color: color("#fdfbf7"),
                font_color: color("#4a4a4a"),
                font_family: Some(FontFamily::Wenkai),
                text_align: Some(TextAlign::VerticalRl),
                border_width: Some(1.0),
                border_color: color("#d1d5db"),
                noise: Some(true),
                effect: Some(EffectKind::None),
                text_pos: pos(75.0, 50.0),
                author_pos: pos(25.0, 80.0),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "polaroid",
            name: "拍立得",
            preview_color: "#ffffff",
            state: PartialCardState {
                bg_color: color("#ffffff"),
                font_color: color("#222222"),
                font_family: Some(FontFamily::Playfair),
                text_align: Some(TextAlign::Center),
                aspect_ratio: Some(AspectRatio::Portrait),
                border_width: Some(0.0),
                bg_gradient_type: Some(GradientType::None),
                effect: Some(EffectKind::None),
                text_pos: pos(50.0, 45.0),
                stickers: Some(Vec::new()),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "stamp",
            name: "红印",
            preview_color: "#ef4444",
            state: PartialCardState {
                bg_color: color("#fff1f2"),
                font_color: color("#991b1b"),
                border_color: color("#991b1b"),
                border_width: Some(4.0),
                border_radius: Some(0.0),
                border_style: Some(BorderStyle::Double),
                font_family: Some(FontFamily::Mashan),
                text_align: Some(TextAlign::Center),
                effect: Some(EffectKind::None),
                text_pos: pos(50.0, 50.0),
                ..PartialCardState::default()
            },
        },
        Template {
            id: "nature",
            name: "森系",
            preview_color: "#dcfce7",
            state: PartialCardState {
                bg_color: color("#f0fdf4"),
                bg_gradient_start: color("#f0fdf4"),
                bg_gradient_end: color("#bbf7d0"),
                bg_gradient_type: Some(GradientType::LinearToBottom),
                font_color: color("#14532d"),
                font_family: Some(FontFamily::Wenkai),
                text_align: Some(TextAlign::Left),
                noise: Some(true),
                effect: Some(EffectKind::None),
                text_pos: pos(20.0, 30.0),
                author_pos: pos(20.0, 60.0),
                ..PartialCardState::default()
            },
        },
    ]
});

#[must_use]
pub fn templates() -> &'static [Template] {
    &TEMPLATES
}

#[must_use]
pub fn template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

// =============================================================================
// RANDOM STYLE
// =============================================================================

/// A random layout, font and dark or light palette.
///
/// Text takes the complementary hue of the background at low saturation;
/// gradient and image are cleared so the solid color shows.
pub fn random_style<R: Rng + ?Sized>(rng: &mut R) -> PartialCardState {
    let layouts = layouts();
    let layout = &layouts[rng.random_range(0..layouts.len())];
    let font = FontFamily::ALL[rng.random_range(0..FontFamily::ALL.len())];
    let dark = rng.random_bool(0.5);

    let bg_hue = rng.random_range(0..360_u16);
    let bg_sat = rng.random_range(10..50_u16);
    let bg_light = if dark { rng.random_range(5..20_u16) } else { rng.random_range(88..98_u16) };
    let bg_color = hsl_to_hex(f64::from(bg_hue), f64::from(bg_sat), f64::from(bg_light));

    let text_hue = (bg_hue + 180) % 360;
    let text_sat = rng.random_range(0..20_u16);
    let text_light = if dark { 90.0 } else { 15.0 };
    let font_color = hsl_to_hex(f64::from(text_hue), f64::from(text_sat), text_light);

    let border_width = if rng.random_bool(0.4) { f64::from(rng.random_range(1..9_u8)) } else { 0.0 };
    let border_radius = f64::from(rng.random_range(0..30_u8));
    let effect = EffectKind::ALL[rng.random_range(0..EffectKind::ALL.len())];

    PartialCardState {
        font_family: Some(font),
        bg_color: Some(bg_color),
        border_color: Some(font_color.clone()),
        font_color: Some(font_color),
        border_width: Some(border_width),
        border_radius: Some(border_radius),
        bg_gradient_type: Some(GradientType::None),
        bg_image: Some(None),
        noise: Some(rng.random_bool(0.7)),
        effect: Some(effect),
        ..layout.state.clone()
    }
}

/// HSL (degrees, percent, percent) to `#rrggbb`.
#[must_use]
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let l = l / 100.0;
    let a = s * l.min(1.0 - l) / 100.0;
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let c = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * c).round().clamp(0.0, 255.0)
    };
    // Clamped to [0, 255] above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let byte = |n: f64| channel(n) as u8;
    format!("#{:02x}{:02x}{:02x}", byte(0.0), byte(8.0), byte(4.0))
}
