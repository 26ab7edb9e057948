//! Card model: the content, appearance and decorations of one card.
//!
//! `CardState` is what the view layer renders from and what every editing
//! path mutates. Positions are percentages of the card's bounding box so the
//! same state renders identically at preview and export sizes.
//! `PartialCardState` is the sparse form used by templates, layout presets,
//! random styling and host form edits; only present fields are applied, and
//! numeric fields are clamped to their editable ranges on the way in.
//!
//! Wire names are camelCase (`textPos`, `bgGradientType`, ...) so a card
//! serialized by a browser host round-trips unchanged.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    BORDER_RADIUS_MAX, BORDER_WIDTH_MAX, FONT_SIZE_MAX, FONT_SIZE_MIN, LINE_HEIGHT_MAX, LINE_HEIGHT_MIN, POSITION_MAX,
    POSITION_MIN, STICKER_SCALE_MAX, STICKER_SCALE_MIN,
};
use crate::effects::EffectKind;
use crate::input::DragTarget;

/// Unique identifier for a sticker, stable for the session.
pub type StickerId = Uuid;

// =============================================================================
// POSITION
// =============================================================================

/// A point inside the card, in percent of its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    /// Build a position with both axes clamped to `[0, 100]`.
    ///
    /// Every mutation path goes through here; NaN collapses to the lower bound.
    #[must_use]
    pub fn clamped(x: f64, y: f64) -> Self {
        Self { x: clamp_percent(x), y: clamp_percent(y) }
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() { POSITION_MIN } else { v.clamp(POSITION_MIN, POSITION_MAX) }
}

// =============================================================================
// ENUMS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Wenkai,
    Noto,
    Mashan,
    Zcool,
    Playfair,
    Sans,
    Huangyou,
    Longcang,
    Zhimang,
}

impl FontFamily {
    pub const ALL: [Self; 9] = [
        Self::Wenkai,
        Self::Huangyou,
        Self::Longcang,
        Self::Zhimang,
        Self::Noto,
        Self::Mashan,
        Self::Zcool,
        Self::Playfair,
        Self::Sans,
    ];

    /// Human-readable label shown in font pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Wenkai => "霞鹜文楷",
            Self::Huangyou => "庆科黄油",
            Self::Longcang => "龙苍草书",
            Self::Zhimang => "志莽行书",
            Self::Noto => "思源宋体",
            Self::Mashan => "马善政毛笔",
            Self::Zcool => "站酷快乐",
            Self::Playfair => "Playfair (En)",
            Self::Sans => "系统黑体",
        }
    }

    /// Style class the view layer attaches to text using this font.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Wenkai => "font-wenkai",
            Self::Noto => "font-noto",
            Self::Mashan => "font-mashan",
            Self::Zcool => "font-zcool",
            Self::Playfair => "font-playfair",
            Self::Sans => "font-sans",
            Self::Huangyou => "font-huangyou",
            Self::Longcang => "font-longcang",
            Self::Zhimang => "font-zhimang",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientType {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "linear-to-b")]
    LinearToBottom,
    #[serde(rename = "linear-to-r")]
    LinearToRight,
    #[serde(rename = "linear-to-br")]
    LinearToBottomRight,
    #[serde(rename = "radial")]
    Radial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    Portrait,
    Square,
    Landscape,
}

impl AspectRatio {
    /// Width-to-height ratio as `(w, h)`.
    #[must_use]
    pub fn ratio(self) -> (f64, f64) {
        match self {
            Self::Portrait => (3.0, 4.0),
            Self::Square => (1.0, 1.0),
            Self::Landscape => (16.0, 9.0),
        }
    }

    /// Maximum preview width in CSS pixels.
    #[must_use]
    pub fn max_width(self) -> f64 {
        match self {
            Self::Portrait => 380.0,
            Self::Square => 400.0,
            Self::Landscape => 500.0,
        }
    }

    /// Card size in CSS pixels when laid out in `available_width`.
    #[must_use]
    pub fn frame_size(self, available_width: f64) -> (f64, f64) {
        let (rw, rh) = self.ratio();
        let width = available_width.clamp(0.0, self.max_width());
        (width, width * rh / rw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "center")]
    Center,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "vertical-rl")]
    VerticalRl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
}

// =============================================================================
// STICKER
// =============================================================================

/// A decorative glyph or image placed on the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: StickerId,
    /// Emoji / glyph, or an image URL.
    pub content: String,
    #[serde(flatten)]
    pub position: Position,
    /// Always > 0.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
}

impl Sticker {
    /// A fresh sticker at the card center with identity transform.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), content: content.into(), position: Position::CENTER, scale: 1.0, rotation: 0.0 }
    }

    /// Copy with position clamped to the card, scale in range and rotation
    /// in `[0, 360)`. Non-finite scale or rotation reset to identity.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let scale = if self.scale.is_finite() { self.scale.clamp(STICKER_SCALE_MIN, STICKER_SCALE_MAX) } else { 1.0 };
        let rotation = if self.rotation.is_finite() { self.rotation.rem_euclid(360.0) } else { 0.0 };
        Self {
            id: self.id,
            content: self.content.clone(),
            position: Position::clamped(self.position.x, self.position.y),
            scale,
            rotation,
        }
    }
}

// =============================================================================
// CARD STATE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    // Content
    pub text: String,
    pub author: String,
    pub date: String,

    pub text_pos: Position,
    pub author_pos: Position,
    pub date_pos: Position,

    // Appearance
    pub font_family: FontFamily,
    pub font_size: f64,
    pub font_color: String,
    pub text_align: TextAlign,
    pub font_weight: FontWeight,
    pub line_height: f64,

    // Background
    pub bg_color: String,
    pub bg_gradient_start: String,
    pub bg_gradient_end: String,
    pub bg_gradient_type: GradientType,
    /// Data URL or remote URL; when present it overrides gradient and color.
    pub bg_image: Option<String>,
    pub bg_blur: f64,
    pub bg_overlay_opacity: f64,
    pub bg_overlay_color: String,
    pub noise: bool,
    pub effect: EffectKind,

    // Layout
    pub aspect_ratio: AspectRatio,
    /// Max-width constraint for the text block, in CSS pixels.
    pub padding: f64,

    // Border
    pub border_width: f64,
    pub border_color: String,
    pub border_radius: f64,
    pub border_style: BorderStyle,

    /// Draw order: later stickers render on top.
    pub stickers: Vec<Sticker>,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            text: "生活原本沉闷，\n但跑起来就有风。".into(),
            author: "— 佚名".into(),
            date: today_label(),
            text_pos: Position { x: 50.0, y: 45.0 },
            author_pos: Position { x: 50.0, y: 65.0 },
            date_pos: Position { x: 50.0, y: 70.0 },
            font_family: FontFamily::Wenkai,
            font_size: 24.0,
            font_color: "#333333".into(),
            text_align: TextAlign::Center,
            font_weight: FontWeight::Normal,
            line_height: 1.8,
            bg_color: "#ffffff".into(),
            bg_gradient_start: "#ffffff".into(),
            bg_gradient_end: "#f3f4f6".into(),
            bg_gradient_type: GradientType::None,
            bg_image: None,
            bg_blur: 0.0,
            bg_overlay_opacity: 0.0,
            bg_overlay_color: "#000000".into(),
            noise: true,
            effect: EffectKind::None,
            aspect_ratio: AspectRatio::Portrait,
            padding: 40.0,
            border_width: 0.0,
            border_color: "#000000".into(),
            border_radius: 0.0,
            border_style: BorderStyle::Solid,
            stickers: Vec::new(),
        }
    }
}

/// Today's date as `YYYY/M/D` in local time (UTC when the offset is unknown).
#[must_use]
pub fn today_label() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    format!("{}/{}/{}", now.year(), u8::from(now.month()), now.day())
}

impl CardState {
    // --- Positions ---

    /// Current position of a draggable element. `None` for an unknown sticker.
    #[must_use]
    pub fn position_of(&self, target: DragTarget) -> Option<Position> {
        match target {
            DragTarget::Text => Some(self.text_pos),
            DragTarget::Author => Some(self.author_pos),
            DragTarget::Date => Some(self.date_pos),
            DragTarget::Sticker(id) => self.sticker(&id).map(|s| s.position),
        }
    }

    /// Write a clamped position to a draggable element. Returns false if the
    /// target no longer exists.
    pub fn set_position(&mut self, target: DragTarget, x: f64, y: f64) -> bool {
        let pos = Position::clamped(x, y);
        match target {
            DragTarget::Text => self.text_pos = pos,
            DragTarget::Author => self.author_pos = pos,
            DragTarget::Date => self.date_pos = pos,
            DragTarget::Sticker(id) => {
                let Some(sticker) = self.sticker_mut(&id) else {
                    return false;
                };
                sticker.position = pos;
            }
        }
        true
    }

    // --- Stickers ---

    #[must_use]
    pub fn sticker(&self, id: &StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == *id)
    }

    pub fn sticker_mut(&mut self, id: &StickerId) -> Option<&mut Sticker> {
        self.stickers.iter_mut().find(|s| s.id == *id)
    }

    /// Append a sticker on top of the stack and return its id.
    pub fn add_sticker(&mut self, content: impl Into<String>) -> StickerId {
        let sticker = Sticker::new(content);
        let id = sticker.id;
        self.stickers.push(sticker);
        id
    }

    /// Remove a sticker, preserving the order of the rest.
    pub fn remove_sticker(&mut self, id: &StickerId) -> Option<Sticker> {
        let idx = self.stickers.iter().position(|s| s.id == *id)?;
        Some(self.stickers.remove(idx))
    }

    /// Set scale (clamped to a positive range) and rotation of a sticker.
    pub fn set_sticker_transform(&mut self, id: &StickerId, scale: f64, rotation: f64) -> bool {
        let Some(sticker) = self.sticker_mut(id) else {
            return false;
        };
        if scale.is_finite() {
            sticker.scale = scale.clamp(STICKER_SCALE_MIN, STICKER_SCALE_MAX);
        }
        if rotation.is_finite() {
            sticker.rotation = rotation.rem_euclid(360.0);
        }
        true
    }

    // --- Derived appearance ---

    /// Attribution line font size in CSS pixels.
    #[must_use]
    pub fn author_font_size(&self) -> f64 {
        (self.font_size * 0.6).max(12.0)
    }

    /// Date line font size in CSS pixels.
    #[must_use]
    pub fn date_font_size(&self) -> f64 {
        (self.font_size * 0.5).max(10.0)
    }

    /// The one background mode in effect: image, then gradient, then color.
    #[must_use]
    pub fn active_background(&self) -> ActiveBackground<'_> {
        if let Some(url) = self.bg_image.as_deref() {
            return ActiveBackground::Image {
                url,
                fallback_color: &self.bg_color,
                overlay_color: &self.bg_overlay_color,
                overlay_opacity: self.bg_overlay_opacity,
                blur: self.bg_blur,
            };
        }
        if self.bg_gradient_type == GradientType::None {
            return ActiveBackground::Solid { color: &self.bg_color };
        }
        ActiveBackground::Gradient {
            kind: self.bg_gradient_type,
            start: &self.bg_gradient_start,
            end: &self.bg_gradient_end,
        }
    }

    /// Pull every range-checked field of a card from an untrusted source
    /// (a file, a host message) back into range.
    pub fn sanitize(&mut self) {
        for pos in [&mut self.text_pos, &mut self.author_pos, &mut self.date_pos] {
            *pos = Position::clamped(pos.x, pos.y);
        }
        self.font_size = clamp_or(self.font_size, FONT_SIZE_MIN, FONT_SIZE_MAX, 24.0);
        self.line_height = clamp_or(self.line_height, LINE_HEIGHT_MIN, LINE_HEIGHT_MAX, 1.8);
        self.border_width = clamp_or(self.border_width, 0.0, BORDER_WIDTH_MAX, 0.0);
        self.border_radius = clamp_or(self.border_radius, 0.0, BORDER_RADIUS_MAX, 0.0);
        self.bg_overlay_opacity = clamp_or(self.bg_overlay_opacity, 0.0, 1.0, 0.0);
        self.bg_blur = clamp_or(self.bg_blur, 0.0, f64::MAX, 0.0);
        self.padding = clamp_or(self.padding, 0.0, f64::MAX, 40.0);
        for sticker in &mut self.stickers {
            *sticker = sticker.normalized();
        }
    }

    // --- Partial updates ---

    /// Merge a sparse update. Numeric fields are clamped to their editable
    /// ranges; positions are clamped to `[0, 100]`.
    pub fn apply_partial(&mut self, partial: &PartialCardState) {
        if let Some(ref v) = partial.text {
            self.text.clone_from(v);
        }
        if let Some(ref v) = partial.author {
            self.author.clone_from(v);
        }
        if let Some(ref v) = partial.date {
            self.date.clone_from(v);
        }
        if let Some(p) = partial.text_pos {
            self.text_pos = Position::clamped(p.x, p.y);
        }
        if let Some(p) = partial.author_pos {
            self.author_pos = Position::clamped(p.x, p.y);
        }
        if let Some(p) = partial.date_pos {
            self.date_pos = Position::clamped(p.x, p.y);
        }
        if let Some(v) = partial.font_family {
            self.font_family = v;
        }
        if let Some(v) = partial.font_size {
            self.font_size = clamp_or(v, FONT_SIZE_MIN, FONT_SIZE_MAX, self.font_size);
        }
        if let Some(ref v) = partial.font_color {
            self.font_color.clone_from(v);
        }
        if let Some(v) = partial.text_align {
            self.text_align = v;
        }
        if let Some(v) = partial.font_weight {
            self.font_weight = v;
        }
        if let Some(v) = partial.line_height {
            self.line_height = clamp_or(v, LINE_HEIGHT_MIN, LINE_HEIGHT_MAX, self.line_height);
        }
        if let Some(ref v) = partial.bg_color {
            self.bg_color.clone_from(v);
        }
        if let Some(ref v) = partial.bg_gradient_start {
            self.bg_gradient_start.clone_from(v);
        }
        if let Some(ref v) = partial.bg_gradient_end {
            self.bg_gradient_end.clone_from(v);
        }
        if let Some(v) = partial.bg_gradient_type {
            self.bg_gradient_type = v;
        }
        if let Some(ref v) = partial.bg_image {
            self.bg_image.clone_from(v);
        }
        if let Some(v) = partial.bg_blur {
            self.bg_blur = v.max(0.0);
        }
        if let Some(v) = partial.bg_overlay_opacity {
            self.bg_overlay_opacity = clamp_or(v, 0.0, 1.0, self.bg_overlay_opacity);
        }
        if let Some(ref v) = partial.bg_overlay_color {
            self.bg_overlay_color.clone_from(v);
        }
        if let Some(v) = partial.noise {
            self.noise = v;
        }
        if let Some(v) = partial.effect {
            self.effect = v;
        }
        if let Some(v) = partial.aspect_ratio {
            self.aspect_ratio = v;
        }
        if let Some(v) = partial.padding {
            self.padding = v.max(0.0);
        }
        if let Some(v) = partial.border_width {
            self.border_width = clamp_or(v, 0.0, BORDER_WIDTH_MAX, self.border_width);
        }
        if let Some(ref v) = partial.border_color {
            self.border_color.clone_from(v);
        }
        if let Some(v) = partial.border_radius {
            self.border_radius = clamp_or(v, 0.0, BORDER_RADIUS_MAX, self.border_radius);
        }
        if let Some(v) = partial.border_style {
            self.border_style = v;
        }
        if let Some(ref v) = partial.stickers {
            self.stickers = v.iter().map(Sticker::normalized).collect();
        }
    }
}

fn clamp_or(v: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if v.is_nan() { fallback } else { v.clamp(min, max) }
}

// =============================================================================
// BACKGROUND
// =============================================================================

/// The background mode the view layer should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveBackground<'a> {
    Image {
        url: &'a str,
        /// Shown while the image loads or if it fails.
        fallback_color: &'a str,
        overlay_color: &'a str,
        overlay_opacity: f64,
        blur: f64,
    },
    Gradient {
        kind: GradientType,
        start: &'a str,
        end: &'a str,
    },
    Solid {
        color: &'a str,
    },
}

impl ActiveBackground<'_> {
    /// Inline CSS declarations for the card's background layer.
    #[must_use]
    pub fn css(&self) -> String {
        match *self {
            Self::Image { url, fallback_color, .. } => format!(
                "background-color: {fallback_color}; background-image: url({url}); \
                 background-size: cover; background-position: center"
            ),
            Self::Gradient { kind, start, end } => {
                let gradient = match kind {
                    GradientType::LinearToBottom => format!("linear-gradient(to bottom, {start}, {end})"),
                    GradientType::LinearToRight => format!("linear-gradient(to right, {start}, {end})"),
                    GradientType::LinearToBottomRight => {
                        format!("linear-gradient(to bottom right, {start}, {end})")
                    }
                    GradientType::Radial => format!("radial-gradient(circle, {start}, {end})"),
                    GradientType::None => return format!("background-color: {start}"),
                };
                format!("background: {gradient}")
            }
            Self::Solid { color } => format!("background-color: {color}"),
        }
    }
}

// =============================================================================
// PARTIAL UPDATE
// =============================================================================

/// Sparse update for a card. Only present fields are applied.
///
/// `bg_image` is doubly optional: `Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCardState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_pos: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_pos: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_pos: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_gradient_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_gradient_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_gradient_type: Option<GradientType>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub bg_image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_overlay_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_overlay_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<EffectKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stickers: Option<Vec<Sticker>>,
}

impl PartialCardState {
    /// The same update without the content fields (text, author, date).
    #[must_use]
    pub fn without_content(&self) -> Self {
        Self { text: None, author: None, date: None, ..self.clone() }
    }
}

/// Distinguishes an absent `bgImage` key from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option, clippy::option_option)]
    pub fn serialize<S: Serializer>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    #[allow(clippy::option_option)]
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<String>>, D::Error> {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}
