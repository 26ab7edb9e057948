//! Shared numeric constants.

// ── Positions ───────────────────────────────────────────────────

/// Lower bound of a normalized element coordinate, in percent.
pub const POSITION_MIN: f64 = 0.0;

/// Upper bound of a normalized element coordinate, in percent.
pub const POSITION_MAX: f64 = 100.0;

// ── Appearance ranges ───────────────────────────────────────────

pub const FONT_SIZE_MIN: f64 = 12.0;
pub const FONT_SIZE_MAX: f64 = 80.0;
pub const BORDER_WIDTH_MAX: f64 = 20.0;
pub const BORDER_RADIUS_MAX: f64 = 50.0;
pub const LINE_HEIGHT_MIN: f64 = 1.0;
pub const LINE_HEIGHT_MAX: f64 = 3.0;

/// Sticker scale is kept strictly positive.
pub const STICKER_SCALE_MIN: f64 = 0.1;
pub const STICKER_SCALE_MAX: f64 = 5.0;

// ── Effects ─────────────────────────────────────────────────────

/// Particle population for rain.
pub const RAIN_PARTICLES: usize = 80;

/// Particle population for every other simulated effect.
pub const DEFAULT_PARTICLES: usize = 50;

/// One display frame at 60 Hz, in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 16;

// ── Generation ──────────────────────────────────────────────────

/// Output token cap sent to every vendor.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

// ── Export ──────────────────────────────────────────────────────

/// Device pixel ratio used when rasterizing a card for export.
pub const EXPORT_PIXEL_RATIO: f64 = 2.0;
