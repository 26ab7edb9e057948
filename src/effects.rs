//! Overlay effects: kinds, particle simulation, and draw commands.
//!
//! DESIGN
//! ======
//! Snow, rain and sparkles are simulated here as a small particle field that
//! is advanced once per frame and redrawn from scratch (one `Clear` followed
//! by one shape per particle). Orbs and grain are static layers the view
//! layer animates with CSS; they only expose an [`OverlayStyle`].
//!
//! A field is tied to the canvas size it was seeded for. When the effect or
//! the size changes the field is thrown away and a new one seeded, which
//! keeps the distribution uniform without rescaling live particles.
//!
//! Drawing is expressed as [`DrawCommand`] values so the simulation stays
//! platform-free; hosts replay a [`Frame`] onto their own [`Surface`].

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PARTICLES, RAIN_PARTICLES};

// =============================================================================
// EFFECT KIND
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    #[default]
    None,
    Snow,
    Rain,
    Sparkles,
    Orbs,
    Grain,
}

impl EffectKind {
    pub const ALL: [Self; 6] = [Self::None, Self::Snow, Self::Rain, Self::Sparkles, Self::Orbs, Self::Grain];

    /// Whether this kind runs a per-frame particle simulation.
    #[must_use]
    pub fn is_simulated(self) -> bool {
        matches!(self, Self::Snow | Self::Rain | Self::Sparkles)
    }

    /// Particle population seeded for this kind. Zero for non-simulated kinds.
    #[must_use]
    pub fn particle_count(self) -> usize {
        match self {
            Self::Rain => RAIN_PARTICLES,
            Self::Snow | Self::Sparkles => DEFAULT_PARTICLES,
            Self::None | Self::Orbs | Self::Grain => 0,
        }
    }

    /// How the view layer should present this effect.
    #[must_use]
    pub fn overlay_style(self) -> OverlayStyle {
        match self {
            Self::None => OverlayStyle::Hidden,
            Self::Snow | Self::Rain | Self::Sparkles => OverlayStyle::Canvas,
            Self::Orbs => OverlayStyle::Orbs(&ORBS),
            Self::Grain => OverlayStyle::Grain { opacity: 0.5 },
        }
    }
}

impl std::str::FromStr for EffectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "snow" => Ok(Self::Snow),
            "rain" => Ok(Self::Rain),
            "sparkles" => Ok(Self::Sparkles),
            "orbs" => Ok(Self::Orbs),
            "grain" => Ok(Self::Grain),
            other => Err(format!("unknown effect '{other}'")),
        }
    }
}

// =============================================================================
// CSS-DRIVEN LAYERS
// =============================================================================

/// Presentation of an effect layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// No overlay.
    Hidden,
    /// A canvas fed by the particle simulation.
    Canvas,
    /// Blurred, blended color blobs drifting on a CSS animation.
    Orbs(&'static [Orb]),
    /// Film-grain noise layer blended over the card.
    Grain { opacity: f64 },
}

/// One blob of the orbs effect. Offsets are percent of the card box and may
/// be negative (the blob bleeds off the edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    pub color: &'static str,
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_pct: f64,
    pub opacity: f64,
    pub animation_delay_ms: u32,
}

/// Period of the orb drift animation.
pub const ORB_ANIMATION_MS: u32 = 7000;

static ORBS: [Orb; 3] = [
    Orb { color: "#c084fc", left_pct: -20.0, top_pct: -20.0, size_pct: 70.0, opacity: 0.7, animation_delay_ms: 0 },
    Orb { color: "#facc15", left_pct: 50.0, top_pct: -20.0, size_pct: 70.0, opacity: 0.7, animation_delay_ms: 2000 },
    Orb { color: "#f472b6", left_pct: 20.0, top_pct: 50.0, size_pct: 70.0, opacity: 0.7, animation_delay_ms: 4000 },
];

// =============================================================================
// DRAW COMMANDS
// =============================================================================

/// An RGB color with alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form.
    #[must_use]
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One drawing operation in canvas pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole overlay.
    Clear { width: f64, height: f64 },
    /// A straight stroke.
    Line { x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgba },
    /// A filled circle.
    Disc { x: f64, y: f64, radius: f64, color: Rgba },
    /// A filled plus shape centered on `(x, y)`, rotated by `angle` radians.
    ///
    /// Two bars in the rotated frame: `(-r, -r/4, 2r, r/2)` and
    /// `(-r/4, -r, r/2, 2r)` as `(x, y, w, h)`.
    Cross { x: f64, y: f64, radius: f64, angle: f64, color: Rgba },
}

/// Everything drawn for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Milliseconds since the simulation started.
    pub elapsed_ms: f64,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Replay this frame onto a host surface, in order.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::Clear { width, height } => surface.clear(width, height),
                DrawCommand::Line { x1, y1, x2, y2, width, color } => surface.line(x1, y1, x2, y2, width, color),
                DrawCommand::Disc { x, y, radius, color } => surface.disc(x, y, radius, color),
                DrawCommand::Cross { x, y, radius, angle, color } => surface.cross(x, y, radius, angle, color),
            }
        }
    }

    /// Number of shapes drawn (everything except `Clear`).
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Clear { .. }))
            .count()
    }
}

/// A 2D drawing target a host implements over its canvas API.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgba);
    fn disc(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
    fn cross(&mut self, x: f64, y: f64, radius: f64, angle: f64, color: Rgba);
}

// =============================================================================
// PARTICLES
// =============================================================================

/// Simulation state for one particle, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Base fall speed in pixels per tick.
    pub speed: f64,
    pub radius: f64,
    /// Base opacity in `[0.2, 0.7)`.
    pub opacity: f64,
    /// Per-particle offset into the twinkle cycle, in radians.
    pub phase: f64,
}

/// A seeded particle population for one `(kind, width, height)`.
pub struct ParticleField {
    kind: EffectKind,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    /// Seed a field from OS entropy. `None` when the kind is not simulated or
    /// either dimension is not a positive finite number.
    #[must_use]
    pub fn new(kind: EffectKind, width: f64, height: f64) -> Option<Self> {
        Self::with_rng(kind, width, height, StdRng::from_os_rng())
    }

    /// Seed a field from a caller-provided generator.
    #[must_use]
    pub fn with_rng(kind: EffectKind, width: f64, height: f64, mut rng: StdRng) -> Option<Self> {
        if !kind.is_simulated() || !is_positive(width) || !is_positive(height) {
            return None;
        }
        let particles = (0..kind.particle_count())
            .map(|_| Particle {
                x: rng.random_range(0.0..width),
                y: rng.random_range(0.0..height),
                speed: rng.random_range(0.5..2.5),
                radius: rng.random_range(1.0..3.0),
                opacity: rng.random_range(0.2..0.7),
                phase: rng.random_range(0.0..TAU),
            })
            .collect();
        Some(Self { kind, width, height, particles, rng })
    }

    #[must_use]
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance one tick and draw the result.
    pub fn tick(&mut self, elapsed_ms: f64) -> Frame {
        self.step();
        self.draw(elapsed_ms)
    }

    /// Move every particle by its kind's rule, then wrap it back into view.
    ///
    /// After this returns, `-radius <= y <= height` and `0 <= x <= width`
    /// hold for every particle.
    pub fn step(&mut self) {
        let kind = self.kind;
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            match kind {
                EffectKind::Rain => {
                    p.y += p.speed * 4.0;
                    p.x -= 0.5;
                }
                EffectKind::Snow => {
                    p.y += p.speed;
                    p.x += (p.y / 50.0).sin();
                }
                EffectKind::Sparkles => {
                    p.y -= 0.1;
                }
                EffectKind::None | EffectKind::Orbs | EffectKind::Grain => {}
            }
            wrap(p, width, height, &mut self.rng);
        }
    }

    /// Draw the current state from scratch.
    #[must_use]
    pub fn draw(&self, elapsed_ms: f64) -> Frame {
        let mut commands = Vec::with_capacity(self.particles.len() + 1);
        commands.push(DrawCommand::Clear { width: self.width, height: self.height });
        for p in &self.particles {
            commands.push(match self.kind {
                EffectKind::Rain => DrawCommand::Line {
                    x1: p.x,
                    y1: p.y,
                    x2: p.x - 2.0,
                    y2: p.y + 15.0,
                    width: 1.0,
                    color: Rgba::new(255, 255, 255, p.opacity),
                },
                EffectKind::Sparkles => DrawCommand::Cross {
                    x: p.x,
                    y: p.y,
                    radius: p.radius,
                    angle: elapsed_ms / 1000.0 + p.x,
                    color: Rgba::new(255, 255, 200, sparkle_alpha(p, elapsed_ms)),
                },
                _ => DrawCommand::Disc { x: p.x, y: p.y, radius: p.radius, color: Rgba::new(255, 255, 255, p.opacity) },
            });
        }
        Frame { elapsed_ms, commands }
    }
}

/// Twinkle: base opacity modulated by time and horizontal position.
fn sparkle_alpha(p: &Particle, elapsed_ms: f64) -> f64 {
    p.opacity * (elapsed_ms / 500.0 + p.x + p.phase).sin().abs()
}

fn wrap(p: &mut Particle, width: f64, height: f64, rng: &mut StdRng) {
    if p.y > height {
        p.y = -p.radius;
        p.x = rng.random_range(0.0..width);
    }
    if p.x < 0.0 {
        p.x = width;
    } else if p.x > width {
        p.x = 0.0;
    }
    if p.y < -p.radius {
        p.y = height;
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
