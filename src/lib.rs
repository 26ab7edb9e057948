//! Composition and interaction engine for single-card "mood" images.
//!
//! A card is positioned text, decorative stickers, a background and an
//! animated overlay effect. This crate owns everything about a card that is
//! not pixels: the state the view layer renders from, the drag transform that
//! moves elements around, the particle simulation behind the overlay, and
//! the gateway that asks one of several AI vendors for copy. A host such as
//! the bundled CLI wires input events in and renders the resulting state
//! and draw commands out.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`card`] | Card data model, partial updates, active background |
//! | [`engine`] | [`engine::EditorCore`], the single source of truth for a card |
//! | [`input`] | Drag targets and the drag gesture state machine |
//! | [`effects`] | Particle simulation and draw commands for overlay effects |
//! | [`overlay`] | Cancellable per-frame tick task driving [`effects`] |
//! | [`llm`] | Provider gateway normalizing five vendor APIs |
//! | [`storage`] | Key-value persistence (file or memory) |
//! | [`presets`] | Templates, layouts, fonts, stickers, random style |
//! | [`compose`] | Generation prompt and result application |
//! | [`quote`] | Quote-of-the-day text source |
//! | [`export`] | Raster export and share collaborators |
//! | [`inflight`] | One-at-a-time guard for async actions |
//! | [`config`] | Environment-driven application config |
//! | [`error`] | Shared error-code trait |
//! | [`consts`] | Shared numeric constants |

pub mod card;
pub mod compose;
pub mod config;
pub mod consts;
pub mod effects;
pub mod engine;
pub mod error;
pub mod export;
pub mod inflight;
pub mod input;
pub mod llm;
pub mod overlay;
pub mod presets;
pub mod quote;
pub mod storage;
