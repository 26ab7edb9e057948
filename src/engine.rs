use rand::Rng;
use tracing::debug;

use crate::card::{CardState, PartialCardState, Position, Sticker, StickerId};
use crate::compose::split_generated;
use crate::effects::EffectKind;
use crate::inflight::{InFlight, InFlightSlot};
use crate::input::{DragTarget, InputState, Point};
use crate::llm::types::{GenerationError, GenerationResult};
use crate::presets;
use crate::quote::Quote;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// What changed as a result of an input event, for the host to re-render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    PositionChanged { target: DragTarget, position: Position },
}

/// Editor state for one card: the card itself, the drag gesture in progress,
/// and the generation busy flag.
///
/// Pure state with no rendering or network dependencies, so hosts and tests
/// drive it directly.
#[derive(Debug, Default)]
pub struct EditorCore {
    pub card: CardState,
    pub input: InputState,
    generation: InFlightSlot,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_card(card: CardState) -> Self {
        Self { card, ..Self::default() }
    }

    // --- Drag ---

    /// Grab `target` at screen point `pointer`. Replaces any active drag.
    /// Grabbing a sticker that is not on the card leaves the editor idle.
    pub fn begin_drag(&mut self, target: DragTarget, pointer: Point) {
        self.input = match self.card.position_of(target) {
            Some(anchor) => InputState::Dragging { target, start: pointer, anchor },
            None => InputState::Idle,
        };
    }

    /// Move the grabbed element so it follows the pointer, given the card's
    /// current on-screen size.
    ///
    /// The new position is always computed from the anchor captured at
    /// `begin_drag`, so repeating the same call is idempotent.
    pub fn update_drag(&mut self, pointer: Point, container_width: f64, container_height: f64) -> Action {
        let InputState::Dragging { target, start, anchor } = self.input else {
            return Action::None;
        };
        if !(container_width > 0.0 && container_height > 0.0) || !pointer.x.is_finite() || !pointer.y.is_finite() {
            return Action::None;
        }

        let dx = (pointer.x - start.x) / container_width * 100.0;
        let dy = (pointer.y - start.y) / container_height * 100.0;
        if !self.card.set_position(target, anchor.x + dx, anchor.y + dy) {
            return Action::None;
        }
        match self.card.position_of(target) {
            Some(position) => Action::PositionChanged { target, position },
            None => Action::None,
        }
    }

    pub fn end_drag(&mut self) {
        self.input = InputState::Idle;
    }

    /// Pointer released anywhere, including outside the card.
    pub fn on_global_pointer_release(&mut self) {
        self.end_drag();
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.input, InputState::Dragging { .. })
    }

    // --- Card edits ---

    /// Restyle with a template; text, author and date are kept.
    pub fn apply_template(&mut self, id: &str) -> bool {
        let Some(template) = presets::template(id) else {
            return false;
        };
        self.card.apply_partial(&template.state.without_content());
        true
    }

    pub fn apply_layout(&mut self, id: &str) -> bool {
        let Some(layout) = presets::layout(id) else {
            return false;
        };
        self.card.apply_partial(&layout.state.without_content());
        true
    }

    pub fn apply_partial(&mut self, partial: &PartialCardState) {
        self.card.apply_partial(partial);
    }

    pub fn randomize_style<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let style = presets::random_style(rng);
        self.card.apply_partial(&style);
    }

    pub fn set_effect(&mut self, effect: EffectKind) {
        self.card.effect = effect;
    }

    pub fn apply_quote(&mut self, quote: &Quote) {
        self.card.text.clone_from(&quote.text);
        self.card.author.clone_from(&quote.author);
    }

    // --- Stickers ---

    pub fn add_sticker(&mut self, content: impl Into<String>) -> StickerId {
        self.card.add_sticker(content)
    }

    /// Remove a sticker; a drag holding it is released.
    pub fn remove_sticker(&mut self, id: &StickerId) -> Option<Sticker> {
        if self.input.target() == Some(DragTarget::Sticker(*id)) {
            self.end_drag();
        }
        self.card.remove_sticker(id)
    }

    pub fn set_sticker_transform(&mut self, id: &StickerId, scale: f64, rotation: f64) -> bool {
        self.card.set_sticker_transform(id, scale, rotation)
    }

    // --- Generation ---

    /// Claim the generation slot before calling the gateway.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while an earlier generation is still outstanding.
    pub fn begin_generation(&self) -> Result<InFlight, GenerationError> {
        self.generation.try_acquire().ok_or(GenerationError::Busy)
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generation.is_busy()
    }

    /// Apply a finished generation and release the slot. Returns whether the
    /// card changed; blank output leaves it as is.
    ///
    /// # Errors
    ///
    /// Passes the gateway failure through; the card is untouched.
    pub fn finish_generation(&mut self, guard: InFlight, result: GenerationResult) -> Result<bool, GenerationError> {
        drop(guard);
        let generated = result?;
        let Some(partial) = split_generated(&generated.text) else {
            debug!("generation returned no usable lines");
            return Ok(false);
        };
        self.card.apply_partial(&partial);
        Ok(true)
    }
}
