//! Input model: drag targets, pointer points, and the drag gesture state machine.
//!
//! `DragTarget` names which card element a gesture grabbed. `InputState` is
//! the gesture being tracked between pointer-down and pointer-up, carrying the
//! anchor needed to turn later pointer positions into element positions.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::card::{Position, StickerId};

/// A point in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A draggable element of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The main body text.
    Text,
    /// The attribution line.
    Author,
    /// The date line.
    Date,
    /// A sticker, by id.
    Sticker(StickerId),
}

impl DragTarget {
    /// Resolve a host element id: `"text"`, `"author"`, `"date"`, or a sticker UUID.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        match id {
            "text" => Some(Self::Text),
            "author" => Some(Self::Author),
            "date" => Some(Self::Date),
            other => other.parse::<StickerId>().ok().map(Self::Sticker),
        }
    }
}

/// State of the drag gesture machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// Nothing grabbed; pointer moves are ignored.
    #[default]
    Idle,
    /// An element is grabbed.
    Dragging {
        /// The grabbed element.
        target: DragTarget,
        /// Screen-space pointer position at pointer-down.
        start: Point,
        /// Element position at pointer-down; every move is computed from here,
        /// never from the previous move.
        anchor: Position,
    },
}

impl InputState {
    /// The grabbed element, if a drag is active.
    #[must_use]
    pub fn target(&self) -> Option<DragTarget> {
        match self {
            Self::Idle => None,
            Self::Dragging { target, .. } => Some(*target),
        }
    }
}
