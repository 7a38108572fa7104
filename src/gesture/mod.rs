//! Gesture recognition: tap, double-tap, long-press and drag.
//!
//! - [`GestureRecognizer`] - explicit state machine for one element
//! - [`GestureRouter`] - pointer capture and recognizer lifetime per element

mod config;
mod recognizer;
mod router;

pub use config::{
    ElementGestures, GestureConfig, DEFAULT_DOUBLE_TAP_WINDOW, DEFAULT_DRAG_THRESHOLD,
    DEFAULT_LONG_PRESS,
};
pub use recognizer::{GestureEvent, GestureRecognizer, Point, PointerInput, PointerKind};
pub use router::GestureRouter;
