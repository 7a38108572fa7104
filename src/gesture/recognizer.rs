//! Per-element gesture state machine.
//!
//! One pointer session runs `Idle -> Pressed -> {Dragging | LongPressed |
//! released} -> Idle`. A released tap may sit in a pending slot until the
//! double-tap window closes. Time is passed in explicitly, so the machine is
//! driven the same way by the event loop and by tests.
//!
//! Priority when several gestures could apply: drag, then long-press, then
//! double-tap, then single click.

use std::time::Instant;

use super::config::{ElementGestures, GestureConfig};

/// A position in pointer units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Source of a pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Hosts that resolve hover targets natively.
    Mouse,
    /// Hosts that need coordinate hit-testing (and a floating proxy).
    Touch,
}

/// Raw input for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { position: Point, kind: PointerKind },
    Move { position: Point },
    Up { position: Point },
    Cancel,
}

/// Classified intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Click,
    DoubleTap,
    LongPress { position: Point },
    DragStart {
        origin: Point,
        position: Point,
        kind: PointerKind,
    },
    DragMove { position: Point },
    DragEnd { position: Point },
    DragCancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PressState {
    Idle,
    Pressed {
        origin: Point,
        kind: PointerKind,
        long_press_at: Instant,
    },
    LongPressed,
    Dragging,
    /// Moved off a non-draggable element; the release is ignored.
    Abandoned,
}

/// Disambiguates tap, double-tap, long-press and drag for one element.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    element: ElementGestures,
    state: PressState,
    /// Release time of a tap still waiting to see whether a second one follows.
    pending_tap: Option<Instant>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig, element: ElementGestures) -> Self {
        Self {
            config,
            element,
            state: PressState::Idle,
            pending_tap: None,
        }
    }

    pub fn element(&self) -> ElementGestures {
        self.element
    }

    /// Update what the element supports. Takes effect from the next press.
    pub fn set_element(&mut self, element: ElementGestures) {
        self.element = element;
    }

    pub fn is_dragging(&self) -> bool {
        self.state == PressState::Dragging
    }

    pub fn is_idle(&self) -> bool {
        self.state == PressState::Idle && self.pending_tap.is_none()
    }

    /// While true, moves belong to this element and must not reach ancestor
    /// scroll handling.
    pub fn captures_pointer(&self) -> bool {
        self.state == PressState::Dragging
    }

    /// Earliest instant at which [`tick`](Self::tick) has something to fire.
    pub fn next_deadline(&self) -> Option<Instant> {
        let long_press = match self.state {
            PressState::Pressed { long_press_at, .. } => Some(long_press_at),
            _ => None,
        };
        let tap = self
            .pending_tap
            .map(|released| released + self.config.double_tap_window);
        match (long_press, tap) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire any timer that expired at or before `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.expire(now, &mut events);
        events
    }

    /// Feed one input observed at `now`.
    pub fn handle(&mut self, input: PointerInput, now: Instant) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.expire(now, &mut events);

        match input {
            PointerInput::Down { position, kind } => {
                if self.state == PressState::Dragging {
                    events.push(GestureEvent::DragCancel);
                }
                self.state = PressState::Pressed {
                    origin: position,
                    kind,
                    long_press_at: now + self.config.long_press,
                };
            }
            PointerInput::Move { position } => match self.state {
                PressState::Pressed { origin, kind, .. } => {
                    if origin.distance_to(position) > self.config.drag_threshold {
                        // A drag supersedes both the long-press timer and any earlier tap.
                        self.pending_tap = None;
                        if self.element.draggable {
                            self.state = PressState::Dragging;
                            tracing::debug!(kind = ?kind, "drag start");
                            events.push(GestureEvent::DragStart {
                                origin,
                                position,
                                kind,
                            });
                        } else {
                            self.state = PressState::Abandoned;
                        }
                    }
                }
                PressState::Dragging => events.push(GestureEvent::DragMove { position }),
                _ => {}
            },
            PointerInput::Up { position } => {
                let state = std::mem::replace(&mut self.state, PressState::Idle);
                match state {
                    PressState::Dragging => events.push(GestureEvent::DragEnd { position }),
                    PressState::Pressed { .. } => self.release_tap(now, &mut events),
                    // Long-press already fired; the click it would produce is suppressed.
                    PressState::LongPressed | PressState::Abandoned | PressState::Idle => {}
                }
            }
            PointerInput::Cancel => {
                if self.state == PressState::Dragging {
                    events.push(GestureEvent::DragCancel);
                }
                self.state = PressState::Idle;
                self.pending_tap = None;
            }
        }

        events
    }

    /// Drop every timer and any session in progress. Nothing fires afterwards
    /// until a new press arrives.
    pub fn teardown(&mut self) {
        self.state = PressState::Idle;
        self.pending_tap = None;
    }

    fn release_tap(&mut self, now: Instant, events: &mut Vec<GestureEvent>) {
        if !self.element.double_tap {
            events.push(GestureEvent::Click);
            return;
        }
        match self.pending_tap.take() {
            Some(previous) if now.duration_since(previous) <= self.config.double_tap_window => {
                events.push(GestureEvent::DoubleTap);
            }
            _ => self.pending_tap = Some(now),
        }
    }

    fn expire(&mut self, now: Instant, events: &mut Vec<GestureEvent>) {
        if let Some(released) = self.pending_tap {
            if now >= released + self.config.double_tap_window {
                self.pending_tap = None;
                events.push(GestureEvent::Click);
            }
        }
        if let PressState::Pressed {
            origin,
            long_press_at,
            ..
        } = self.state
        {
            if now >= long_press_at {
                self.state = PressState::LongPressed;
                self.pending_tap = None;
                events.push(GestureEvent::LongPress { position: origin });
            }
        }
    }
}
