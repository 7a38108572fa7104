use std::time::Duration;

/// Movement (in pointer units) beyond which a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 10.0;

/// Hold time before a press becomes a long-press.
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(500);

/// Maximum gap between two releases for them to count as a double-tap.
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Timing and distance thresholds shared by every recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub drag_threshold: f32,
    pub long_press: Duration,
    pub double_tap_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            long_press: DEFAULT_LONG_PRESS,
            double_tap_window: DEFAULT_DOUBLE_TAP_WINDOW,
        }
    }
}

impl GestureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_long_press(mut self, duration: Duration) -> Self {
        self.long_press = duration;
        self
    }

    pub fn with_double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap_window = window;
        self
    }
}

/// Which gestures an element participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementGestures {
    /// Movement past the threshold starts a drag.
    pub draggable: bool,
    /// Single clicks are deferred by the double-tap window.
    pub double_tap: bool,
}

impl ElementGestures {
    pub const CLICK_ONLY: ElementGestures = ElementGestures {
        draggable: false,
        double_tap: false,
    };

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn double_tap(mut self, double_tap: bool) -> Self {
        self.double_tap = double_tap;
        self
    }
}
