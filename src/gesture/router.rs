//! Routes a single pointer stream to per-element recognizers.
//!
//! The element pressed on captures the pointer until release, the same way a
//! native pointer capture would. Recognizers are keyed by a stable element key
//! (card id, zone), so they survive snapshot replacement and are torn down
//! once their element is no longer rendered.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use super::config::{ElementGestures, GestureConfig};
use super::recognizer::{GestureEvent, GestureRecognizer, PointerInput};

#[derive(Debug)]
pub struct GestureRouter<K> {
    config: GestureConfig,
    recognizers: HashMap<K, GestureRecognizer>,
    captured: Option<K>,
}

impl<K: Eq + Hash + Clone> GestureRouter<K> {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            recognizers: HashMap::new(),
            captured: None,
        }
    }

    /// Element currently holding the pointer.
    pub fn captured(&self) -> Option<&K> {
        self.captured.as_ref()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Press on `key`. Captures the pointer for that element.
    ///
    /// A press that lands on no element still releases any previous capture.
    pub fn press(
        &mut self,
        key: Option<K>,
        element: ElementGestures,
        input: PointerInput,
        now: Instant,
    ) -> Vec<(K, GestureEvent)> {
        let mut out = Vec::new();
        if let Some(previous) = self.captured.take() {
            if let Some(recognizer) = self.recognizers.get_mut(&previous) {
                let events = recognizer.handle(PointerInput::Cancel, now);
                out.extend(events.into_iter().map(|e| (previous.clone(), e)));
            }
        }
        let Some(key) = key else {
            return out;
        };
        let config = self.config;
        let recognizer = self
            .recognizers
            .entry(key.clone())
            .or_insert_with(|| GestureRecognizer::new(config, element));
        recognizer.set_element(element);
        out.extend(
            recognizer
                .handle(input, now)
                .into_iter()
                .map(|e| (key.clone(), e)),
        );
        self.captured = Some(key);
        out
    }

    /// Move, release or cancel for the captured element.
    pub fn route(&mut self, input: PointerInput, now: Instant) -> Vec<(K, GestureEvent)> {
        let Some(key) = self.captured.clone() else {
            return Vec::new();
        };
        if matches!(input, PointerInput::Up { .. } | PointerInput::Cancel) {
            self.captured = None;
        }
        match self.recognizers.get_mut(&key) {
            Some(recognizer) => recognizer
                .handle(input, now)
                .into_iter()
                .map(|e| (key.clone(), e))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Fire expired timers across every element.
    pub fn tick(&mut self, now: Instant) -> Vec<(K, GestureEvent)> {
        let mut out = Vec::new();
        for (key, recognizer) in self.recognizers.iter_mut() {
            out.extend(recognizer.tick(now).into_iter().map(|e| (key.clone(), e)));
        }
        out
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.recognizers
            .values()
            .filter_map(GestureRecognizer::next_deadline)
            .min()
    }

    pub fn captures_pointer(&self) -> bool {
        self.captured
            .as_ref()
            .and_then(|k| self.recognizers.get(k))
            .is_some_and(GestureRecognizer::captures_pointer)
    }

    /// Tear down recognizers whose element is gone.
    ///
    /// A captured element that was mid-drag yields a `DragCancel`, so the
    /// caller can close whatever the drag opened. Nothing else fires.
    pub fn retain<F>(&mut self, mut is_live: F) -> Vec<(K, GestureEvent)>
    where
        F: FnMut(&K) -> bool,
    {
        let dragging = self.captures_pointer();
        let dead: Vec<K> = self
            .recognizers
            .keys()
            .filter(|k| !is_live(k))
            .cloned()
            .collect();
        let mut cancelled = Vec::new();
        for key in dead {
            if let Some(mut recognizer) = self.recognizers.remove(&key) {
                recognizer.teardown();
            }
            if self.captured.as_ref() == Some(&key) {
                self.captured = None;
                if dragging {
                    cancelled.push((key, GestureEvent::DragCancel));
                }
            }
        }
        cancelled
    }

    /// Tear down everything.
    pub fn clear(&mut self) {
        for recognizer in self.recognizers.values_mut() {
            recognizer.teardown();
        }
        self.recognizers.clear();
        self.captured = None;
    }
}
