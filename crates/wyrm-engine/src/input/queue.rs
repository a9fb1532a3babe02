/// Input event types the scene understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to normalized device coordinates (x, y), both in -1..1, Y-up.
    PointerMove { x: f32, y: f32 },
    /// The visible scene area changed size (scene units).
    Resize { width: f32, height: f32 },
    /// Restart the scene from its initial state.
    Reset,
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 0.5, y: -0.5 });
        q.push(InputEvent::Reset);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_push_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 0.1, y: 0.2 });
        q.push(InputEvent::Resize { width: 10.0, height: 5.0 });
        q.push(InputEvent::Reset);
        assert_eq!(
            q.drain(),
            vec![
                InputEvent::PointerMove { x: 0.1, y: 0.2 },
                InputEvent::Resize { width: 10.0, height: 5.0 },
                InputEvent::Reset,
            ]
        );
        assert!(q.drain().is_empty());
    }
}
