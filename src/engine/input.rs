use std::collections::VecDeque;

use glam::Vec2;

/// Discrete input-change events delivered by the host. The core never polls a
/// device; it only sees the latest value of each control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Movement stick/keys changed; components in `-1..=1`.
    MoveChanged(Vec2),
    /// Jump button pressed (`true`) or released (`false`).
    JumpChanged(bool),
    /// Run button pressed (`true`) or released (`false`).
    RunChanged(bool),
}

/// FIFO of pending input events, attached to the controller entity.
///
/// The host pushes events at any point between ticks; `input_system` drains
/// the queue at the start of each tick and applies the events in arrival
/// order. Single writer, single reader — the host is expected to deliver
/// input on the simulation thread.
#[derive(Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::JumpChanged(true));
        queue.push(InputEvent::JumpChanged(false));
        queue.push(InputEvent::MoveChanged(Vec2::X));

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::JumpChanged(true),
                InputEvent::JumpChanged(false),
                InputEvent::MoveChanged(Vec2::X),
            ]
        );
        assert!(queue.is_empty());
    }
}
