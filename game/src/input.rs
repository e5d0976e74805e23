use std::collections::VecDeque;

use winit::event::VirtualKeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    Start,
    Retry,
}

pub fn map_key_to_action(key: VirtualKeyCode) -> Option<InputAction> {
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(InputAction::MoveLeft),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(InputAction::MoveRight),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(InputAction::SoftDrop),
        VirtualKeyCode::Q | VirtualKeyCode::E => Some(InputAction::Rotate),
        _ => None,
    }
}

pub fn map_key_to_control(key: VirtualKeyCode) -> Option<ControlKey> {
    match key {
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter | VirtualKeyCode::Space => {
            Some(ControlKey::Start)
        }
        VirtualKeyCode::R => Some(ControlKey::Retry),
        _ => None,
    }
}

/// Key presses collected between frames.
///
/// The window delivers keys whenever they arrive; the loop only applies them at the start of
/// its next frame, so a gravity step never sees a half-applied input.
#[derive(Debug, Default, Clone)]
pub struct InputQueue {
    pending: VecDeque<InputAction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: InputAction) {
        self.pending.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Hands out queued actions oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> impl Iterator<Item = InputAction> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_letters_share_actions() {
        assert_eq!(
            map_key_to_action(VirtualKeyCode::Left),
            Some(InputAction::MoveLeft)
        );
        assert_eq!(
            map_key_to_action(VirtualKeyCode::A),
            Some(InputAction::MoveLeft)
        );
        assert_eq!(
            map_key_to_action(VirtualKeyCode::D),
            Some(InputAction::MoveRight)
        );
        assert_eq!(
            map_key_to_action(VirtualKeyCode::S),
            Some(InputAction::SoftDrop)
        );
        assert_eq!(map_key_to_action(VirtualKeyCode::Q), Some(InputAction::Rotate));
        assert_eq!(map_key_to_action(VirtualKeyCode::E), Some(InputAction::Rotate));
    }

    #[test]
    fn up_arrow_is_not_bound() {
        assert_eq!(map_key_to_action(VirtualKeyCode::Up), None);
        assert_eq!(map_key_to_control(VirtualKeyCode::Up), None);
    }

    #[test]
    fn control_keys_do_not_overlap_gameplay_keys() {
        for key in [VirtualKeyCode::Return, VirtualKeyCode::Space, VirtualKeyCode::R] {
            assert!(map_key_to_control(key).is_some());
            assert_eq!(map_key_to_action(key), None);
        }
    }

    #[test]
    fn queue_drains_in_arrival_order() {
        let mut queue = InputQueue::new();
        queue.push(InputAction::Rotate);
        queue.push(InputAction::MoveLeft);
        queue.push(InputAction::MoveLeft);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![InputAction::Rotate, InputAction::MoveLeft, InputAction::MoveLeft]
        );
        assert!(queue.is_empty());
    }
}
