//! Held-key tracker for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a held key that has not been seen (pressed or auto-repeated) for
//! `key_release_timeout` seconds counts as released.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{map_key, InputKey};
use crate::types::InputFrame;

// Long enough to bridge a terminal's auto-repeat interval, short enough that a
// tap does not turn into a sustained hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_SECS: f32 = 0.15;

const MAX_PENDING_EDGES: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    down: bool,
    last_seen: f32,
}

impl HeldKey {
    fn press(&mut self, now: f32) {
        self.down = true;
        self.last_seen = now;
    }

    fn release(&mut self) {
        self.down = false;
    }

    fn expire(&mut self, now: f32, timeout: f32) {
        if self.down && now - self.last_seen > timeout {
            self.down = false;
        }
    }
}

/// Tracks held keys and buffers one-shot presses until the next frame.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left: HeldKey,
    right: HeldKey,
    down: HeldKey,
    pending: ArrayVec<InputKey, MAX_PENDING_EDGES>,
    /// Seconds since construction, advanced by [`InputHandler::update`]
    now: f32,
    key_release_timeout: f32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            left: HeldKey::default(),
            right: HeldKey::default(),
            down: HeldKey::default(),
            pending: ArrayVec::new(),
            now: 0.0,
            key_release_timeout: DEFAULT_KEY_RELEASE_TIMEOUT_SECS,
        }
    }

    pub fn with_key_release_timeout(mut self, timeout_secs: f32) -> Self {
        self.key_release_timeout = timeout_secs;
        self
    }

    pub fn key_release_timeout(&self) -> f32 {
        self.key_release_timeout
    }

    fn held_mut(&mut self, key: InputKey) -> Option<&mut HeldKey> {
        match key {
            InputKey::Left => Some(&mut self.left),
            InputKey::Right => Some(&mut self.right),
            InputKey::Down => Some(&mut self.down),
            _ => None,
        }
    }

    /// Record a press (or terminal auto-repeat). Returns the mapped key, if any.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<InputKey> {
        let key = map_key(code)?;
        let now = self.now;

        match self.held_mut(key) {
            Some(held) => held.press(now),
            None => {
                // A full buffer means the game is not consuming frames; drop the press.
                let _ = self.pending.try_push(key);
            }
        }
        Some(key)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(held) = map_key(code).and_then(|key| self.held_mut(key)) {
            held.release();
        }
    }

    /// Advance the handler clock and auto-release stale held keys.
    pub fn update(&mut self, elapsed_secs: f32) {
        self.now += elapsed_secs.max(0.0);

        let (now, timeout) = (self.now, self.key_release_timeout);
        self.left.expire(now, timeout);
        self.right.expire(now, timeout);
        self.down.expire(now, timeout);
    }

    /// Snapshot held keys and drain buffered presses into one frame.
    pub fn take_frame(&mut self) -> InputFrame {
        let mut frame = InputFrame {
            move_left: self.left.down,
            move_right: self.right.down,
            soft_drop: self.down.down,
            ..InputFrame::default()
        };

        for key in self.pending.drain(..) {
            match key {
                InputKey::RotateLeft => frame.rotate_left = true,
                InputKey::RotateRight => frame.rotate_right = true,
                InputKey::HardDrop => frame.hard_drop = true,
                InputKey::Restart => frame.restart = true,
                InputKey::Left | InputKey::Right | InputKey::Down => {}
            }
        }

        frame
    }

    pub fn reset(&mut self) {
        self.left.release();
        self.right.release();
        self.down.release();
        self.pending.clear();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_stays_down_until_release() {
        let mut ih = InputHandler::new().with_key_release_timeout(10.0);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(InputKey::Left));
        assert!(ih.take_frame().move_left);

        ih.update(1.0);
        assert!(ih.take_frame().move_left);

        ih.handle_key_release(KeyCode::Char('a'));
        assert!(!ih.take_frame().move_left);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::new().with_key_release_timeout(0.05);

        ih.handle_key_press(KeyCode::Down);
        ih.update(0.04);
        assert!(ih.take_frame().soft_drop);

        ih.update(0.02);
        assert!(!ih.take_frame().soft_drop);
    }

    #[test]
    fn test_auto_repeat_keeps_key_held() {
        let mut ih = InputHandler::new().with_key_release_timeout(0.05);

        ih.handle_key_press(KeyCode::Right);
        for _ in 0..10 {
            ih.update(0.03);
            ih.handle_key_press(KeyCode::Right);
            assert!(ih.take_frame().move_right);
        }
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout(0.05);

        ih.handle_key_press(KeyCode::Left);
        ih.update(0.04);
        ih.handle_key_press(KeyCode::Char('e'));
        ih.update(0.02);

        let frame = ih.take_frame();
        assert!(!frame.move_left);
        assert!(frame.rotate_right);
    }

    #[test]
    fn test_one_shot_presses_fire_once() {
        let mut ih = InputHandler::new();

        ih.handle_key_press(KeyCode::Char(' '));
        ih.handle_key_press(KeyCode::Char('q'));

        let frame = ih.take_frame();
        assert!(frame.hard_drop);
        assert!(frame.rotate_left);
        assert!(!frame.restart);

        assert!(ih.take_frame().is_idle());
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Char('x')), None);
        assert!(ih.take_frame().is_idle());
    }

    #[test]
    fn test_reset_clears_held_state_and_pending_presses() {
        let mut ih = InputHandler::new().with_key_release_timeout(10.0);

        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_press(KeyCode::Char('r'));
        ih.reset();

        assert!(ih.take_frame().is_idle());
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        assert!(InputHandler::new().key_release_timeout() > 0.0);
    }
}
