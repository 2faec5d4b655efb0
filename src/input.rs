use crate::debug_input;
use macroquad::prelude::{KeyCode, get_keys_down, get_keys_pressed};

/// Simulation-level actions, decoupled from physical key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,
    ActivateBoost,
}

// Physical bindings: arrows or WASD, space for the boost.
const KEY_BINDINGS: &[(KeyCode, Action)] = &[
    (KeyCode::Up, Action::Accelerate),
    (KeyCode::W, Action::Accelerate),
    (KeyCode::Down, Action::Brake),
    (KeyCode::S, Action::Brake),
    (KeyCode::Left, Action::SteerLeft),
    (KeyCode::A, Action::SteerLeft),
    (KeyCode::Right, Action::SteerRight),
    (KeyCode::D, Action::SteerRight),
    (KeyCode::Space, Action::ActivateBoost),
];

/// Maps a physical key to its simulation action. Unbound keys have none.
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, action)| *action)
}

/// Per-tick view of the input state consumed by the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    /// Press edge, not hold state: true for exactly one snapshot per press.
    pub boost_pressed: bool,
}

/// Records held/pressed state per action between simulation ticks.
#[derive(Debug, Default)]
pub struct InputTracker {
    accelerate: bool,
    brake: bool,
    steer_left: bool,
    steer_right: bool,
    boost_pressed: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Default::default()
    }

    /// Poll the keyboard once per rendered frame. Keys without a binding
    /// are ignored.
    pub fn poll_keyboard(&mut self) {
        self.accelerate = false;
        self.brake = false;
        self.steer_left = false;
        self.steer_right = false;

        for key in get_keys_down() {
            match action_for_key(key) {
                Some(Action::ActivateBoost) | None => {}
                Some(action) => self.apply(action, true),
            }
        }
        // The boost is edge triggered, holding the key does nothing
        for key in get_keys_pressed() {
            if action_for_key(key) == Some(Action::ActivateBoost) {
                debug_input!("boost key edge");
                self.boost_pressed = true;
            }
        }
    }

    /// Record a state change for one action directly (tests and replays).
    pub fn apply(&mut self, action: Action, down: bool) {
        match action {
            Action::Accelerate => self.accelerate = down,
            Action::Brake => self.brake = down,
            Action::SteerLeft => self.steer_left = down,
            Action::SteerRight => self.steer_right = down,
            // A release of the boost key carries no information
            Action::ActivateBoost => self.boost_pressed |= down,
        }
    }

    /// Produce the snapshot for the next tick, consuming the boost edge so
    /// one press yields at most one activation attempt.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            accelerate: self.accelerate,
            brake: self.brake,
            steer_left: self.steer_left,
            steer_right: self.steer_right,
            boost_pressed: self.boost_pressed,
        };
        self.boost_pressed = false;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key(KeyCode::Up), Some(Action::Accelerate));
        assert_eq!(action_for_key(KeyCode::W), Some(Action::Accelerate));
        assert_eq!(action_for_key(KeyCode::Down), Some(Action::Brake));
        assert_eq!(action_for_key(KeyCode::Left), Some(Action::SteerLeft));
        assert_eq!(action_for_key(KeyCode::D), Some(Action::SteerRight));
        assert_eq!(action_for_key(KeyCode::Space), Some(Action::ActivateBoost));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(action_for_key(KeyCode::Enter), None);
        assert_eq!(action_for_key(KeyCode::F1), None);
        assert_eq!(action_for_key(KeyCode::Q), None);
    }

    #[test]
    fn test_held_state_round_trip() {
        let mut tracker = InputTracker::new();
        tracker.apply(Action::Accelerate, true);
        tracker.apply(Action::SteerLeft, true);

        let snapshot = tracker.snapshot();
        assert!(snapshot.accelerate);
        assert!(snapshot.steer_left);
        assert!(!snapshot.brake);
        assert!(!snapshot.steer_right);

        tracker.apply(Action::SteerLeft, false);
        assert!(!tracker.snapshot().steer_left);
    }

    #[test]
    fn test_boost_edge_consumed_once() {
        let mut tracker = InputTracker::new();
        tracker.apply(Action::ActivateBoost, true);

        assert!(tracker.snapshot().boost_pressed);
        // The edge must not survive into the next tick
        assert!(!tracker.snapshot().boost_pressed);
    }

    #[test]
    fn test_boost_release_is_not_an_edge() {
        let mut tracker = InputTracker::new();
        tracker.apply(Action::ActivateBoost, false);
        assert!(!tracker.snapshot().boost_pressed);
    }
}
