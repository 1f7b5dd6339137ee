use raylib::prelude::*;

/// Game-level input, independent of the key that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Fire,
}

const HELD: [(KeyboardKey, Action); 4] = [
    (KeyboardKey::KEY_W, Action::Forward),
    (KeyboardKey::KEY_S, Action::Backward),
    (KeyboardKey::KEY_A, Action::TurnLeft),
    (KeyboardKey::KEY_D, Action::TurnRight),
];

/// Polls the keyboard once per frame. Movement repeats while held; fire
/// triggers once per key press.
pub fn process_events(window: &RaylibHandle) -> Vec<Action> {
    let mut actions: Vec<Action> = HELD
        .iter()
        .filter(|(key, _)| window.is_key_down(*key))
        .map(|&(_, action)| action)
        .collect();
    if window.is_key_pressed(KeyboardKey::KEY_SPACE) {
        actions.push(Action::Fire);
    }
    actions
}
