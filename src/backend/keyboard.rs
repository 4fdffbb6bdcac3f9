use raylib::ffi::KeyboardKey;
use raylib::prelude::*;

use tilequest::resources::input::{InputAction, InputSource};

/// Keys bound to each action. `Quit` is the window close request.
fn bindings(action: InputAction) -> &'static [KeyboardKey] {
    match action {
        InputAction::Left => &[KeyboardKey::KEY_LEFT],
        InputAction::Right => &[KeyboardKey::KEY_RIGHT],
        InputAction::Up => &[KeyboardKey::KEY_UP],
        InputAction::Down => &[KeyboardKey::KEY_DOWN],
        InputAction::Attack => &[KeyboardKey::KEY_SPACE],
        InputAction::Interact => &[KeyboardKey::KEY_ENTER],
        InputAction::Pause => &[KeyboardKey::KEY_P],
        InputAction::Debug => &[KeyboardKey::KEY_D],
        InputAction::Cancel => &[KeyboardKey::KEY_ESCAPE],
        InputAction::Advance => &[KeyboardKey::KEY_SPACE, KeyboardKey::KEY_ENTER],
        InputAction::Quit => &[],
    }
}

pub struct KeyboardInput<'a> {
    rl: &'a RaylibHandle,
}

impl<'a> KeyboardInput<'a> {
    pub fn new(rl: &'a RaylibHandle) -> Self {
        Self { rl }
    }
}

impl InputSource for KeyboardInput<'_> {
    fn is_down(&self, action: InputAction) -> bool {
        if action == InputAction::Quit {
            return self.rl.window_should_close();
        }
        bindings(action).iter().any(|key| self.rl.is_key_down(*key))
    }
}
