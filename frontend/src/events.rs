use cabinet_core::input::{
    Intent, KeyBindings, KEY_BUTTON1, KEY_BUTTON2, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP,
};
use sdl2::keyboard::Scancode;

/// Translate an SDL scancode onto the engine's key-code vocabulary.
///
/// Arrows, space, letters, and digits get their browser-style codes so
/// config rebindings can name any of them; everything else is unmapped
/// and simply never enters the input state.
pub fn key_code(scancode: Scancode) -> Option<u32> {
    let raw = scancode as i32;
    match scancode {
        Scancode::Left => Some(KEY_LEFT),
        Scancode::Up => Some(KEY_UP),
        Scancode::Right => Some(KEY_RIGHT),
        Scancode::Down => Some(KEY_DOWN),
        Scancode::Space => Some(KEY_BUTTON1),
        // SDL scancodes run A..Z and 1..9,0 contiguously.
        _ if (Scancode::A as i32..=Scancode::Z as i32).contains(&raw) => {
            Some((b'A' as i32 + (raw - Scancode::A as i32)) as u32)
        }
        Scancode::Num0 => Some(b'0' as u32),
        _ if (Scancode::Num1 as i32..=Scancode::Num9 as i32).contains(&raw) => {
            Some((b'1' as i32 + (raw - Scancode::Num1 as i32)) as u32)
        }
        _ => None,
    }
}

/// The engine's canonical table plus the aliases players expect: WASD
/// mirrors the arrows, Z mirrors button1, X is button2.
pub fn default_host_bindings() -> KeyBindings {
    let mut bindings = KeyBindings::default();
    bindings.bind(b'W' as u32, Intent::Up);
    bindings.bind(b'A' as u32, Intent::Left);
    bindings.bind(b'S' as u32, Intent::Down);
    bindings.bind(b'D' as u32, Intent::Right);
    bindings.bind(b'Z' as u32, Intent::Button1);
    bindings.bind(KEY_BUTTON2, Intent::Button2);
    bindings
}
