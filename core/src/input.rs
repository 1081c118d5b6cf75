use std::collections::HashMap;

use crate::action::ActionVector;

// ---------------------------------------------------------------------------
// Key codes
// ---------------------------------------------------------------------------

// The engine's documented key-code vocabulary (keyboard-scancode-like small
// integers). Hosts translate their native scancodes onto these.
pub const KEY_BUTTON1: u32 = 32; // space
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const KEY_BUTTON2: u32 = 88; // 'X'

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

/// Process-scoped key state: key code to pressed flag.
///
/// Mutated fire-and-forget by the host's key-engaged/key-released
/// callbacks and read once per tick by the translation step. Writes are
/// last-write-wins per code; there is no debouncing and no repeat
/// suppression. A code with no entry is simply not pressed.
///
/// All access goes through these operations; the map itself is private so
/// callbacks and the tick loop share one defined read/write contract.
#[derive(Debug, Default)]
pub struct InputState {
    keys: HashMap<u32, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-down entry point.
    pub fn engage(&mut self, code: u32) {
        self.keys.insert(code, true);
    }

    /// Key-up entry point.
    pub fn release(&mut self, code: u32) {
        self.keys.insert(code, false);
    }

    /// Current state of a code; absent means released.
    pub fn is_engaged(&self, code: u32) -> bool {
        self.keys.get(&code).copied().unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// KeyBindings
// ---------------------------------------------------------------------------

/// An intent a key code can be bound to: one named field of the
/// [`ActionVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Left,
    Up,
    Right,
    Down,
    Button1,
    Button2,
}

/// Maps key codes to simulator intents.
///
/// Translation walks the bound codes only, so codes with no binding never
/// surface in the resulting action vector and are never an error. Several
/// codes may be bound to the same intent; the intent is set if any of them
/// is engaged. The default table is the engine's canonical five:
/// arrows to the four directions, space to button1.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<u32, Intent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KEY_LEFT, Intent::Left);
        bindings.bind(KEY_UP, Intent::Up);
        bindings.bind(KEY_RIGHT, Intent::Right);
        bindings.bind(KEY_DOWN, Intent::Down);
        bindings.bind(KEY_BUTTON1, Intent::Button1);
        bindings
    }
}

impl KeyBindings {
    /// A table with no bindings at all.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a key code to an intent, replacing any previous binding for
    /// that code.
    pub fn bind(&mut self, code: u32, intent: Intent) {
        self.map.insert(code, intent);
    }

    /// Remove every code currently bound to `intent`.
    pub fn unbind_intent(&mut self, intent: Intent) {
        self.map.retain(|_, bound| *bound != intent);
    }

    /// Look up the intent for a code.
    pub fn get(&self, code: u32) -> Option<Intent> {
        self.map.get(&code).copied()
    }

    /// Build this tick's action vector from the current key state.
    ///
    /// Keys never pressed translate to false, never to an unknown state.
    pub fn translate(&self, input: &InputState) -> ActionVector {
        let mut action = ActionVector::new();
        for (&code, &intent) in &self.map {
            if !input.is_engaged(code) {
                continue;
            }
            match intent {
                Intent::Left => action.left = true,
                Intent::Up => action.up = true,
                Intent::Right => action.right = true,
                Intent::Down => action.down = true,
                Intent::Button1 => action.button1 = true,
                Intent::Button2 => action.button2 = true,
            }
        }
        action
    }
}
