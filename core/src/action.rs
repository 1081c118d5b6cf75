/// Think NES-style controls: four directions and two buttons.
///
/// This is the simulator's documented input vocabulary. One vector is
/// built fresh from the sampled key state on every tick and handed to the
/// active session; it is never stored between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionVector {
    pub left: bool,
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub button1: bool,
    pub button2: bool,
}

impl ActionVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no intent is set at all.
    pub fn is_empty(&self) -> bool {
        !self.left && !self.up && !self.right && !self.down && !self.button1 && !self.button2
    }
}
