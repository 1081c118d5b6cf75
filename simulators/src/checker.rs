//! Scrolling checkerboard: the smallest simulator that exercises the whole
//! contract. Arrows pan the field, button1 swaps the two colors. No rules,
//! no score, no end state.

use cabinet_core::action::ActionVector;
use cabinet_core::simulator::{SimSession, Simulator, SimulatorError};

use crate::registry::SimulatorEntry;

const WIDTH: u32 = 240;
const HEIGHT: u32 = 160;
const CELL: i32 = 16;
const STEP: i32 = 2;

const LIGHT: [u8; 3] = [0xE8, 0xE4, 0xD0];
const DARK: [u8; 3] = [0x20, 0x28, 0x30];

#[derive(Debug)]
pub struct Checker;

impl Simulator for Checker {
    fn name(&self) -> &'static str {
        "checker"
    }

    fn frame_size(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn new_session(&mut self) -> Box<dyn SimSession> {
        Box::new(CheckerSession {
            scroll_x: 0,
            scroll_y: 0,
            inverted: false,
            button1_held: false,
        })
    }
}

struct CheckerSession {
    scroll_x: i32,
    scroll_y: i32,
    inverted: bool,
    // Previous tick's button1, so a held button inverts exactly once.
    button1_held: bool,
}

impl SimSession for CheckerSession {
    fn render(&self, buffer: &mut [u8], _include_alpha: bool) -> Result<(), SimulatorError> {
        // The scene is fully opaque, so the alpha channel is 0xFF whether
        // or not the caller asked for it.
        for (i, pixel) in buffer.chunks_exact_mut(4).enumerate() {
            let x = (i % WIDTH as usize) as i32;
            let y = (i / WIDTH as usize) as i32;
            let cell = ((x + self.scroll_x).div_euclid(CELL)
                + (y + self.scroll_y).div_euclid(CELL))
                & 1;
            let lit = (cell == 1) != self.inverted;
            let color = if lit { LIGHT } else { DARK };
            pixel[..3].copy_from_slice(&color);
            pixel[3] = 0xFF;
        }
        Ok(())
    }

    fn apply_action(&mut self, action: &ActionVector) -> Result<(), SimulatorError> {
        if action.right {
            self.scroll_x += STEP;
        }
        if action.left {
            self.scroll_x -= STEP;
        }
        if action.down {
            self.scroll_y += STEP;
        }
        if action.up {
            self.scroll_y -= STEP;
        }
        if action.button1 && !self.button1_held {
            self.inverted = !self.inverted;
        }
        self.button1_held = action.button1;
        Ok(())
    }
}

fn create_simulator() -> Box<dyn Simulator> {
    Box::new(Checker)
}

inventory::submit! {
    SimulatorEntry::new("checker", create_simulator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(session: &dyn SimSession) -> Vec<u8> {
        let mut buffer = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
        session.render(&mut buffer, false).unwrap();
        buffer
    }

    #[test]
    fn adjacent_cells_alternate() {
        let mut sim = Checker;
        let session = sim.new_session();
        let buffer = frame(session.as_ref());

        // Pixel (0,0) and pixel (CELL,0) sit in neighboring cells.
        let a = &buffer[..3];
        let b = &buffer[CELL as usize * 4..CELL as usize * 4 + 3];
        assert_ne!(a, b);
    }

    #[test]
    fn idle_input_leaves_the_scene_still() {
        let mut sim = Checker;
        let mut session = sim.new_session();
        let before = frame(session.as_ref());
        session.apply_action(&ActionVector::new()).unwrap();
        assert_eq!(before, frame(session.as_ref()));
    }

    #[test]
    fn arrows_pan_the_field() {
        let mut sim = Checker;
        let mut session = sim.new_session();
        let before = frame(session.as_ref());

        let mut action = ActionVector::new();
        action.right = true;
        session.apply_action(&action).unwrap();
        assert_ne!(before, frame(session.as_ref()));
    }

    #[test]
    fn held_button1_inverts_exactly_once() {
        let mut sim = Checker;
        let mut session = sim.new_session();
        let original = frame(session.as_ref());

        let mut action = ActionVector::new();
        action.button1 = true;
        session.apply_action(&action).unwrap();
        let inverted = frame(session.as_ref());
        assert_ne!(original, inverted);

        // Still held: no second toggle.
        session.apply_action(&action).unwrap();
        assert_eq!(inverted, frame(session.as_ref()));

        // Release, press again: toggles back.
        session.apply_action(&ActionVector::new()).unwrap();
        session.apply_action(&action).unwrap();
        assert_eq!(original, frame(session.as_ref()));
    }
}
