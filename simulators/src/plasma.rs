//! Animated color field built from integer triangle waves. The phase
//! advances one step per applied action; holding button1 freezes it. The
//! seed offsets the starting phase, so two runs with the same seed draw
//! the same frames.

use cabinet_core::action::ActionVector;
use cabinet_core::simulator::{SimSession, Simulator, SimulatorError};

use crate::registry::SimulatorEntry;

const WIDTH: u32 = 240;
const HEIGHT: u32 = 160;

#[derive(Debug, Default)]
pub struct Plasma {
    seed: u32,
}

impl Plasma {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Simulator for Plasma {
    fn name(&self) -> &'static str {
        "plasma"
    }

    fn frame_size(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn reset_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    fn new_session(&mut self) -> Box<dyn SimSession> {
        Box::new(PlasmaSession { phase: self.seed })
    }
}

struct PlasmaSession {
    phase: u32,
}

/// Triangle wave over a 512-value period, peaking at 255.
fn tri(v: u32) -> u8 {
    let v = v & 0x1FF;
    if v < 0x100 { v as u8 } else { (0x1FF - v) as u8 }
}

impl SimSession for PlasmaSession {
    fn render(&self, buffer: &mut [u8], _include_alpha: bool) -> Result<(), SimulatorError> {
        for (i, pixel) in buffer.chunks_exact_mut(4).enumerate() {
            let x = (i % WIDTH as usize) as u32;
            let y = (i / WIDTH as usize) as u32;
            pixel[0] = tri(x.wrapping_mul(3).wrapping_add(self.phase.wrapping_mul(2)));
            pixel[1] = tri(y.wrapping_mul(5).wrapping_add(self.phase.wrapping_mul(3)));
            pixel[2] = tri((x + y).wrapping_mul(2).wrapping_add(self.phase.wrapping_mul(5)));
            pixel[3] = 0xFF;
        }
        Ok(())
    }

    fn apply_action(&mut self, action: &ActionVector) -> Result<(), SimulatorError> {
        if !action.button1 {
            self.phase = self.phase.wrapping_add(1);
        }
        Ok(())
    }
}

fn create_simulator() -> Box<dyn Simulator> {
    Box::new(Plasma::new())
}

inventory::submit! {
    SimulatorEntry::new("plasma", create_simulator)
}
