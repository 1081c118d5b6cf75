pub mod action;
pub mod buffer;
pub mod input;
pub mod pump;
pub mod simulator;

pub mod prelude {
    pub use crate::action::ActionVector;
    pub use crate::buffer::FrameBuffer;
    pub use crate::input::{InputState, KeyBindings};
    pub use crate::pump::{FailurePolicy, PumpStatus, RenderPump, Surface};
    pub use crate::simulator::{SimSession, Simulator, SimulatorError, SimulatorHandle};
}
