use crate::action::ActionVector;
use crate::buffer::{BYTES_PER_PIXEL, FrameBuffer};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors surfaced across the simulator boundary.
#[derive(Debug)]
pub enum SimulatorError {
    /// The output buffer's length does not equal `width * height * 4`.
    /// Raised before anything is written; nothing is truncated.
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The simulator could not produce a frame (terminal or otherwise
    /// unrecoverable internal state).
    RenderFailure(String),

    /// The action vector was rejected as malformed. Unreachable when the
    /// vector comes from the key-binding translation.
    InvalidAction(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "frame buffer: expected {expected} bytes, got {actual}")
            }
            Self::RenderFailure(msg) => write!(f, "render failed: {msg}"),
            Self::InvalidAction(msg) => write!(f, "invalid action: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}

// ---------------------------------------------------------------------------
// Contract traits
// ---------------------------------------------------------------------------

/// A simulator definition: the engine-side factory for play sessions.
///
/// Implementations are opaque beyond this surface. The definition knows
/// its name, its fixed frame dimensions, and how to start a session; the
/// session carries all mutable state.
pub trait Simulator: std::fmt::Debug {
    /// Registry name this simulator was selected by.
    fn name(&self) -> &'static str;

    /// Native frame size as (width, height) in pixels. Fixed for the
    /// lifetime of the definition.
    fn frame_size(&self) -> (u32, u32);

    /// Reseed whatever randomness the simulator carries. Deterministic
    /// simulators ignore this.
    fn reset_seed(&mut self, _seed: u32) {}

    /// Start a fresh session.
    fn new_session(&mut self) -> Box<dyn SimSession>;
}

/// Mutable per-session simulator state.
pub trait SimSession {
    /// Fill `buffer` with the current frame as RGBA8888, left-to-right,
    /// top-to-bottom. The buffer length is guaranteed by the caller to be
    /// `width * height * 4` for the definition's frame size, and must be
    /// fully overwritten. With `include_alpha` false the alpha channel is
    /// forced opaque (0xFF).
    fn render(&self, buffer: &mut [u8], include_alpha: bool) -> Result<(), SimulatorError>;

    /// Advance the session by one step under the given input intents.
    fn apply_action(&mut self, action: &ActionVector) -> Result<(), SimulatorError>;
}

// ---------------------------------------------------------------------------
// SimulatorHandle
// ---------------------------------------------------------------------------

/// One simulator definition plus one live session: a play session.
///
/// Created once at startup and driven by the pump until teardown. This is
/// the only surface the pump talks to; the simulator's internal state
/// machine stays opaque behind it.
pub struct SimulatorHandle {
    simulator: Box<dyn Simulator>,
    session: Box<dyn SimSession>,
}

impl SimulatorHandle {
    /// Allocate the session state for a definition and pair the two.
    pub fn new(mut simulator: Box<dyn Simulator>) -> Self {
        let session = simulator.new_session();
        Self { simulator, session }
    }

    pub fn name(&self) -> &'static str {
        self.simulator.name()
    }

    pub fn frame_size(&self) -> (u32, u32) {
        self.simulator.frame_size()
    }

    /// Render the current frame into `buffer`.
    ///
    /// The buffer length is validated against the definition's frame size
    /// before the session is touched, so a mismatch fails fast with
    /// [`SimulatorError::BufferSizeMismatch`] and no partial write.
    pub fn render(
        &mut self,
        buffer: &mut FrameBuffer,
        include_alpha: bool,
    ) -> Result<(), SimulatorError> {
        let (width, height) = self.simulator.frame_size();
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if buffer.len() != expected {
            return Err(SimulatorError::BufferSizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }
        self.session.render(buffer.data_mut(), include_alpha)
    }

    /// Forward one tick's translated input into the session.
    pub fn apply_input(&mut self, action: &ActionVector) -> Result<(), SimulatorError> {
        self.session.apply_action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FlatColor;

    struct FlatColorSession;

    impl Simulator for FlatColor {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn frame_size(&self) -> (u32, u32) {
            (240, 160)
        }

        fn new_session(&mut self) -> Box<dyn SimSession> {
            Box::new(FlatColorSession)
        }
    }

    impl SimSession for FlatColorSession {
        fn render(&self, buffer: &mut [u8], include_alpha: bool) -> Result<(), SimulatorError> {
            for pixel in buffer.chunks_exact_mut(4) {
                pixel[0] = 0x10;
                pixel[1] = 0x20;
                pixel[2] = 0x30;
                pixel[3] = if include_alpha { 0x80 } else { 0xFF };
            }
            Ok(())
        }

        fn apply_action(&mut self, _action: &ActionVector) -> Result<(), SimulatorError> {
            Ok(())
        }
    }

    #[test]
    fn render_fills_a_correctly_sized_buffer() {
        let mut handle = SimulatorHandle::new(Box::new(FlatColor));
        let mut buffer = FrameBuffer::alloc(240, 160);
        handle.render(&mut buffer, false).unwrap();
        assert_eq!(&buffer.data()[..4], &[0x10, 0x20, 0x30, 0xFF]);
        assert_eq!(&buffer.data()[buffer.len() - 4..], &[0x10, 0x20, 0x30, 0xFF]);
    }

    #[test]
    fn undersized_buffer_fails_fast_with_no_write() {
        let mut handle = SimulatorHandle::new(Box::new(FlatColor));
        // 100 bytes against a 240x160 frame.
        let mut buffer = FrameBuffer::alloc(5, 5);
        let result = handle.render(&mut buffer, false);
        assert!(matches!(
            result,
            Err(SimulatorError::BufferSizeMismatch {
                expected: 153_600,
                actual: 100,
            })
        ));
        // Nothing was written.
        assert!(buffer.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn alpha_is_opaque_unless_requested() {
        let mut handle = SimulatorHandle::new(Box::new(FlatColor));
        let mut buffer = FrameBuffer::alloc(240, 160);

        handle.render(&mut buffer, false).unwrap();
        assert_eq!(buffer.data()[3], 0xFF);

        handle.render(&mut buffer, true).unwrap();
        assert_eq!(buffer.data()[3], 0x80);
    }
}
