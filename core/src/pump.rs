use crate::buffer::FrameBuffer;
use crate::input::{InputState, KeyBindings};
use crate::simulator::{SimulatorError, SimulatorHandle};

/// The display side of the boundary: somewhere to put pixels.
///
/// Implementations report their current pixel dimensions and accept a
/// finished RGBA8888 frame (origin top-left, no scaling, no format
/// conversion). For a real host the blit also carries the per-frame
/// cadence (e.g. a vsync-synchronized present); test harnesses just
/// record the frame.
pub trait Surface {
    /// Current pixel dimensions of the surface.
    fn pixel_size(&self) -> (u32, u32);

    /// Composite the frame onto the surface.
    fn blit(&mut self, frame: &FrameBuffer);
}

/// What to do when the simulator fails mid-run.
///
/// Fixed at pump construction so a run behaves consistently. Either way a
/// failed tick never blits: the previous frame stays on screen instead of
/// partial pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the error, skip the rest of the tick, keep going.
    SkipFrame,
    /// Report the error and stop requesting ticks.
    Halt,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// Schedule exactly one more tick.
    Continue,
    /// The pump has stopped; no further ticks will do work.
    Halted,
}

/// The tick state machine driving the render/input/blit cycle.
///
/// The pump owns the frame buffer and performs one tick per call, in
/// strict order: size the buffer to the surface, have the simulator fill
/// it, translate and inject the sampled input, blit. It never calls a
/// scheduling primitive itself — the host loop (vsync callback, timer, or
/// test harness) invokes `tick` once per [`PumpStatus::Continue`], which
/// is what makes the loop cooperative: input callbacks can only run
/// between ticks, never preempt one.
pub struct RenderPump {
    buffer: FrameBuffer,
    bindings: KeyBindings,
    policy: FailurePolicy,
    halted: bool,
    ticks: u64,
}

impl RenderPump {
    /// Build a pump with its buffer pre-sized to `(width, height)`.
    ///
    /// The buffer is re-checked against the surface every tick, so the
    /// initial size is only an allocation hint; a surface resize between
    /// ticks replaces the buffer before the next render call.
    pub fn new(size: (u32, u32), bindings: KeyBindings, policy: FailurePolicy) -> Self {
        Self {
            buffer: FrameBuffer::alloc(size.0, size.1),
            bindings,
            policy,
            halted: false,
            ticks: 0,
        }
    }

    /// Ticks completed or attempted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Run one tick: render, apply input, blit.
    ///
    /// A simulator error ends the tick early (no blit, so the previous
    /// frame remains visible) and is reported through the failure policy.
    /// Nothing is retried; the next tick starts from scratch.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
        handle: &mut SimulatorHandle,
        input: &InputState,
    ) -> PumpStatus {
        if self.halted {
            return PumpStatus::Halted;
        }
        self.ticks += 1;

        let size = surface.pixel_size();
        if !self.buffer.matches(size) {
            log::debug!(
                "surface now {}x{}, reallocating frame buffer",
                size.0,
                size.1
            );
            self.buffer = FrameBuffer::alloc(size.0, size.1);
        }

        if let Err(err) = handle.render(&mut self.buffer, false) {
            return self.report(err);
        }

        let action = self.bindings.translate(input);
        if let Err(err) = handle.apply_input(&action) {
            return self.report(err);
        }

        surface.blit(&self.buffer);
        PumpStatus::Continue
    }

    /// Route a simulator error through the failure policy.
    ///
    /// Only `RenderFailure` is ever recoverable; a size mismatch or a
    /// rejected action means an invariant was broken and the pump halts
    /// regardless of policy.
    fn report(&mut self, err: SimulatorError) -> PumpStatus {
        let recoverable = matches!(err, SimulatorError::RenderFailure(_))
            && self.policy == FailurePolicy::SkipFrame;
        if recoverable {
            log::warn!("tick {}: {err}; frame skipped", self.ticks);
            PumpStatus::Continue
        } else {
            log::error!("tick {}: {err}; pump halted", self.ticks);
            self.halted = true;
            PumpStatus::Halted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionVector;
    use crate::input::KEY_RIGHT;
    use crate::simulator::{SimSession, Simulator, SimulatorHandle};
    use std::cell::RefCell;
    use std::rc::Rc;

    // Shared event log; the whole pump is single-threaded so Rc/RefCell
    // is enough to observe call order across the stubs.
    type Trace = Rc<RefCell<Vec<String>>>;

    #[derive(Debug)]
    struct ProbeSim {
        trace: Trace,
        size: Rc<RefCell<(u32, u32)>>,
        fail_renders: Rc<RefCell<u32>>,
        reject_actions: bool,
    }

    struct ProbeSession {
        trace: Trace,
        fail_renders: Rc<RefCell<u32>>,
        reject_actions: bool,
    }

    impl Simulator for ProbeSim {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn frame_size(&self) -> (u32, u32) {
            *self.size.borrow()
        }

        fn new_session(&mut self) -> Box<dyn SimSession> {
            Box::new(ProbeSession {
                trace: Rc::clone(&self.trace),
                fail_renders: Rc::clone(&self.fail_renders),
                reject_actions: self.reject_actions,
            })
        }
    }

    impl SimSession for ProbeSession {
        fn render(&self, buffer: &mut [u8], _include_alpha: bool) -> Result<(), SimulatorError> {
            if *self.fail_renders.borrow() > 0 {
                *self.fail_renders.borrow_mut() -= 1;
                self.trace.borrow_mut().push("render-err".into());
                return Err(SimulatorError::RenderFailure("probe tripped".into()));
            }
            buffer.fill(0xAB);
            self.trace.borrow_mut().push("render".into());
            Ok(())
        }

        fn apply_action(&mut self, action: &ActionVector) -> Result<(), SimulatorError> {
            if self.reject_actions {
                return Err(SimulatorError::InvalidAction("probe rejects".into()));
            }
            self.trace
                .borrow_mut()
                .push(format!("apply right={}", action.right));
            Ok(())
        }
    }

    struct ProbeSurface {
        trace: Trace,
        size: Rc<RefCell<(u32, u32)>>,
        blits: u32,
    }

    impl Surface for ProbeSurface {
        fn pixel_size(&self) -> (u32, u32) {
            *self.size.borrow()
        }

        fn blit(&mut self, frame: &FrameBuffer) {
            assert!(frame.matches(self.pixel_size()));
            self.blits += 1;
            self.trace.borrow_mut().push("blit".into());
        }
    }

    struct Rig {
        trace: Trace,
        size: Rc<RefCell<(u32, u32)>>,
        surface: ProbeSurface,
        handle: SimulatorHandle,
        input: InputState,
    }

    fn rig(policy: FailurePolicy) -> (Rig, RenderPump) {
        rig_with(policy, 0, false)
    }

    fn rig_with(policy: FailurePolicy, fail_renders: u32, reject_actions: bool) -> (Rig, RenderPump) {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let size = Rc::new(RefCell::new((16u32, 8u32)));
        let handle = SimulatorHandle::new(Box::new(ProbeSim {
            trace: Rc::clone(&trace),
            size: Rc::clone(&size),
            fail_renders: Rc::new(RefCell::new(fail_renders)),
            reject_actions,
        }));
        let surface = ProbeSurface {
            trace: Rc::clone(&trace),
            size: Rc::clone(&size),
            blits: 0,
        };
        let pump = RenderPump::new(*size.borrow(), KeyBindings::default(), policy);
        (
            Rig {
                trace,
                size,
                surface,
                handle,
                input: InputState::new(),
            },
            pump,
        )
    }

    #[test]
    fn tick_order_is_render_then_apply_then_blit() {
        let (mut rig, mut pump) = rig(FailurePolicy::SkipFrame);
        let status = pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        assert_eq!(status, PumpStatus::Continue);
        assert_eq!(
            *rig.trace.borrow(),
            vec!["render", "apply right=false", "blit"]
        );
    }

    #[test]
    fn one_render_one_apply_one_blit_per_tick() {
        let (mut rig, mut pump) = rig(FailurePolicy::SkipFrame);
        for _ in 0..5 {
            pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        }
        let trace = rig.trace.borrow();
        assert_eq!(trace.len(), 15);
        assert_eq!(trace.iter().filter(|e| *e == "blit").count(), 5);
        assert_eq!(rig.surface.blits, 5);
        assert_eq!(pump.ticks(), 5);
    }

    #[test]
    fn input_edge_is_visible_on_the_next_tick() {
        let (mut rig, mut pump) = rig(FailurePolicy::SkipFrame);
        pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        rig.input.engage(KEY_RIGHT);
        pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        let trace = rig.trace.borrow();
        assert!(trace.contains(&"apply right=false".to_string()));
        assert!(trace.contains(&"apply right=true".to_string()));
    }

    #[test]
    fn render_failure_with_skip_frame_skips_blit_and_continues() {
        let (mut rig, mut pump) = rig_with(FailurePolicy::SkipFrame, 1, false);

        let status = pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        assert_eq!(status, PumpStatus::Continue);
        assert_eq!(rig.surface.blits, 0);
        // No input application either: the failed step ends the tick.
        assert_eq!(*rig.trace.borrow(), vec!["render-err"]);

        // Next tick renders again from scratch.
        let status = pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        assert_eq!(status, PumpStatus::Continue);
        assert_eq!(rig.surface.blits, 1);
    }

    #[test]
    fn render_failure_with_halt_stops_the_pump() {
        let (mut rig, mut pump) = rig_with(FailurePolicy::Halt, 1, false);

        let status = pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        assert_eq!(status, PumpStatus::Halted);
        assert!(pump.is_halted());
        assert_eq!(rig.surface.blits, 0);

        // Further ticks are inert.
        let status = pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        assert_eq!(status, PumpStatus::Halted);
        assert_eq!(pump.ticks(), 1);
        assert_eq!(*rig.trace.borrow(), vec!["render-err"]);
    }

    #[test]
    fn invalid_action_halts_even_under_skip_frame() {
        let (mut rig, mut pump) = rig_with(FailurePolicy::SkipFrame, 0, true);
        let status = pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        assert_eq!(status, PumpStatus::Halted);
        assert_eq!(rig.surface.blits, 0);
    }

    #[test]
    fn surface_resize_reallocates_before_the_next_render() {
        let (mut rig, mut pump) = rig(FailurePolicy::SkipFrame);
        pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);

        // Grow the surface (the probe simulator tracks the same size).
        *rig.size.borrow_mut() = (32, 32);
        let status = pump.tick(&mut rig.surface, &mut rig.handle, &rig.input);
        assert_eq!(status, PumpStatus::Continue);
        // ProbeSurface::blit asserts the blitted frame matches the new
        // dimensions, so reaching Continue proves the reallocation.
        assert_eq!(rig.surface.blits, 2);
    }
}
