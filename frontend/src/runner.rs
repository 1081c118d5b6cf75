use std::time::Instant;

use cabinet_core::input::{InputState, KeyBindings};
use cabinet_core::pump::{FailurePolicy, PumpStatus, RenderPump};
use cabinet_core::simulator::SimulatorHandle;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::events;
use crate::video::Video;

pub struct Options {
    pub scale: u32,
    pub policy: FailurePolicy,
    pub show_fps: bool,
}

/// Host run loop: poll SDL events into the input state, run one pump tick,
/// repeat until quit or halt. Everything runs on the main thread, so input
/// events only land between ticks and can never preempt one mid-execution.
pub fn run(handle: &mut SimulatorHandle, bindings: KeyBindings, options: Options) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let (width, height) = handle.frame_size();
    let title = format!("Cabinet - {}", handle.name());
    let mut video = Video::new(&sdl_video, &title, width, height, options.scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    let mut input = InputState::new();
    let mut pump = RenderPump::new((width, height), bindings, options.policy);

    let mut fps_window = Instant::now();
    let mut fps_ticks = 0u32;

    'main: loop {
        // Poll all pending SDL events, translate to engine key codes
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::F12),
                    repeat: false,
                    ..
                } => video.request_screenshot(),

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if let Some(code) = events::key_code(sc) {
                        input.engage(code);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(code) = events::key_code(sc) {
                        input.release(code);
                    }
                }

                _ => {}
            }
        }

        if options.show_fps {
            fps_ticks += 1;
            let elapsed = fps_window.elapsed();
            if elapsed.as_millis() >= 500 {
                let fps = fps_ticks as f64 / elapsed.as_secs_f64();
                video.set_fps_text(Some(format!("{fps:.1}")));
                fps_window = Instant::now();
                fps_ticks = 0;
            }
        }

        // One tick per loop pass; the vsync present inside the blit keeps
        // this at display refresh rate.
        match pump.tick(&mut video, handle, &input) {
            PumpStatus::Continue => {}
            PumpStatus::Halted => break 'main,
        }
    }

    log::info!("stopped after {} ticks", pump.ticks());
}
