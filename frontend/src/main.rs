use cabinet_core::pump::FailurePolicy;
use cabinet_core::simulator::SimulatorHandle;
use cabinet_simulators::registry;
use clap::Parser;

mod config;
mod events;
mod overlay;
mod runner;
mod screenshot;
mod video;

/// Run a simulator in an SDL window.
#[derive(Parser)]
#[command(name = "cabinet")]
struct Args {
    /// Simulator to run (see --list).
    simulator: Option<String>,

    /// Integer window scale factor.
    #[arg(long)]
    scale: Option<u32>,

    /// Seed for simulators that carry randomness.
    #[arg(long)]
    seed: Option<u32>,

    /// List the available simulators and exit.
    #[arg(long)]
    list: bool,

    /// Stop on the first simulator error instead of skipping the frame.
    #[arg(long)]
    halt_on_error: bool,

    /// Draw a frames-per-second overlay.
    #[arg(long)]
    fps: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for entry in registry::all() {
            println!("{}", entry.name);
        }
        return;
    }

    // CLI flags win over the config file, the file over defaults.
    let file = config::load();
    let Some(name) = args.simulator.or(file.simulator.clone()) else {
        eprintln!("Usage: cabinet <simulator> [--scale N] [--seed N] [--fps]");
        eprintln!("Available: {}", available_names().join(", "));
        std::process::exit(2);
    };
    let scale = args.scale.or(file.scale).unwrap_or(3);

    let mut simulator = registry::create(&name).unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("Available: {}", available_names().join(", "));
        std::process::exit(1);
    });
    if let Some(seed) = args.seed {
        simulator.reset_seed(seed);
    }
    let mut handle = SimulatorHandle::new(simulator);

    let mut bindings = events::default_host_bindings();
    file.apply_keys(&mut bindings);

    let policy = if args.halt_on_error {
        FailurePolicy::Halt
    } else {
        FailurePolicy::SkipFrame
    };

    let (width, height) = handle.frame_size();
    log::info!("running {} at {width}x{height}, scale {scale}", handle.name());

    runner::run(
        &mut handle,
        bindings,
        runner::Options {
            scale,
            policy,
            show_fps: args.fps,
        },
    );
}

fn available_names() -> Vec<&'static str> {
    registry::all().iter().map(|e| e.name).collect()
}
