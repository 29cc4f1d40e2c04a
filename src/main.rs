use clap::Parser;

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use rust_nbody::file::read_file;
use rust_nbody::gui::{NullCanvas, PlotCanvas, WindowCanvas};
use rust_nbody::model::{SimulationConfig, Simulator};

const DEFAULT_INPUT: &str = "data/planets.txt";
const WINDOW_SIZE: u32 = 800;
const PLOT_SIZE: u32 = 1024;

/// Simulates a handful of bodies under Newtonian gravity and prints where they
/// end up.
#[derive(Debug, Parser)]
struct Args {
    /// Total simulated time, in seconds
    total_time: Option<f64>,
    /// Length of one step, in seconds
    timestep: Option<f64>,
    /// File with the initial conditions
    input: Option<PathBuf>,

    /// Animate the run in a window
    #[arg(long, conflicts_with = "plot")]
    window: bool,
    /// Write every body's trajectory to this PNG
    #[arg(long, value_name = "PNG")]
    plot: Option<PathBuf>,
    /// Pause after each drawn frame, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 10)]
    frame_delay: u64,
}

impl Args {
    // Either all three positionals are given, or none of them are used.
    fn resolve(&self) -> (SimulationConfig, PathBuf) {
        let defaults = SimulationConfig {
            frame_delay: Duration::from_millis(self.frame_delay),
            ..SimulationConfig::default()
        };

        match (self.total_time, self.timestep, &self.input) {
            (Some(total_time), Some(timestep), Some(input)) => (
                SimulationConfig {
                    total_time,
                    timestep,
                    ..defaults
                },
                input.clone(),
            ),
            (None, None, None) => (defaults, PathBuf::from(DEFAULT_INPUT)),
            _ => {
                tracing::warn!(
                    "need TOTAL_TIME, TIMESTEP and INPUT together; falling back to defaults"
                );
                (defaults, PathBuf::from(DEFAULT_INPUT))
            }
        }
    }
}

fn check_config(config: &SimulationConfig) -> Result<(), String> {
    if !(config.timestep > 0.0 && config.timestep.is_finite()) {
        return Err(format!("timestep must be positive, got {}", config.timestep));
    }
    if !(config.total_time >= 0.0 && config.total_time.is_finite()) {
        return Err(format!(
            "total time must be non-negative, got {}",
            config.total_time
        ));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr; stdout is reserved for the final report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let (config, input) = args.resolve();
    check_config(&config)?;

    let universe = read_file(&input)?;
    let mut simulator = Simulator::new(universe, config);

    if args.window {
        let mut canvas = WindowCanvas::new("N-Body Simulation", WINDOW_SIZE);
        simulator.run(&mut canvas);
    } else if let Some(path) = &args.plot {
        let mut canvas = PlotCanvas::new(path, PLOT_SIZE);
        simulator.run(&mut canvas);
        canvas.save()?;
    } else {
        simulator.run(&mut NullCanvas);
    }

    print!("{}", simulator.report());
    Ok(())
}
