//! Serial decoder test bench CLI.
//!
//! This binary provides two entry points:
//! 1. **Run:** Simulate a device with the console (or a replayed input file) bridged
//!    into its serial FIFO handshake, recording a VCD trace.
//! 2. **Packet:** Compute a synthesizer multiplier/divider for a target frequency and
//!    print the framed packet to send to the decoder.
//!
//! Stdout carries only device output, so logs and statistics go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use serial_bench_core::config::Config;
use serial_bench_core::console::{ByteSource, ConsoleSource, RawTerminal, ScriptedSource};
use serial_bench_core::dut::{Dut, FrameDecoderDut, LoopbackDut};
use serial_bench_core::protocol::{
    DEFAULT_TOLERANCE_HZ, DEFAULT_XTAL_HZ, find_multiplier_divider, frequency_packet,
};
use serial_bench_core::{BenchError, RunOutcome, Testbench, trace};

#[derive(Parser, Debug)]
#[command(
    name = "serial-bench",
    author,
    version,
    about = "Cycle-driven test bench for a serial decoder",
    long_about = "Bridge the console into a simulated serial decoder's FIFO handshake, or build \
                  synthesizer packets for it.\n\nExamples:\n  serial-bench run\n  serial-bench run \
                  --dut loopback --max-time 20000 --input script.txt\n  serial-bench packet 48e6"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a device with the console attached to its serial port.
    Run {
        /// JSON configuration file; built-in defaults otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Device model to simulate.
        #[arg(long, value_enum, default_value_t = DutKind::FrameDecoder)]
        dut: DutKind,

        /// VCD trace output path.
        #[arg(long, conflicts_with = "no_trace")]
        trace: Option<String>,

        /// Disable waveform tracing.
        #[arg(long)]
        no_trace: bool,

        /// Time units reset is held low.
        #[arg(long)]
        reset_ticks: Option<u64>,

        /// Stop once simulated time reaches this value.
        #[arg(long)]
        max_time: Option<u64>,

        /// Refill with whole prompted lines.
        #[arg(long)]
        line_mode: bool,

        /// Put an interactive terminal into raw (byte-at-a-time, no echo) mode.
        #[arg(long)]
        raw: bool,

        /// Replay this file instead of reading stdin; stops once it has been consumed.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the synthesizer packet for a target frequency.
    Packet {
        /// Target frequency in hertz (e.g. `48e6`).
        freq: f64,

        /// Reference crystal frequency in hertz.
        #[arg(long, default_value_t = DEFAULT_XTAL_HZ)]
        xtal: f64,

        /// Acceptable error in hertz.
        #[arg(long, default_value_t = DEFAULT_TOLERANCE_HZ)]
        tolerance: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DutKind {
    /// Echo every received byte.
    Loopback,
    /// Decode `$payload#cc` frames and acknowledge them.
    FrameDecoder,
}

/// Options from `run` that override the configuration file.
struct RunArgs {
    config: Option<PathBuf>,
    dut: DutKind,
    trace: Option<String>,
    no_trace: bool,
    reset_ticks: Option<u64>,
    max_time: Option<u64>,
    line_mode: bool,
    raw: bool,
    input: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            dut,
            trace,
            no_trace,
            reset_ticks,
            max_time,
            line_mode,
            raw,
            input,
        } => cmd_run(RunArgs {
            config,
            dut,
            trace,
            no_trace,
            reset_ticks,
            max_time,
            line_mode,
            raw,
            input,
        }),
        Commands::Packet {
            freq,
            xtal,
            tolerance,
        } => cmd_packet(freq, xtal, tolerance),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Merges the configuration file with command-line overrides.
fn load_config(args: &RunArgs) -> Result<Config, BenchError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(path) = &args.trace {
        config.trace.path.clone_from(path);
        config.trace.enabled = true;
    }
    if args.no_trace {
        config.trace.enabled = false;
    }
    if let Some(ticks) = args.reset_ticks {
        config.clock.reset_ticks = ticks;
    }
    if args.max_time.is_some() {
        config.run.max_time = args.max_time;
    }
    config.console.line_mode |= args.line_mode;
    config.console.raw_terminal |= args.raw;
    if args.input.is_some() {
        config.run.stop_when_drained = true;
    }
    config.validate()?;
    Ok(config)
}

/// Builds the bench from the selected device and source, runs it, and reports.
fn cmd_run(args: RunArgs) -> Result<(), BenchError> {
    let config = load_config(&args)?;

    let dut: Box<dyn Dut> = match args.dut {
        DutKind::Loopback => Box::new(LoopbackDut::new()),
        DutKind::FrameDecoder => Box::new(FrameDecoderDut::new()),
    };

    let source: Box<dyn ByteSource> = match &args.input {
        Some(path) => Box::new(ScriptedSource::from_file(path).map_err(|source| {
            BenchError::InputRead {
                path: path.clone(),
                source,
            }
        })?),
        None => Box::new(ConsoleSource::stdin()),
    };

    let _raw_guard = if config.console.raw_terminal && args.input.is_none() {
        match RawTerminal::enable() {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!(error = %e, "could not enable raw terminal mode");
                None
            }
        }
    } else {
        None
    };

    let sink = trace::open(&config.trace)?;
    let mut bench = Testbench::new(dut, source, io::stdout(), sink, &config);

    let outcome = bench.run()?;
    let (_, _, stats) = bench.finish()?;

    let mut stderr = io::stderr().lock();
    let reason = match outcome {
        RunOutcome::Finished => "device finished",
        RunOutcome::TimeLimit => "time limit reached",
        RunOutcome::InputDrained => "input drained",
    };
    let _ = writeln!(stderr, "\n[*] Simulation stopped: {reason}");
    let _ = writeln!(stderr, "{stats}");
    Ok(())
}

/// Prints the chosen `(M, D)`, the resulting frequency, and the packet.
fn cmd_packet(freq: f64, xtal: f64, tolerance: f64) -> Result<(), BenchError> {
    println!("Calculating for frequency {freq}");
    let Some(setting) = find_multiplier_divider(freq, xtal, tolerance) else {
        println!("Could not calculate a frequency for: {freq}");
        process::exit(1);
    };
    println!("Using M = {} D = {}", setting.multiplier, setting.divider);
    println!("Actual frequency {}", setting.frequency(xtal));
    println!("{}", frequency_packet(setting.multiplier, setting.divider)?);
    Ok(())
}
