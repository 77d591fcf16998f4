//! Gomoji CLI
//!
//! Usage:
//!   gomoji                                     # Interactive: commands from stdin
//!   gomoji --script demo.txt                   # Play a scenario script in real time
//!   gomoji --script demo.txt --fast --json     # Virtual time, JSON frames
//!   gomoji --deny-motion                       # Refuse the motion sensor prompt
//!
//! Commands: tap [n] | wait <ms> | accel <x> <y> <z> | orient <a> <b> <g>
//!           | shake | sensing on|off | quit

use clap::Parser;
use log::{error, LevelFilter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration, MissedTickBehavior};

use gomoji::config::FaceConfig;
use gomoji::core::audio::{self, BankPlayer};
use gomoji::core::script::{self, Command};
use gomoji::core::{
    launch, DeniedGate, FaceEngine, GrantedGate, PermissionGate, RandomSource, TerminalRenderer,
    StdRandom,
};
use gomoji::types::IdleMode;
use gomoji::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "gomoji",
    version = VERSION,
    about = "Gomoji - an interactive friend in your terminal",
    long_about = "Gomoji drives the expression engine of a virtual pet face.\n\n\
                  Taps:\n  \
                  1-2 taps   squint, shake, happy\n  \
                  3 taps     growing smile\n  \
                  4 taps     angry\n\n\
                  Motion:\n  \
                  shake      dizzy, then angry\n  \
                  move       squint\n  \
                  tilt       pupils follow\n\n\
                  Left alone it blinks, looks around, thinks, codes and gets bored."
)]
struct Args {
    /// Scenario script to play (default: read commands from stdin)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// TOML file overriding timings and thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible idle behaviour
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate a refused motion permission prompt
    #[arg(long)]
    deny_motion: bool,

    /// Output frames as JSON lines
    #[arg(short, long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Run scripts in virtual time without sleeping
    #[arg(long)]
    fast: bool,

    /// No terminal bell for sounds
    #[arg(short, long)]
    quiet: bool,

    /// Engine tick in milliseconds
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Keep running this long after the script ends (milliseconds)
    #[arg(long, default_value_t = 0)]
    duration_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => match FaceConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::from(2);
            }
        },
        None => FaceConfig::default(),
    };

    let commands = match &args.script {
        Some(path) => match load_script(path) {
            Ok(commands) => Some(commands),
            Err(message) => {
                eprintln!("{}", message);
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    let rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(StdRandom::seeded(seed)),
        None => Box::new(StdRandom::from_entropy()),
    };
    let player = BankPlayer::new(!args.quiet && !args.json);
    let mut engine = FaceEngine::new(config, rng, Box::new(player));

    let mut gate: Box<dyn PermissionGate> = if args.deny_motion {
        Box::new(DeniedGate)
    } else {
        Box::new(GrantedGate)
    };
    launch(&mut engine, gate.as_mut()).await;

    let mut out = Output::new(&args);
    out.flush(&mut engine);

    match commands {
        Some(commands) => run_script(&mut engine, commands, &args, &mut out).await,
        None => run_interactive(&mut engine, &args, &mut out).await,
    }

    engine.stop();
    out.flush(&mut engine);
    audio::shutdown();
    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_script(path: &Path) -> Result<Vec<Command>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    script::parse_script(&text).map_err(|e| e.to_string())
}

/// Play a parsed script, then idle for `--duration-ms`
async fn run_script(engine: &mut FaceEngine, commands: Vec<Command>, args: &Args, out: &mut Output) {
    for command in commands {
        match command {
            Command::Wait(ms) => wait(engine, ms, args, out).await,
            other => {
                script::apply(engine, other);
                out.flush(engine);
            }
        }
    }
    if args.duration_ms > 0 {
        wait(engine, args.duration_ms, args, out).await;
    }
}

/// Advance `ms` of engine time, in real time unless `--fast`
async fn wait(engine: &mut FaceEngine, ms: u64, args: &Args, out: &mut Output) {
    if args.fast {
        engine.advance(ms);
        out.flush(engine);
        return;
    }
    let tick = args.tick_ms.max(1);
    let mut ticker = interval(Duration::from_millis(tick));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let mut remaining = ms;
    while remaining > 0 {
        ticker.tick().await;
        let step = tick.min(remaining);
        engine.advance(step);
        remaining -= step;
        out.flush(engine);
        out.redraw_coding(engine);
    }
}

/// Real-time loop: engine ticks while commands arrive on stdin
async fn run_interactive(engine: &mut FaceEngine, args: &Args, out: &mut Output) {
    println!("Gomoji v{} - type commands, 'quit' to exit.", VERSION);
    println!("tap [n] | wait <ms> | accel x y z | orient a b g | shake | sensing on|off");

    let tick = args.tick_ms.max(1);
    let mut ticker = interval(Duration::from_millis(tick));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.advance(tick);
                out.flush(engine);
                out.redraw_coding(engine);
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("stdin: {}", e);
                        break;
                    }
                };
                line_no += 1;
                let trimmed = line.trim();
                if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
                    break;
                }
                match script::parse_line(trimmed, line_no) {
                    Ok(Some(Command::Wait(ms))) => engine.advance(ms),
                    Ok(Some(command)) => script::apply(engine, command),
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
                out.flush(engine);
            }
        }
    }
    println!("\nBye. Ran for {:.1}s.", engine.now_ms() as f64 / 1000.0);
}

/// Prints frames the way the flags ask for
struct Output {
    renderer: TerminalRenderer,
    json: bool,
    plain: bool,
    coding_redraw_at: u64,
}

/// Coding screen redraw period while it types
const CODING_REDRAW_MS: u64 = 1000;

impl Output {
    fn new(args: &Args) -> Self {
        Self {
            renderer: TerminalRenderer::new(!args.no_color),
            json: args.json,
            plain: args.no_color,
            coding_redraw_at: 0,
        }
    }

    fn flush(&mut self, engine: &mut FaceEngine) {
        for frame in engine.drain_frames() {
            if self.json {
                match serde_json::to_string(&frame) {
                    Ok(line) => println!("{}", line),
                    Err(e) => error!("frame serialization failed: {}", e),
                }
            } else if self.plain {
                println!("{}", frame.to_parseable_string());
            } else {
                println!("{}", self.renderer.render(&frame));
                println!("{}", frame.to_terminal_string());
            }
            self.coding_redraw_at = frame.at_ms + CODING_REDRAW_MS;
        }
    }

    /// The coding screen types over time, so redraw it now and then
    fn redraw_coding(&mut self, engine: &FaceEngine) {
        if self.json || self.plain || engine.idle_mode() != IdleMode::Coding {
            return;
        }
        if engine.now_ms() >= self.coding_redraw_at {
            println!("{}", self.renderer.render(&engine.frame()));
            self.coding_redraw_at = engine.now_ms() + CODING_REDRAW_MS;
        }
    }
}
