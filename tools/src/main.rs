//! amida-runner: headless host for the ghost-leg lottery.
//!
//! Usage:
//!   amida-runner --seed 12345 --rounds 3
//!   amida-runner --config data/default_game.json --names Aki,Ren,Yui --columns 3
//!   amida-runner --seed 12345 --ipc-mode

use amida_core::{
    config::GameConfig,
    event::RoundEvent,
    session::Session,
    sink::{Frame, RenderSink, ResultsSink, RoundResults},
    snapshot::RoundSnapshot,
};
use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Start,
    Step { count: u64 },
    GetState,
    Reset,
    Quit,
}

#[derive(serde::Serialize)]
struct IpcState<'a> {
    rounds_started: u64,
    round: Option<RoundSnapshot>,
    events: &'a [RoundEvent],
}

/// Logs every Nth frame at trace level.
struct TraceRender {
    every: u64,
}

impl RenderSink for TraceRender {
    fn render(&mut self, frame: &Frame<'_>) {
        if self.every == 0 || frame.tick % self.every != 0 {
            return;
        }
        let positions: Vec<String> = frame
            .tokens
            .iter()
            .map(|t| format!("{}@({:.0},{:.0})", t.name, t.x, t.y))
            .collect();
        log::trace!("tick {}: {}", frame.tick, positions.join(" "));
    }
}

/// Prints the results table to stdout.
struct StdoutResults;

impl ResultsSink for StdoutResults {
    fn publish(&mut self, results: &RoundResults) {
        println!("=== RESULTS ({} ticks) ===", results.ticks);
        for p in &results.placements {
            println!(
                "  exit {:>2} [{:>3}]  {}  (entered on {})",
                p.final_column, p.exit_label, p.participant, p.entry_column
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let rounds = parse_arg(&args, "--rounds", 1u64);
    let trace_every = parse_arg(&args, "--trace-every", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match string_arg(&args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(names) = string_arg(&args, "--names") {
        config.participants = names.split(',').map(str::to_string).collect();
        config.columns = config.participants.len();
    }
    config.columns = parse_arg(&args, "--columns", config.columns);

    let mut session = Session::new(config, seed)?;

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        let config = session.config();
        println!("Amidakuji: amida-runner");
        println!("  seed:      {seed}");
        println!("  columns:   {}", config.columns);
        println!("  rounds:    {rounds}");
        println!("  policy:    {:?}", config.separation_policy);
        println!();

        let mut render = TraceRender { every: trace_every };
        for n in 0..rounds {
            if n > 0 {
                session.reset();
                println!();
            }
            let results = session.run_round(&mut render, &mut StdoutResults)?;
            if let Some(round) = session.round() {
                print_summary(round.ladder().len(), round.tick_budget(), &results);
            }
        }
    }

    Ok(())
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let mut events = Vec::new();
        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Start => {
                session.start()?;
            }
            IpcCommand::Reset => session.reset(),
            IpcCommand::GetState => {}
            IpcCommand::Step { count } => match session.round_mut() {
                Some(round) => {
                    for _ in 0..count {
                        let outcome = round.step();
                        events.extend(outcome.events);
                        if outcome.all_finished {
                            break;
                        }
                    }
                }
                None => {
                    let err_json = serde_json::json!({ "error": "no round in progress" });
                    writeln!(stdout, "{}", err_json)?;
                    stdout.flush()?;
                    continue;
                }
            },
        }

        let state = IpcState {
            rounds_started: session.rounds_started(),
            round: session.round().map(RoundSnapshot::of),
            events: &events,
        };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(rungs: usize, budget: u64, results: &RoundResults) {
    println!("=== ROUND SUMMARY ===");
    println!("  rungs:      {rungs}");
    println!("  ticks run:  {}", results.ticks);
    println!("  tick bound: {budget}");
    println!("  mapping:    {:?}", results.exit_columns());
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
