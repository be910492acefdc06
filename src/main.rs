//! fasmeter CLI
//!
//! Usage:
//!   fasmeter --text "your text here" --dict dict.json     # Single evaluation
//!   fasmeter --interactive --dict dict.json               # One conversation, line by line
//!   fasmeter --serve --dict dict.json                     # HTTP API server
//!   fasmeter --text "text" --json                         # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

use fasmeter::core::{run_server, AppState, Dictionary, FasEngine, HourSource};
use fasmeter::types::{FasResult, Settings};
use fasmeter::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "fasmeter",
    version = VERSION,
    about = "Score messages for affect risk - smoothed FAS, indices and decision mode",
    long_about = "fasmeter scores each incoming message of a conversation against a\n\
                  lexical dictionary and publishes a smoothed risk/affect score (FAS)\n\
                  in [0, 1], four secondary indices (CUS, RIS, EIS, SSS) and a\n\
                  decision mode.\n\n\
                  Modes:\n  \
                  --text         Single evaluation\n  \
                  --interactive  One conversation, one message per line\n  \
                  --serve        HTTP API server (one engine per session)\n\n\
                  FAS zones:\n  \
                  Critical  >= 0.85\n  \
                  High      >= 0.68\n  \
                  Medium    >= 0.50\n  \
                  Low        < 0.50"
)]
struct Args {
    /// Text to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read messages from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Lexical dictionary (JSON: cluster array or {"clusters": [...]})
    #[arg(short, long)]
    dict: Option<String>,

    /// Settings file (JSON: {"weights": {...}, "engine": {...}})
    #[arg(short, long)]
    config: Option<String>,

    /// Force the local hour (0-23) instead of reading the clock
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show feature, index and hit breakdown
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let settings = match &args.config {
        Some(path) => Settings::load(path).unwrap_or_else(|e| fail(e)),
        None => Settings::default(),
    };
    let dictionary = args
        .dict
        .as_ref()
        .map(|path| Dictionary::load(path).unwrap_or_else(|e| fail(e)));
    let hour_source = args.hour.map_or(HourSource::Local, HourSource::Fixed);

    if args.serve {
        run_serve(&args, dictionary, settings, hour_source).await;
        return;
    }

    let mut engine = FasEngine::with_settings(settings)
        .unwrap_or_else(|e| fail(e))
        .with_hour_source(hour_source);

    if let Some(ref text) = args.text {
        let result = engine.compute(text, dictionary.as_ref());
        print_result(&result, &args);
    } else {
        run_interactive(&mut engine, dictionary.as_ref(), &args);
    }
}

fn fail<T>(e: impl std::fmt::Display) -> T {
    error!("{}", e);
    eprintln!("error: {}", e);
    process::exit(1);
}

/// Read one message per line, scoring them as one conversation
fn run_interactive(engine: &mut FasEngine, dict: Option<&Dictionary>, args: &Args) {
    if !args.json {
        print_header();
        match dict {
            Some(d) => println!("Dictionary: {} clusters, {} patterns", d.len(), d.entry_count()),
            None => println!("No dictionary loaded - NEG will stay at 0"),
        }
        println!("Type a message and press Enter. Type 'quit' to exit.");
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if !args.json {
            print!("[FAS {:.3}] > ", engine.last_fas());
            let _ = stdout.flush();
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim_end_matches(['\n', '\r']);
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            if !args.json {
                println!("\nSession ended. Messages: {}", engine.update_count());
            }
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let result = engine.compute(line, dict);
        print_result(&result, args);
    }
}

fn print_result(result: &FasResult, args: &Args) {
    if args.json {
        match serde_json::to_string(result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("error: {}", e),
        }
    } else if args.verbose {
        print_verbose(result);
    } else {
        print_summary(result);
    }
}

fn print_header() {
    println!("{}", "========================================".bold());
    println!("{}", format!("  fasmeter v{}", VERSION).bold());
    println!("{}", "========================================".bold());
    println!();
}

fn print_summary(result: &FasResult) {
    let line = result.to_parseable_string();
    println!("{}", line.color(result.fas_zone.color_name()));
}

fn print_verbose(result: &FasResult) {
    let color = result.fas_zone.color_name();
    let rule = "----------------------------------------";

    println!("{}", rule.color(color));
    println!(
        "{}",
        format!(
            "FAS = {:.4}  (core {:.4} + RUB {:.2} + NB {:.2}){}",
            result.fas,
            result.core,
            result.rub,
            result.nb,
            if result.debounced { "  [repeat]" } else { "" }
        )
        .color(color)
        .bold()
    );
    println!("mode = {} | FAS zone = {} | CUS zone = {}", result.mode, result.fas_zone, result.cus_zone);
    println!("{}", rule.color(color));
    println!("Features (Mi):");
    for (key, value) in result.mi.iter() {
        println!("  {:<22} {:.4}", key.name(), value);
    }
    println!("{}", rule.color(color));
    println!(
        "Indices: CUS {:.4} | RIS {:.4} | EIS {:.4} | SSS {:.4}",
        result.indices.cus, result.indices.ris, result.indices.eis, result.indices.sss
    );
    println!(
        "NEG: score {:.4} | physio {:.2} | crisis {:.2}",
        result.neg.score, result.neg.physio, result.neg.crisis
    );
    for hit in &result.neg.hits {
        println!(
            "  [{}] {} x{} (w={:.2}, +{:.3})",
            hit.tag, hit.entry, hit.count, hit.weight, hit.contribution
        );
    }
    println!("{}", rule.color(color));
}

/// Run HTTP API server
async fn run_serve(args: &Args, dictionary: Option<Dictionary>, settings: Settings, hour_source: HourSource) {
    println!();
    println!("{}", format!("fasmeter API server v{}", VERSION).bold());
    println!();

    let state = AppState::new(dictionary, settings, hour_source);
    if let Err(e) = run_server(&args.addr, state).await {
        eprintln!("Server error: {}", e);
        process::exit(1);
    }
}
