//! arena-run: batch skirmish runner.
//!
//! Runs seeded micro-arena battles through the full decision core and
//! writes one JSON outcome record per line — the raw material for training
//! or validating a learned combat oracle.
//!
//! Usage:
//!   arena-run batch --seeds 50 [--base-seed 42] [--out results.jsonl]
//!   arena-run single --seed 7

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;

use tracing_subscriber::EnvFilter;

use vanguard_tactics::skirmish::{run_arena, ArenaConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "batch" => cmd_batch(&args[2..]),
        "single" => cmd_single(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "arena-run: VANGUARD skirmish batch runner\n\
         \n\
         Commands:\n\
         \n\
         batch     Run a batch of seeded arenas and emit JSON-lines records\n\
         \n\
           --seeds <N>       Number of arenas to run (default: 20)\n\
           --base-seed <N>   First seed; arenas use base..base+N (default: 42)\n\
           --out <path>      Write records to a file instead of stdout\n\
         \n\
         single    Run one arena and print its record\n\
         \n\
           --seed <N>        Arena seed (default: 42)\n\
         \n\
         Examples:\n\
         \n\
           arena-run batch --seeds 100 --out data/arena.jsonl\n\
           arena-run single --seed 7\n"
    );
}

fn cmd_batch(args: &[String]) {
    let seeds = flag_value(args, "--seeds").unwrap_or(20);
    let base_seed = flag_value(args, "--base-seed").unwrap_or(42);
    let out_path = flag_str(args, "--out");

    let mut sink: Box<dyn Write> = match out_path {
        Some(path) => match File::create(&path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(err) => {
                eprintln!("Cannot create {path}: {err}");
                process::exit(1);
            }
        },
        None => Box::new(std::io::stdout()),
    };

    let mut victories = 0u64;
    for i in 0..seeds {
        let config = ArenaConfig {
            seed: base_seed + i,
            ..Default::default()
        };
        let result = run_arena(&config);
        if result.victory {
            victories += 1;
        }
        match serde_json::to_string(&result) {
            Ok(line) => {
                if writeln!(sink, "{line}").is_err() {
                    eprintln!("Write failed, aborting");
                    process::exit(1);
                }
            }
            Err(err) => {
                eprintln!("Serialization failed: {err}");
                process::exit(1);
            }
        }
        tracing::debug!(seed = config.seed, victory = result.victory, "arena done");
    }

    eprintln!(
        "{seeds} arenas, {victories} victories ({:.1}%)",
        victories as f64 / seeds as f64 * 100.0
    );
}

fn cmd_single(args: &[String]) {
    let seed = flag_value(args, "--seed").unwrap_or(42);
    let config = ArenaConfig {
        seed,
        ..Default::default()
    };
    let result = run_arena(&config);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Serialization failed: {err}");
            process::exit(1);
        }
    }
}

/// Parse `--flag <u64>` from the argument list.
fn flag_value(args: &[String], flag: &str) -> Option<u64> {
    flag_str(args, flag).and_then(|v| v.parse().ok())
}

fn flag_str(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
