//! sign_view — interactive entry point.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use sign_view::app::run;
use sign_view::config::AppConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Sign Language Translator — Fingerspelling Demo        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Mode: simulated hand  (number keys pose it, see the legend)");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let config = if let Some(path) = flag_value(&args, "--config") {
        let path = PathBuf::from(path);
        println!("  Config: {}", path.display());
        AppConfig::load(&path)?
    } else if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: tuned defaults\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening translator window…");
    println!();

    run(config).map_err(|e| anyhow!(e))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn configure_interactively() -> AppConfig {
    let defaults = AppConfig::default();

    let classify_interval_ms: u64 = {
        let v = read_line("  Classification interval ms (default 100): ")
            .trim()
            .parse()
            .unwrap_or(defaults.classify_interval_ms);
        v.clamp(16, 2000)
    };

    let sim_latency_ms: u64 = read_line("  Simulated inference latency ms (default 30): ")
        .trim()
        .parse()
        .unwrap_or(defaults.sim_latency_ms)
        .min(1000);

    let sim_jitter_px: f32 = {
        let v = read_line("  Simulated hand wobble px (default 1.5): ")
            .trim()
            .parse()
            .unwrap_or(defaults.sim_jitter_px);
        v.clamp(0.0, 4.0)
    };

    let speech_command = read_line("  Speech command, blank to log only (e.g. espeak): ")
        .trim()
        .to_string();

    AppConfig {
        classify_interval_ms,
        sim_latency_ms,
        sim_jitter_px,
        speech_command,
        ..defaults
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
