//! Rill CLI
//!
//! Classify, transpile, and run rill/trill source from a file or stdin.

use std::io::Read as _;

use rill_console::Severity;
use rill_runner::{RunResult, Runner};
use rill_transpile::Compiler;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: rill run <file|-> [--json]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --json    Emit the run result as JSON instead of tagged lines");
                std::process::exit(1);
            }

            let mut json_mode = false;
            let mut input = None;

            for arg in args.iter().skip(2) {
                if arg == "--json" {
                    json_mode = true;
                } else if input.is_none() {
                    input = Some(arg.as_str());
                }
            }

            let Some(input) = input else {
                eprintln!("error: missing input");
                eprintln!("Usage: rill run <file|-> [--json]");
                std::process::exit(1);
            };

            run_source(&read_input(input), json_mode);
        }
        "classify" => {
            if args.len() < 3 {
                eprintln!("Usage: rill classify <file|->");
                std::process::exit(1);
            }
            let detected = rill_classify::classify(&read_input(&args[2]));
            println!("{detected}");
        }
        "transpile" => {
            if args.len() < 3 {
                eprintln!("Usage: rill transpile <file|->");
                std::process::exit(1);
            }
            let source = read_input(&args[2]);
            let compiler = Compiler::default();
            if let Err(err) = compiler.ensure_ready() {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
            match compiler.transpile(&source) {
                Ok(plain) => print!("{plain}"),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("rill {}", env!("CARGO_PKG_VERSION"));
        }
        command => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run_source(source: &str, json_mode: bool) {
    // Warm the compiler up front so a trill run does not pay for
    // initialization; when this fails the runner retries lazily and
    // reports through the output lines.
    let compiler = Compiler::default();
    if let Err(err) = compiler.ensure_ready() {
        tracing::warn!(error = %err, "eager compiler initialization failed");
    }

    let runner = Runner::new(compiler);
    runner.set_source(source);
    let report = runner.run();
    let lines = runner.buffer().lines();

    if json_mode {
        let result = RunResult::new(&report, &lines);
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize result: {err}");
                std::process::exit(1);
            }
        }
    } else {
        for line in &lines {
            match line.severity {
                Severity::Info => println!("{}", line.text),
                Severity::Warning => eprintln!("warning: {}", line.text),
                Severity::Error => eprintln!("error: {}", line.text),
            }
        }
    }

    if !report.success() {
        std::process::exit(1);
    }
}

/// Read a source argument: a file path, or stdin for `-`.
fn read_input(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        if let Err(err) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("error: failed to read stdin: {err}");
            std::process::exit(1);
        }
        return source;
    }
    match std::fs::read_to_string(input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: failed to read {input}: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Rill Code Runner");
    println!();
    println!("Usage: rill <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file|->        Detect the dialect, transpile if typed, and execute");
    println!("  classify <file|->   Print the detected dialect (RILL or TRILL)");
    println!("  transpile <file|->  Strip trill type syntax and print plain rill");
    println!("  help                Show this help message");
    println!("  version             Show version information");
    println!();
    println!("Run options:");
    println!("  --json              Emit the run result as JSON");
    println!();
    println!("Examples:");
    println!("  rill run script.rl");
    println!("  echo \"console.log('hi')\" | rill run -");
    println!("  rill run typed.trl --json");
    println!("  rill transpile typed.trl");
}
