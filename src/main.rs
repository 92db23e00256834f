//! Paging Simulator - Main Entry Point
//!
//! Usage: contiguous-paging-sim [OPTIONS] <script_file> [output_file]
//!
//! Arguments:
//!   script_file - Commands to run, one per line (register/load/access/memory/list/reset)
//!   output_file - File to write one result line per command (stdout if omitted)
//!
//! Options:
//!   -c, --capacity N       Frames in the physical pool
//!   -m, --max-processes N  Maximum number of registered processes
//!       --max-size N       Maximum pages per process
//!   -v, --verbose          Log every allocation and page access to stderr
//!   -h, --help             Print help information

use std::env;
use std::process;

use log::info;

use contiguous_paging_sim::commands::{execute_batch, CommandOutcome};
use contiguous_paging_sim::io::{write_outcomes, Script};
use contiguous_paging_sim::{logging, Config, MemoryState};

/// Command-line configuration
struct CliConfig {
    script_file: String,
    output_file: Option<String>,
    limits: Config,
    verbose: bool,
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    logging::init(config.verbose);

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_help(program: &str) {
    eprintln!("Paging Simulator - contiguous page allocation with per-process page tables");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS] <script_file> [output_file]", program);
    eprintln!();
    eprintln!("Script commands:");
    eprintln!("  register <name> <size>   Register a process of <size> pages");
    eprintln!("  load <name>              Allocate frames for every page of a process");
    eprintln!("  access <name> <page>     Look up one page (hit or fault)");
    eprintln!("  memory                   Show occupied frames");
    eprintln!("  list                     Show registered processes");
    eprintln!("  reset                    Clear all processes and frames");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --capacity N       Frames in the physical pool (default 200)");
    eprintln!("  -m, --max-processes N  Maximum registered processes (default 25)");
    eprintln!("      --max-size N       Maximum pages per process (default 500000)");
    eprintln!("  -v, --verbose          Log allocations and accesses to stderr");
    eprintln!("  -h, --help             Print this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} script.txt", program);
    eprintln!("  {} -v -c 10 script.txt results.txt", program);
}

fn parse_args() -> Result<CliConfig, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("contiguous-paging-sim");

    let mut verbose = false;
    let mut limits = Config::default();
    let mut positional: Vec<&String> = Vec::new();

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "-c" | "--capacity" => {
                limits.pool_capacity = option_value(arg, rest.next())?;
            }
            "-m" | "--max-processes" => {
                limits.max_processes = option_value(arg, rest.next())?;
            }
            "--max-size" => {
                limits.max_process_size = option_value(arg, rest.next())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}\nUse --help for usage information.", arg));
            }
            _ => {
                positional.push(arg);
            }
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        print_help(program);
        return Err(format!("\nError: Expected 1 or 2 arguments, got {}", positional.len()));
    }

    limits.validate()?;

    Ok(CliConfig {
        script_file: positional[0].clone(),
        output_file: positional.get(1).map(|s| s.to_string()),
        limits,
        verbose,
    })
}

fn option_value(option: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("Option {} requires a value", option))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", option, value))
}

/// Main logic separated from main() for cleaner error handling
fn run(config: &CliConfig) -> Result<(), String> {
    let script = Script::from_file(&config.script_file)?;
    let mut state = MemoryState::new(config.limits)?;

    info!(
        "running {} commands from {} (capacity {}, max {} processes)",
        script.commands.len(),
        config.script_file,
        state.capacity(),
        state.config().max_processes
    );

    let outcomes = execute_batch(&mut state, &script.commands);
    let lines: Vec<String> = outcomes.iter().map(CommandOutcome::render).collect();

    let failures = outcomes.iter().filter(|o| o.is_failure()).count();
    info!(
        "{} commands ok, {} failed, {}/{} frames used",
        outcomes.len() - failures,
        failures,
        state.used_frames(),
        state.capacity()
    );

    match &config.output_file {
        Some(path) => {
            write_outcomes(path, &lines)?;
            info!("results written to {}", path);
        }
        None => {
            for line in &lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
