//! Paging Simulator - Main Entry Point
//!
//! Usage: paging-sim [OPTIONS]
//!
//! Options:
//!   -p, --page-size <bytes>     Page size in bytes (default 4096)
//!   -m, --memory-size <bytes>   Physical memory size in bytes (default 16384)
//!   -n, --processes <count>     Number of processes to create (default 3)
//!   -s, --process-size <bytes>  Size of each process (default 16384)
//!       --policy <id>           Run only one policy (0 = oldest-load, else random)
//!   -v, --verbose               Print a line per translated address
//!   -h, --help                  Print help information

use std::env;
use std::error::Error;
use std::process;

use paging_sim::simulator::{AccessKind, Simulator, TraceEvent};
use paging_sim::{Pid, Policy};

/// Command-line configuration
struct Config {
    page_size: usize,
    memory_size: usize,
    num_processes: usize,
    process_size: usize,
    policy: Option<u32>,
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_size: 4096,
            memory_size: 16384,
            num_processes: 3,
            process_size: 16384,
            policy: None,
            verbose: false,
        }
    }
}

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_help(program: &str) {
    eprintln!("Paging Simulator - demand-paged address translation over a shared frame pool");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --page-size <bytes>     Page size in bytes (default 4096)");
    eprintln!("  -m, --memory-size <bytes>   Physical memory size in bytes (default 16384)");
    eprintln!("  -n, --processes <count>     Number of processes to create (default 3)");
    eprintln!("  -s, --process-size <bytes>  Size of each process (default 16384)");
    eprintln!("      --policy <id>           Run only one policy (0 = oldest-load, else random)");
    eprintln!("  -v, --verbose               Print a line per translated address");
    eprintln!("  -h, --help                  Print this help message");
    eprintln!();
    eprintln!("With no --policy, the same workload runs once under the oldest-load");
    eprintln!("policy and once under the random policy, with a reset in between.");
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];

    let mut config = Config::default();
    let mut iter = args[1..].iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "-v" | "--verbose" => {
                config.verbose = true;
            }
            "-p" | "--page-size" => {
                config.page_size = parse_value(arg, iter.next())?;
            }
            "-m" | "--memory-size" => {
                config.memory_size = parse_value(arg, iter.next())?;
            }
            "-n" | "--processes" => {
                config.num_processes = parse_value(arg, iter.next())?;
            }
            "-s" | "--process-size" => {
                config.process_size = parse_value(arg, iter.next())?;
            }
            "--policy" => {
                config.policy = Some(parse_value(arg, iter.next())?);
            }
            _ => {
                return Err(format!(
                    "Unknown option: {}\nUse --help for usage information.",
                    arg
                ));
            }
        }
    }

    Ok(config)
}

fn parse_value<T: std::str::FromStr>(option: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Option {} requires a value", option))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", option, value))
}

fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut sim = Simulator::new(config.page_size, config.memory_size)?;

    println!("Paging Simulator");
    println!(
        "Page size: {} bytes, physical memory: {} bytes ({} frames)",
        sim.page_size(),
        sim.physical_memory_size(),
        sim.num_frames()
    );

    for _ in 0..config.num_processes {
        sim.create_process(config.process_size)?;
    }
    let pages_each = config.process_size.div_ceil(config.page_size);
    println!(
        "Created {} processes, each with {} pages",
        config.num_processes, pages_each
    );

    let accesses = workload(&sim);

    match config.policy {
        Some(id) => {
            run_policy(&mut sim, Policy::from_id(id), &accesses, config.verbose);
        }
        None => {
            run_policy(&mut sim, Policy::OldestLoad, &accesses, config.verbose);
            sim.reset();
            run_policy(&mut sim, Policy::Random, &accesses, config.verbose);
        }
    }

    Ok(())
}

/// A deterministic demonstration workload: every process sweeps its pages in
/// order, then revisits its first page.
fn workload(sim: &Simulator) -> Vec<(Pid, usize)> {
    let page_size = sim.page_size();
    let mut accesses = Vec::new();
    for process in sim.processes() {
        for page in 0..process.num_pages() {
            accesses.push((process.pid(), page * page_size));
        }
        accesses.push((process.pid(), 0));
    }
    accesses
}

fn run_policy(sim: &mut Simulator, policy: Policy, accesses: &[(Pid, usize)], verbose: bool) {
    sim.set_policy(policy);
    println!();
    println!("Running simulation with {} replacement...", policy);

    for &(pid, va) in accesses {
        match sim.translate(pid, va) {
            Ok(_) => {}
            Err(fault) => println!("  fault: {}", fault),
        }
    }

    if verbose {
        for event in sim.take_trace() {
            print_event(&event);
        }
    }

    print_frames(sim);
    print_stats(sim);
}

fn print_event(event: &TraceEvent) {
    let tag = match event.kind {
        AccessKind::Hit => "",
        AccessKind::ColdFault => " [page fault]",
        AccessKind::CapacityFault => " [page fault, eviction]",
    };
    println!(
        "  t={:<3} P{} VA {:>6} -> page {} frame {} PA {:>6}{}",
        event.time, event.pid, event.virtual_address, event.page, event.frame,
        event.physical_address, tag
    );
}

fn print_frames(sim: &Simulator) {
    println!("Physical memory:");
    for (index, occupant) in sim.snapshot_frames().iter().enumerate() {
        match occupant {
            Some(page_ref) => println!("  frame {:2}: {}", index, page_ref),
            None => println!("  frame {:2}: free", index),
        }
    }
}

fn print_stats(sim: &Simulator) {
    let stats = sim.snapshot_stats();
    println!(
        "Accesses: {}, page faults: {}, fault rate: {:.2}%",
        stats.total_accesses, stats.total_faults, stats.fault_rate
    );
}
