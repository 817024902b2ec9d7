//! `qrca` - add two 4-bit numbers on a simulated quantum ripple-carry adder.

use clap::Parser;
use qrca::core::{DEFAULT_A, DEFAULT_B, MAX_OPERAND};
use qrca::{Nibble, QrcaError, Simulator, SimulatorConfig, build_adder_circuit, build_and_simulate_with, report};
use tracing::error;
use tracing_subscriber::EnvFilter;

const CHART_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "qrca")]
#[command(about = "4-Bit Quantum Ripple Carry Adder: add two 4-bit numbers using a quantum ripple carry structure")]
struct Args {
    /// 4-bit number A (clamped to 0-15)
    #[arg(short = 'a', long = "a", default_value_t = i64::from(DEFAULT_A), allow_negative_numbers = true)]
    a: i64,

    /// 4-bit number B (clamped to 0-15)
    #[arg(short = 'b', long = "b", default_value_t = i64::from(DEFAULT_B), allow_negative_numbers = true)]
    b: i64,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Do not draw the circuit diagram
    #[arg(long)]
    no_circuit: bool,

    /// Do not draw the bar chart
    #[arg(long)]
    no_chart: bool,

    /// Print the final basis state before measurement
    #[arg(long)]
    show_state: bool,

    /// Seed for measurement sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), QrcaError> {
    let a = Nibble::clamped(args.a);
    let b = Nibble::clamped(args.b);
    let simulator = Simulator::with_config(SimulatorConfig { seed: args.seed });
    let outcome = build_and_simulate_with(&simulator, a, b)?;

    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("failed to serialize result: {e}"),
        }
        return Ok(());
    }

    println!("4-Bit Quantum Ripple Carry Adder");
    println!("Add two 4-bit numbers (0-{MAX_OPERAND}) using a quantum ripple carry structure.");
    println!();

    println!("Binary Representation");
    println!("A: {}", report::binary_list(&a.bits_msb_first()));
    println!("B: {}", report::binary_list(&b.bits_msb_first()));
    println!();

    let circuit = build_adder_circuit(a, b);
    if !args.no_circuit {
        println!("Quantum Circuit");
        println!("{circuit}");
    }

    if args.show_state {
        let final_state = simulator.simulate(&circuit)?;
        match final_state.ket() {
            Some(ket) => println!("Final state (A0..A3 B0..B3 C0..C4): {ket}\n"),
            None => println!("Final state is not a single basis state\n"),
        }
    }

    println!("Result");
    println!("✔ {}", report::sum_line(&outcome));
    println!("✔ {}", report::decimal_line(&outcome));
    println!();

    if !args.no_chart {
        println!("{}", report::outcome_chart(&outcome, CHART_WIDTH));
    }

    print!("{}", report::how_it_works());
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}
