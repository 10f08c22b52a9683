//! Edge counter simulator binary.
//!
//! Runs a short scripted session against the simulated peripheral, or
//! serves the system over JSON-RPC on stdio.

use std::io;
use std::process;

use counter_harness::mcp::McpServer;
use counter_harness::{CounterSystem, HarnessConfig, HarnessError, RegisterPort};
use edge_counter::{EdgeMode, Register};
use sim_core::{MasterClock, Ticks};

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    mcp: bool,
    config: HarnessConfig,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.and_then(|s| s.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("{flag} needs a numeric argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        mcp: false,
        config: HarnessConfig::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mcp" => {
                cli.mcp = true;
            }
            "--clock-hz" => {
                i += 1;
                cli.config.clock = MasterClock::new(parse_number("--clock-hz", args.get(i)));
            }
            "--bit-delay" => {
                i += 1;
                cli.config.inter_bit_delay = Ticks::new(parse_number("--bit-delay", args.get(i)));
            }
            "--input-width" => {
                i += 1;
                cli.config.input_width = parse_number("--input-width", args.get(i));
            }
            "--help" | "-h" => {
                eprintln!("Usage: edge-counter-sim [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --mcp               Run as MCP server (JSON-RPC over stdio)");
                eprintln!("  --clock-hz <n>      Peripheral clock frequency [default: 10000000]");
                eprintln!("  --bit-delay <n>     Ticks between driver wire changes [default: 10]");
                eprintln!("  --input-width <n>   Number of input pins, 1-8 [default: 8]");
                eprintln!();
                eprintln!("Environment:");
                eprintln!("  EDGE_COUNTER_TRACE_BUS  Print every driver step to stderr");
                eprintln!("  RUST_LOG                Log filter (e.g. debug, spi_register_transport=trace)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli.config.trace_bus = std::env::var("EDGE_COUNTER_TRACE_BUS").is_ok();
    cli
}

// ---------------------------------------------------------------------------
// Scripted session
// ---------------------------------------------------------------------------

/// Let the input settle through the synchronizer and edge detector.
fn settle(system: &mut CounterSystem) {
    system.clock_cycles(3);
    system.clock_cycles(10);
}

fn report(system: &mut CounterSystem, label: &str) -> Result<(), HarnessError> {
    let value = system.read_reg(Register::Value.address())?;
    println!(
        "{label:<28} value={value:3}  display={:#010b}  t={} ns",
        system.display(),
        system.elapsed_ns()
    );
    Ok(())
}

fn run_session(system: &mut CounterSystem) -> Result<(), HarnessError> {
    system.clock_cycles(10);

    system.write_reg(Register::Reset.address(), 0)?;
    for _ in 0..3 {
        system.write_reg(Register::Inc.address(), 0)?;
    }
    report(system, "reset, inc x3")?;

    system.write_reg(Register::Cfg.address(), EdgeMode::Rising.code())?;
    system.write_reg(Register::Reset.address(), 0)?;
    for (inputs, label) in [
        (0x01, "rising: pin 0 high"),
        (0x00, "rising: pin 0 low"),
        (0x01, "rising: pin 0 high again"),
    ] {
        system.set_inputs(inputs);
        settle(system);
        report(system, label)?;
    }

    system.write_reg(Register::Cfg.address(), EdgeMode::Falling.code())?;
    system.write_reg(Register::Reset.address(), 0)?;
    report(system, "falling: after reset")?;
    for (inputs, label) in [
        (0x00, "falling: pin 0 low"),
        (0x01, "falling: pin 0 high"),
        (0x00, "falling: pin 0 low again"),
    ] {
        system.set_inputs(inputs);
        settle(system);
        report(system, label)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    if cli.mcp {
        let mut server = match McpServer::new(cli.config) {
            Ok(server) => server,
            Err(e) => {
                eprintln!("Invalid configuration: {e}");
                process::exit(1);
            }
        };
        let stdin = io::stdin();
        let stdout = io::stdout();
        if let Err(e) = server.run(stdin.lock(), stdout.lock()) {
            eprintln!("I/O error: {e}");
            process::exit(1);
        }
        return;
    }

    let mut system = match CounterSystem::new(cli.config) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = run_session(&mut system) {
        eprintln!("Session failed: {e}");
        process::exit(1);
    }
}
