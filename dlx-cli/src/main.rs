use anyhow::{Context, Result};
use clap::Parser;
use dlx_runtime::Machine;
use std::fs;
use std::io;
use tracing_subscriber::EnvFilter;

mod cli;
mod session;

pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let source = fs::read_to_string(&cli.input_file)
        .with_context(|| format!("failed to read {}", cli.input_file.display()))?;

    let mut machine = Machine::new();
    machine.configure(cli.limits()?)?;
    machine.load_program(&source)?;

    for (name, value) in &cli.registers {
        machine
            .set_register(name, *value)
            .with_context(|| format!("cannot preset {}", name))?;
    }
    for (address, value) in &cli.memory {
        machine
            .set_memory_at(address, *value)
            .with_context(|| format!("cannot preset memory {}", address))?;
    }

    let mut out = io::stdout().lock();
    if cli.step {
        session::step(&mut machine, &mut out)?;
    } else {
        session::run(&mut machine, cli.stop_at_breakpoints, &mut out)?;
    }

    session::print_state(&machine, &mut out)?;
    Ok(())
}
