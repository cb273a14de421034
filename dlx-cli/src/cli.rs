use clap::Parser;
use dlx_spec::{Limits, Word};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dlx")]
#[command(version, about = crate::APP_DESCRIPTION, long_about = None)]
pub struct Cli {
    /// DLX source file to run
    pub input_file: PathBuf,

    /// Maximum number of lines interpreted per run
    #[arg(long, default_value_t = Limits::DEFAULT.max_steps)]
    pub max_steps: u32,

    /// Maximum number of jumps along one line pair per run
    #[arg(long, default_value_t = Limits::DEFAULT.max_jumps)]
    pub max_jumps: u32,

    /// Single-step the program and print every executed line
    #[arg(long)]
    pub step: bool,

    /// Stop at breakpoints instead of resuming
    #[arg(long)]
    pub stop_at_breakpoints: bool,

    /// Preset a register, e.g. `--set R1=5`
    #[arg(long = "set", value_name = "REG=VALUE", value_parser = parse_assignment)]
    pub registers: Vec<(String, Word)>,

    /// Preset a memory word, e.g. `--mem 1000=7`
    #[arg(long = "mem", value_name = "ADDR=VALUE", value_parser = parse_assignment)]
    pub memory: Vec<(String, Word)>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn limits(&self) -> Result<Limits, dlx_spec::ConfigError> {
        Limits::new(self.max_steps, self.max_jumps)
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parse `NAME=VALUE`; the name is validated later by the machine
pub fn parse_assignment(text: &str) -> Result<(String, Word), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got \"{}\"", text))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in \"{}\"", text));
    }
    let value = value
        .trim()
        .parse::<Word>()
        .map_err(|e| format!("invalid value in \"{}\": {}", text, e))?;
    Ok((name.to_string(), value))
}
