//! Run loops and state printing for the `dlx` binary

use anyhow::Result;
use dlx_runtime::{Machine, RunOutcome, RuntimeError, StepOutcome};
use std::io::{self, Write};
use tracing::info;

/// Execute until HALT, optionally resuming over breakpoints
pub fn run<W: Write>(machine: &mut Machine, stop_at_breakpoints: bool, out: &mut W) -> Result<()> {
    loop {
        match machine.execute()? {
            RunOutcome::Completed { steps } => {
                info!(steps, "program completed");
                return Ok(());
            }
            RunOutcome::PausedAtBreakpoint { line } => {
                writeln!(out, "Breakpoint at line {}", line + 1)?;
                if stop_at_breakpoints {
                    return Ok(());
                }
            }
        }
    }
}

/// Single-step until HALT, printing each executed line.
///
/// Stepping is bounded by the machine's step budget like a run.
pub fn step<W: Write>(machine: &mut Machine, out: &mut W) -> Result<()> {
    let limit = machine.limits().max_steps;
    for _ in 0..limit {
        match machine.step()? {
            StepOutcome::Stepped { line } => print_line(machine, line, out)?,
            StepOutcome::Halted { line } => {
                print_line(machine, line, out)?;
                return Ok(());
            }
        }
    }
    Err(RuntimeError::TooManySteps { limit }.into())
}

fn print_line<W: Write>(machine: &Machine, line: usize, out: &mut W) -> io::Result<()> {
    match machine.program().and_then(|p| p.line(line)) {
        Some(source) => writeln!(out, "{:>5}  {}", line + 1, source),
        None => Ok(()),
    }
}

/// Print the registers and memory cells that hold a value
pub fn print_state<W: Write>(machine: &Machine, out: &mut W) -> io::Result<()> {
    writeln!(out, "Registers:")?;
    for (reg, value) in machine.registers().iter().filter(|(reg, _)| !reg.is_zero()) {
        writeln!(out, "  {:<4} {}", reg.to_string(), value)?;
    }
    if !machine.memory_store().is_empty() {
        writeln!(out, "Memory:")?;
        for (address, value) in machine.memory_store().iter() {
            writeln!(out, "  {:<10} {}", address, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlx_spec::Limits;

    fn loaded(source: &str, max_steps: u32) -> Machine {
        let mut m = Machine::with_limits(Limits::new(max_steps, 1_000).unwrap()).unwrap();
        m.load_program(source).unwrap();
        m
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_step_prints_each_line() {
        let mut m = loaded("ADDI R1, R0, #2\nHALT", 10);
        let mut out = Vec::new();
        step(&mut m, &mut out).unwrap();
        assert_eq!(output(out), "    1  ADDI R1, R0, #2\n    2  HALT\n");
        assert_eq!(m.register("R1"), Ok(Some(2)));
    }

    #[test]
    fn test_step_stops_endless_loop() {
        let mut m = loaded("Loop: J Loop", 5);
        let mut out = Vec::new();
        let err = step(&mut m, &mut out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RuntimeError>(),
            Some(&RuntimeError::TooManySteps { limit: 5 })
        );
        assert_eq!(output(out).lines().count(), 5);
    }

    #[test]
    fn test_step_reports_missing_halt() {
        let mut m = loaded("\n\n", 10);
        let err = step(&mut m, &mut Vec::new()).unwrap_err();
        assert_eq!(err.downcast_ref::<RuntimeError>(), Some(&RuntimeError::HaltNotFound));
    }

    #[test]
    fn test_run_resumes_over_breakpoints() {
        let mut m = loaded("ADDI R1, R0, #1\n> ADDI R2, R0, #2\nHALT", 10);
        let mut out = Vec::new();
        run(&mut m, false, &mut out).unwrap();
        assert_eq!(output(out), "Breakpoint at line 2\n");
        assert_eq!(m.register("R2"), Ok(Some(2)));
    }

    #[test]
    fn test_run_stops_at_breakpoint() {
        let mut m = loaded("ADDI R1, R0, #1\n> ADDI R2, R0, #2\nHALT", 10);
        run(&mut m, true, &mut Vec::new()).unwrap();
        assert_eq!(m.register("R2"), Ok(None));
        assert_eq!(m.program_counter(), 1);
    }

    #[test]
    fn test_run_propagates_budget_error() {
        let mut m = loaded("Loop: J Loop", 100);
        let err = run(&mut m, false, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RuntimeError>(),
            Some(&RuntimeError::TooManySteps { limit: 100 })
        );
    }

    #[test]
    fn test_print_state() {
        let mut m = loaded("ADDI R1, R0, #7\nSW 8(R0), R1\nHALT", 10);
        run(&mut m, false, &mut Vec::new()).unwrap();
        let mut out = Vec::new();
        print_state(&m, &mut out).unwrap();
        assert_eq!(
            output(out),
            "Registers:\n  R1   7\nMemory:\n  8          7\n"
        );
    }

    #[test]
    fn test_print_state_without_memory() {
        let m = Machine::new();
        let mut out = Vec::new();
        print_state(&m, &mut out).unwrap();
        assert_eq!(output(out), "Registers:\n");
    }
}
