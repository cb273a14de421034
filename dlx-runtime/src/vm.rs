//! DLX machine
//!
//! Owns the loaded program, the register file, memory and the program
//! counter. One `Machine` is one independent session.

use crate::error::{Result, RuntimeError};
use crate::execute::{execute, Flow, JumpBudget};
use crate::jumps::JumpCounter;
use crate::memory::Memory;
use crate::registers::RegisterFile;
use crate::state::MachineState;
use dlx_assembler::{assemble, parse_direct_address, AssemblerError};
use dlx_spec::{check_direct_address, Address, Limits, Program, Register, SpecError, Word};
use tracing::{debug, info, trace, warn};

/// How a call to [`Machine::execute`] ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// HALT reached; the program counter is back at line 0
    Completed { steps: u64 },
    /// Stopped in front of a breakpoint line, which has not run yet
    PausedAtBreakpoint { line: usize },
}

/// Result of a single [`Machine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// `line` ran; execution continues at the program counter
    Stepped { line: usize },
    /// `line` was a HALT
    Halted { line: usize },
}

/// DLX interpreter session
#[derive(Debug, Clone, Default)]
pub struct Machine {
    program: Option<Program>,
    state: MachineState,
    limits: Limits,
}

impl Machine {
    /// Create a machine with default limits and no program
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Result<Self> {
        let mut machine = Self::new();
        machine.configure(limits)?;
        Ok(machine)
    }

    // ========== Program ==========

    /// Assemble and install `source`.
    ///
    /// On failure the machine is left without a program.
    pub fn load_program(&mut self, source: &str) -> std::result::Result<(), AssemblerError> {
        self.program = None;
        self.state.pc = 0;
        let program = assemble(source).map_err(|e| {
            debug!(line = e.line, error = %e.error, "program rejected");
            e
        })?;
        self.install(program);
        Ok(())
    }

    /// Install a program built outside the assembler.
    ///
    /// Instructions the assembler would never produce are rejected, leaving
    /// the machine without a program.
    pub fn load(&mut self, program: Program) -> Result<()> {
        self.program = None;
        self.state.pc = 0;
        if let Err((line, error)) = program.validate() {
            debug!(line, %error, "program rejected");
            return Err(RuntimeError::InvalidInstruction { line, error });
        }
        self.install(program);
        Ok(())
    }

    fn install(&mut self, program: Program) {
        info!(lines = program.len(), "program loaded");
        self.program = Some(program);
        self.state.pc = 0;
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    fn program_mut(&mut self) -> Result<&mut Program> {
        self.program.as_mut().ok_or(RuntimeError::NoProgram)
    }

    // ========== Execution ==========

    /// Run from the program counter until HALT, a breakpoint or an error.
    ///
    /// The breakpoint on the line execution starts from is ignored, so calling
    /// `execute` again resumes past it. Step and jump budgets apply per call.
    pub fn execute(&mut self) -> Result<RunOutcome> {
        let program = self.program.as_ref().ok_or(RuntimeError::NoProgram)?;
        let limits = self.limits;
        let mut jumps = JumpCounter::new(program.len());
        let mut steps: u64 = 0;

        if self.state.pc >= program.len() {
            self.state.pc = 0;
        }
        let start = self.state.pc;
        debug!(start, %limits, "run started");

        loop {
            steps += 1;
            if steps > u64::from(limits.max_steps) {
                warn!(line = self.state.pc, limit = limits.max_steps, "step budget exhausted");
                return Err(RuntimeError::TooManySteps {
                    limit: limits.max_steps,
                });
            }

            let line = self.state.pc;
            let Some(source) = program.line(line) else {
                self.state.pc = 0;
                return Err(RuntimeError::HaltNotFound);
            };

            if source.breakpoint && steps > 1 {
                debug!(line, "paused at breakpoint");
                return Ok(RunOutcome::PausedAtBreakpoint { line });
            }

            let budget = Some((&mut jumps, limits.max_jumps));
            match dispatch(program, &mut self.state, line, budget)? {
                Flow::Halt => {
                    debug!(line, steps, "halted");
                    self.state.pc = 0;
                    return Ok(RunOutcome::Completed { steps });
                }
                Flow::Next if self.state.pc >= program.len() => {
                    debug!(line, "ran past the last line");
                    self.state.pc = 0;
                    return Err(RuntimeError::HaltNotFound);
                }
                Flow::Next => {}
            }
        }
    }

    /// Run exactly one line, ignoring breakpoints and budgets
    pub fn step(&mut self) -> Result<StepOutcome> {
        let program = self.program.as_ref().ok_or(RuntimeError::NoProgram)?;

        if self.state.pc >= program.len() {
            self.state.pc = 0;
        }
        let line = self.state.pc;
        if program.line(line).is_none() {
            return Err(RuntimeError::HaltNotFound);
        }

        match dispatch(program, &mut self.state, line, None)? {
            Flow::Halt => {
                debug!(line, "halted");
                self.state.pc = 0;
                Ok(StepOutcome::Halted { line })
            }
            Flow::Next if self.state.pc >= program.len() => {
                self.state.pc = 0;
                Err(RuntimeError::HaltNotFound)
            }
            Flow::Next => Ok(StepOutcome::Stepped { line }),
        }
    }

    pub fn program_counter(&self) -> usize {
        self.state.pc
    }

    /// Move the program counter to `line` (0-based)
    pub fn set_program_counter(&mut self, line: usize) -> Result<()> {
        let len = self.program.as_ref().ok_or(RuntimeError::NoProgram)?.len();
        if line >= len {
            return Err(RuntimeError::LineOutOfRange { line, len });
        }
        self.state.pc = line;
        Ok(())
    }

    // ========== Configuration ==========

    pub fn configure(&mut self, limits: Limits) -> Result<()> {
        limits.validate().map_err(SpecError::from)?;
        self.limits = limits;
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    // ========== Breakpoints ==========

    /// Flip the breakpoint on `line`, returning whether it is now set
    pub fn toggle_breakpoint(&mut self, line: usize) -> Result<bool> {
        let program = self.program_mut()?;
        let len = program.len();
        program
            .toggle_breakpoint(line)
            .ok_or(RuntimeError::LineOutOfRange { line, len })
    }

    pub fn set_breakpoint(&mut self, line: usize, enabled: bool) -> Result<()> {
        let program = self.program_mut()?;
        let len = program.len();
        program
            .set_breakpoint(line, enabled)
            .ok_or(RuntimeError::LineOutOfRange { line, len })
    }

    pub fn breakpoints(&self) -> Vec<usize> {
        self.program
            .as_ref()
            .map(Program::breakpoints)
            .unwrap_or_default()
    }

    // ========== Registers ==========

    /// Value of register `name`; `None` if it holds no value
    pub fn register(&self, name: &str) -> Result<Option<Word>> {
        let reg = parse_register(name)?;
        Ok(self.state.registers.read(reg))
    }

    pub fn set_register(&mut self, name: &str, value: Word) -> Result<()> {
        let reg = writable_register(name)?;
        self.state.registers.write(reg, value);
        Ok(())
    }

    /// Clear register `name` back to "no value"
    pub fn unset_register(&mut self, name: &str) -> Result<()> {
        let reg = writable_register(name)?;
        self.state.registers.unset(reg);
        Ok(())
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.state.registers
    }

    pub fn reset_registers(&mut self) {
        self.state.registers.clear();
    }

    // ========== Memory ==========

    /// Word at a direct address; `None` if it holds no value
    pub fn memory(&self, address: Address) -> Result<Option<Word>> {
        let address = check_direct_address(address)?;
        Ok(self.state.memory.read(address))
    }

    pub fn set_memory(&mut self, address: Address, value: Word) -> Result<()> {
        self.state.memory.write(address, value)?;
        Ok(())
    }

    pub fn unset_memory(&mut self, address: Address) -> Result<()> {
        let address = check_direct_address(address)?;
        self.state.memory.unset(address);
        Ok(())
    }

    /// Like [`memory`](Self::memory) with a textual address such as `"1000"`
    pub fn memory_at(&self, address: &str) -> Result<Option<Word>> {
        self.memory(parse_address(address)?)
    }

    pub fn set_memory_at(&mut self, address: &str, value: Word) -> Result<()> {
        self.set_memory(parse_address(address)?, value)
    }

    pub fn memory_store(&self) -> &Memory {
        &self.state.memory
    }

    pub fn reset_memory(&mut self) {
        self.state.memory.clear();
    }

    /// Clear registers and memory and rewind the program counter
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }
}

/// Run `line`: advance the program counter, then execute. A fault leaves the
/// program counter on `line`.
fn dispatch(
    program: &Program,
    state: &mut MachineState,
    line: usize,
    jumps: JumpBudget<'_>,
) -> Result<Flow> {
    state.pc = line + 1;
    let Some(inst) = program.line(line).and_then(|l| l.instruction.as_ref()) else {
        return Ok(Flow::Next);
    };

    trace!(line, %inst, "dispatch");
    execute(inst, line, state, program, jumps).map_err(|fault| {
        debug!(line, %fault, "fault");
        state.pc = line;
        RuntimeError::Fault { line, fault }
    })
}

fn parse_register(name: &str) -> Result<Register> {
    name.parse()
        .map_err(|_| RuntimeError::InvalidRegister(name.to_string()))
}

fn writable_register(name: &str) -> Result<Register> {
    let reg = parse_register(name)?;
    if reg.is_zero() {
        return Err(RuntimeError::ReadOnly);
    }
    Ok(reg)
}

fn parse_address(text: &str) -> Result<Address> {
    parse_direct_address(text.trim()).ok_or_else(|| RuntimeError::InvalidAddress(text.to_string()))
}
