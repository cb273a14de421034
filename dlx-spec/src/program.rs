//! # Program Table
//!
//! One entry per source line (blank and comment-only lines included, so line
//! indices match the source), plus the label map built while loading.

use crate::error::SpecError;
use crate::instruction::Instruction;
use std::collections::HashMap;
use std::fmt;

/// A validated source line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLine {
    /// Label defined on this line
    pub label: Option<String>,
    /// Execution pauses here when running
    pub breakpoint: bool,
    /// `None` for blank and comment-only lines
    pub instruction: Option<Instruction>,
}

impl SourceLine {
    pub fn new(instruction: Instruction) -> Self {
        Self {
            label: None,
            breakpoint: false,
            instruction: Some(instruction),
        }
    }

    /// A line without an opcode
    pub fn blank() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.instruction.is_none()
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(label) = &self.label {
            write!(f, "{}:", label)?;
            sep = " ";
        }
        if self.breakpoint {
            write!(f, "{}>", sep)?;
            sep = " ";
        }
        if let Some(inst) = &self.instruction {
            write!(f, "{}{}", sep, inst)?;
        }
        Ok(())
    }
}

/// Assembled program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    lines: Vec<SourceLine>,
    labels: HashMap<String, usize>,
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, registering its label.
    ///
    /// Returns the index of the earlier definition if the label is already taken;
    /// the line is not appended in that case.
    pub fn push(&mut self, line: SourceLine) -> Result<usize, usize> {
        let index = self.lines.len();
        if let Some(label) = &line.label {
            if let Some(&previous) = self.labels.get(label) {
                return Err(previous);
            }
            self.labels.insert(label.clone(), index);
        }
        self.lines.push(line);
        Ok(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&SourceLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// Line index a label is bound to
    pub fn resolve(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    pub fn labels(&self) -> &HashMap<String, usize> {
        &self.labels
    }

    /// Flip the breakpoint flag of a line, returning the new state
    pub fn toggle_breakpoint(&mut self, index: usize) -> Option<bool> {
        let line = self.lines.get_mut(index)?;
        line.breakpoint = !line.breakpoint;
        Some(line.breakpoint)
    }

    pub fn set_breakpoint(&mut self, index: usize, enabled: bool) -> Option<()> {
        self.lines.get_mut(index)?.breakpoint = enabled;
        Some(())
    }

    /// Indices of all lines with a breakpoint, ascending
    pub fn breakpoints(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.breakpoint)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check every instruction, reporting the first bad line (0-based)
    pub fn validate(&self) -> Result<(), (usize, SpecError)> {
        for (index, line) in self.lines.iter().enumerate() {
            if let Some(inst) = &line.instruction {
                inst.validate().map_err(|e| (index, e))?;
            }
        }
        Ok(())
    }

    /// Number of lines carrying an instruction
    pub fn instruction_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.is_blank()).count()
    }
}

impl FromIterator<SourceLine> for Program {
    /// Collects lines; a repeated label keeps its first definition.
    fn from_iter<I: IntoIterator<Item = SourceLine>>(iter: I) -> Self {
        let mut program = Program::new();
        for mut line in iter {
            if line.label.as_ref().is_some_and(|l| program.labels.contains_key(l)) {
                line.label = None;
            }
            let _ = program.push(line);
        }
        program
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
