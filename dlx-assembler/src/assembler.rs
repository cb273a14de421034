//! Main assembler logic

use crate::error::{AssemblerError, ParseError};
use crate::parser::split_line;
use crate::validator::validate;
use dlx_spec::{Program, SourceLine};
use tracing::{debug, info};

/// Assemble source text into a program.
///
/// Every source line, blank ones included, becomes one program line so that
/// line indices match the editor. The first failing line aborts assembly.
/// A repeated label is reported before the rest of its line is validated.
pub fn assemble(source: &str) -> Result<Program, AssemblerError> {
    let mut program = Program::new();

    for (line_num, raw) in source.lines().enumerate() {
        let parsed = split_line(raw).map_err(|e| AssemblerError::new(line_num, e))?;

        if let Some(label) = &parsed.label {
            if let Some(first_line) = program.resolve(label) {
                debug!(%label, first_line, line_num, "duplicate label");
                return Err(AssemblerError::new(
                    line_num,
                    ParseError::DuplicateLabel { label: label.clone(), first_line },
                ));
            }
        }

        let instruction = match &parsed.opcode {
            Some(opcode) => Some(
                validate(opcode, parsed.args.as_slice())
                    .map_err(|e| AssemblerError::new(line_num, e))?,
            ),
            None => None,
        };

        // The label was checked above, so the push cannot collide
        let _ = program.push(SourceLine {
            label: parsed.label,
            breakpoint: parsed.breakpoint,
            instruction,
        });
    }

    info!(
        lines = program.len(),
        instructions = program.instruction_count(),
        labels = program.labels().len(),
        "program assembled"
    );
    Ok(program)
}
