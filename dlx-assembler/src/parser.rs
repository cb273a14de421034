//! Line parser
//!
//! A line has the shape
//!
//! ```text
//! [label:] [>] [OPCODE [arg {, arg}]] [// comment]
//! ```

use crate::error::{ParseError, Result};
use crate::validator::validate;
use dlx_spec::SourceLine;

/// Raw fields of one source line, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub label: Option<String>,
    pub breakpoint: bool,
    pub opcode: Option<String>,
    pub args: Vec<String>,
}

/// Remove a trailing `//` comment and surrounding whitespace
pub fn strip_comment(raw: &str) -> &str {
    let code = match raw.find("//") {
        Some(start) => &raw[..start],
        None => raw,
    };
    code.trim()
}

/// Split a raw line into label, breakpoint marker, opcode and arguments
pub fn split_line(raw: &str) -> Result<ParsedLine> {
    let mut rest = strip_comment(raw);
    let mut line = ParsedLine::default();

    if let Some(colon) = rest.find(':') {
        let label = &rest[..colon];
        if label.is_empty() {
            return Err(ParseError::EmptyLabel);
        }
        if label.contains(char::is_whitespace) {
            return Err(ParseError::LabelContainsWhitespace(label.to_string()));
        }
        line.label = Some(label.to_string());
        rest = rest[colon + 1..].trim_start();
    }

    if let Some(after) = rest.strip_prefix('>') {
        line.breakpoint = true;
        rest = after.trim_start();
    }

    if rest.is_empty() {
        return Ok(line);
    }

    let (opcode, args) = match rest.find(char::is_whitespace) {
        Some(end) => (&rest[..end], rest[end..].trim()),
        None => (rest, ""),
    };
    line.opcode = Some(opcode.to_string());
    if !args.is_empty() {
        line.args = args.split(',').map(|arg| arg.trim().to_string()).collect();
    }

    Ok(line)
}

/// Parse and validate one source line
pub fn parse_line(raw: &str) -> Result<SourceLine> {
    let parsed = split_line(raw)?;
    let instruction = match &parsed.opcode {
        Some(opcode) => Some(validate(opcode, parsed.args.as_slice())?),
        None => None,
    };

    Ok(SourceLine {
        label: parsed.label,
        breakpoint: parsed.breakpoint,
        instruction,
    })
}
