//! DLX Assembler
//!
//! Turn DLX assembly text into a [`Program`](dlx_spec::Program): one parsed and
//! validated line per source line, plus the label map.
//!
//! ## Example
//!
//! ```rust
//! use dlx_assembler::assemble;
//!
//! let source = r#"
//!         ADDI R1, R0, #3
//! Loop:   SUBI R1, R1, #1
//!         BNEZ R1, Loop
//!         HALT
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.resolve("Loop"), Some(2));
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod validator;
pub mod assembler;

pub use error::{AssemblerError, ParseError, Result};
pub use assembler::assemble;
pub use parser::{parse_line, split_line, strip_comment, ParsedLine};
pub use validator::validate;
pub use lexer::{
    is_direct_address, is_immediate_operand, is_indirect_operand, is_register_operand,
    operand_kind, parse_direct_address,
};
