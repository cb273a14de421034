//! # Operand Lexer for DLX Assembly
//!
//! Classifies a single, already split argument token. An argument belongs to
//! a class only if one lexer token spans it completely.

use dlx_spec::OperandKind;
use logos::Logos;

/// Operand tokens
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// Register: `R<digits>`
    #[regex(r"R[0-9]+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    Register(u32),

    /// Immediate value: `#<signed-digits>`
    #[regex(r"#-?[0-9]+", |lex| lex.slice()[1..].parse::<i32>().ok())]
    Immediate(i32),

    /// Indirect memory operand: `<signed-digits>(R<digits>)`
    #[regex(r"-?[0-9]+\(R[0-9]+\)", parse_indirect)]
    Indirect((i32, u32)),

    /// Plain number, as used for direct memory addresses
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Number(i32),
}

fn parse_indirect(lex: &mut logos::Lexer<Token>) -> Option<(i32, u32)> {
    let slice = lex.slice();
    let open = slice.find('(')?;
    let offset = slice[..open].parse().ok()?;
    let base = slice[open + 2..slice.len() - 1].parse().ok()?;
    Some((offset, base))
}

/// Lex `text` as exactly one token
pub fn classify(text: &str) -> Option<Token> {
    let mut lex = Token::lexer(text);
    let token = lex.next()?.ok()?;
    if lex.span() != (0..text.len()) || lex.next().is_some() {
        return None;
    }
    Some(token)
}

/// Operand class of `text`, if it is a register, immediate or indirect operand.
///
/// Anything else can only be a label.
pub fn operand_kind(text: &str) -> Option<OperandKind> {
    match classify(text)? {
        Token::Register(_) => Some(OperandKind::Register),
        Token::Immediate(_) => Some(OperandKind::Immediate),
        Token::Indirect(_) => Some(OperandKind::Indirect),
        Token::Number(_) => None,
    }
}

/// `R` followed by digits
pub fn is_register_operand(text: &str) -> bool {
    matches!(classify(text), Some(Token::Register(_)))
}

/// `#` followed by an optional sign and digits
pub fn is_immediate_operand(text: &str) -> bool {
    matches!(classify(text), Some(Token::Immediate(_)))
}

/// Optional sign, digits, then `(R<digits>)`
pub fn is_indirect_operand(text: &str) -> bool {
    matches!(classify(text), Some(Token::Indirect(_)))
}

/// Numeric and a multiple of 4
pub fn is_direct_address(text: &str) -> bool {
    parse_direct_address(text).is_some()
}

/// Parse a textual direct memory address
pub fn parse_direct_address(text: &str) -> Option<i32> {
    match classify(text)? {
        Token::Number(n) if dlx_spec::is_direct_address(n) => Some(n),
        _ => None,
    }
}
