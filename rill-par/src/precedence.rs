//! Pratt-parsing precedence ladder (§4.2).
//!
//! ```text
//! LOWEST < ASSIGN < YIELD < LOGICAL < EQUALS < LESSGREATER < SUM < PRODUCT < PREFIX < CALL < INDEX
//! ```
//! `LOGICAL` has no operators bound to it yet — the language has no
//! `&&`/`||` — but the slot is reserved so a future addition doesn't
//! renumber everything above it.

use rill_lex::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Assign,
    Yield,
    Logical,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

/// The precedence of `kind` when it appears as an infix/postfix operator,
/// or `Lowest` if it never does.
pub fn precedence_of(kind: TokenKind) -> Precedence {
    use TokenKind::*;
    match kind {
        Assign | PlusAssign | MinusAssign | AsteriskAssign | SlashAssign | ModuloAssign
        | FloorDivideAssign => Precedence::Assign,
        Yield => Precedence::Yield,
        Eq | NotEq => Precedence::Equals,
        Lt | Gt | Le | Ge => Precedence::LessGreater,
        Plus | Minus => Precedence::Sum,
        Asterisk | Slash | Power | Modulo | FloorDivide | BitwiseAnd | BitwiseOr | BitwiseXor
        | LeftShift | RightShift => Precedence::Product,
        LParen | Dot => Precedence::Call,
        LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}
