//! The lexer proper: `next_token` dispatch and the recognizer subroutines
//! for identifiers, numbers, strings, and operators (§4.1).

use rill_util::{Span, Symbol};

use crate::cursor::Cursor;
use crate::{Token, TokenKind};

/// Scans a source string into [`Token`]s on demand.
///
/// `Lexer` is pure: calling `next_token()` repeatedly has no effect beyond
/// advancing its internal cursor. It never fails — unrecognized input
/// becomes an `Illegal` token rather than an error, so lexing is total
/// (§8).
#[derive(Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next token and advances past it. Returns `Eof` forever
    /// once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.skip_comment();
        // a comment immediately followed by whitespace must still be
        // collapsed before the next token is read (§4.1).
        self.skip_whitespace();

        let line = self.cursor.line();
        let column = self.cursor.column();
        let ch = self.cursor.current();

        let token = match ch {
            0 => self.make(TokenKind::Eof, "", line, column),

            b'=' => self.two_char(b'=', TokenKind::Eq, TokenKind::Assign, line, column),
            b'+' => self.two_char(b'=', TokenKind::PlusAssign, TokenKind::Plus, line, column),
            b'-' => self.two_char(b'=', TokenKind::MinusAssign, TokenKind::Minus, line, column),
            b'!' => self.two_char(b'=', TokenKind::NotEq, TokenKind::Bang, line, column),
            b'*' => self.star(line, column),
            b'/' => self.slash(line, column),
            b'%' => self.two_char(b'=', TokenKind::ModuloAssign, TokenKind::Modulo, line, column),
            b'<' => self.angle(b'<', TokenKind::LeftShift, TokenKind::Le, TokenKind::Lt, line, column),
            b'>' => self.angle(b'>', TokenKind::RightShift, TokenKind::Ge, TokenKind::Gt, line, column),
            b'&' => self.single(TokenKind::BitwiseAnd, line, column),
            b'|' => self.single(TokenKind::BitwiseOr, line, column),
            b'^' => self.single(TokenKind::BitwiseXor, line, column),
            b'~' => self.single(TokenKind::BitwiseNot, line, column),

            b',' => self.single(TokenKind::Comma, line, column),
            b';' => self.single(TokenKind::Semicolon, line, column),
            b':' => self.single(TokenKind::Colon, line, column),
            b'.' => self.single(TokenKind::Dot, line, column),
            b'@' => self.single(TokenKind::At, line, column),
            b'(' => self.single(TokenKind::LParen, line, column),
            b')' => self.single(TokenKind::RParen, line, column),
            b'{' => self.single(TokenKind::LBrace, line, column),
            b'}' => self.single(TokenKind::RBrace, line, column),
            b'[' => self.single(TokenKind::LBracket, line, column),
            b']' => self.single(TokenKind::RBracket, line, column),

            b'\'' | b'"' => self.read_string(ch, line, column),

            _ if is_ident_start(ch) => self.read_identifier(line, column),
            _ if ch.is_ascii_digit() => self.read_number(line, column),

            other => {
                let lit = (other as char).to_string();
                self.cursor.advance();
                self.make(TokenKind::Illegal, &lit, line, column)
            }
        };

        token
    }

    fn make(&self, kind: TokenKind, literal: &str, line: usize, column: usize) -> Token {
        Token::new(kind, Symbol::intern(literal), Span::new(line, column))
    }

    fn single(&mut self, kind: TokenKind, line: usize, column: usize) -> Token {
        let lit = (self.cursor.current() as char).to_string();
        self.cursor.advance();
        self.make(kind, &lit, line, column)
    }

    /// Disambiguate a one-or-two-character operator by a single peek: if
    /// the next byte is `next`, emit `wide` and consume both characters;
    /// otherwise emit `narrow` and consume one.
    fn two_char(
        &mut self,
        next: u8,
        wide: TokenKind,
        narrow: TokenKind,
        line: usize,
        column: usize,
    ) -> Token {
        let first = self.cursor.current();
        if self.cursor.peek(1) == next {
            let lit = format!("{}{}", first as char, next as char);
            self.cursor.advance();
            self.cursor.advance();
            self.make(wide, &lit, line, column)
        } else {
            self.single(narrow, line, column)
        }
    }

    /// `<` / `>`: disambiguates the shift form (`<<`, `>>`), the
    /// compound-comparison form (`<=`, `>=`), or the bare comparison.
    fn angle(
        &mut self,
        shift_char: u8,
        shift: TokenKind,
        compound: TokenKind,
        bare: TokenKind,
        line: usize,
        column: usize,
    ) -> Token {
        let first = self.cursor.current();
        if self.cursor.peek(1) == shift_char {
            let lit = format!("{}{}", first as char, shift_char as char);
            self.cursor.advance();
            self.cursor.advance();
            self.make(shift, &lit, line, column)
        } else if self.cursor.peek(1) == b'=' {
            let lit = format!("{}=", first as char);
            self.cursor.advance();
            self.cursor.advance();
            self.make(compound, &lit, line, column)
        } else {
            self.single(bare, line, column)
        }
    }

    /// `*`: bare multiply, `**` power, or `*=` compound assign.
    fn star(&mut self, line: usize, column: usize) -> Token {
        if self.cursor.peek(1) == b'*' {
            self.cursor.advance();
            self.cursor.advance();
            self.make(TokenKind::Power, "**", line, column)
        } else {
            self.two_char(b'=', TokenKind::AsteriskAssign, TokenKind::Asterisk, line, column)
        }
    }

    /// `/`: needs its own subroutine since `//` (floor divide) and `//=`
    /// are both multi-character on top of the plain `/` and `/=` forms.
    fn slash(&mut self, line: usize, column: usize) -> Token {
        if self.cursor.peek(1) == b'/' {
            if self.cursor.peek(2) == b'=' {
                self.cursor.advance();
                self.cursor.advance();
                self.cursor.advance();
                self.make(TokenKind::FloorDivideAssign, "//=", line, column)
            } else {
                self.cursor.advance();
                self.cursor.advance();
                self.make(TokenKind::FloorDivide, "//", line, column)
            }
        } else {
            self.two_char(b'=', TokenKind::SlashAssign, TokenKind::Slash, line, column)
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current(), b' ' | b'\t' | b'\r' | b'\n') {
            self.cursor.advance();
        }
    }

    fn skip_comment(&mut self) {
        if self.cursor.current() == b'#' {
            while self.cursor.current() != b'\n' && self.cursor.current() != 0 {
                self.cursor.advance();
            }
        }
    }

    fn read_identifier(&mut self, line: usize, column: usize) -> Token {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let literal = self.cursor.slice(start, self.cursor.position());
        let kind = TokenKind::keyword(literal).unwrap_or(TokenKind::Ident);
        self.make(kind, literal, line, column)
    }

    /// Numbers: a `0b`/`0o`/`0x` prefix (case-insensitive on the letter)
    /// yields a radix literal whose text excludes the prefix; otherwise
    /// digits, optionally `.` and more digits, yield `Int`/`Float`.
    fn read_number(&mut self, line: usize, column: usize) -> Token {
        if self.cursor.current() == b'0' {
            let radix_kind = match self.cursor.peek(1) {
                b'b' | b'B' => Some((TokenKind::Binary, is_binary_digit as fn(u8) -> bool)),
                b'o' | b'O' => Some((TokenKind::Octal, is_octal_digit as fn(u8) -> bool)),
                b'x' | b'X' => Some((TokenKind::Hex, is_hex_digit as fn(u8) -> bool)),
                _ => None,
            };
            if let Some((kind, is_digit)) = radix_kind {
                self.cursor.advance(); // '0'
                self.cursor.advance(); // prefix letter
                let start = self.cursor.position();
                while is_digit(self.cursor.current()) {
                    self.cursor.advance();
                }
                let literal = self.cursor.slice(start, self.cursor.position());
                return self.make(kind, literal, line, column);
            }
        }

        let start = self.cursor.position();
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }
        let mut kind = TokenKind::Int;
        if self.cursor.current() == b'.' && self.cursor.peek(1).is_ascii_digit() {
            kind = TokenKind::Float;
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        let literal = self.cursor.slice(start, self.cursor.position());
        self.make(kind, literal, line, column)
    }

    /// Strings are raw: no escape processing, literal is the content
    /// between matching quotes. An unterminated string runs to `EOF` and
    /// is reported as `Illegal`.
    fn read_string(&mut self, quote: u8, line: usize, column: usize) -> Token {
        self.cursor.advance(); // opening quote
        let start = self.cursor.position();
        while self.cursor.current() != quote && self.cursor.current() != 0 {
            self.cursor.advance();
        }
        let literal = self.cursor.slice(start, self.cursor.position());
        if self.cursor.current() == 0 {
            return self.make(TokenKind::Illegal, literal, line, column);
        }
        self.cursor.advance(); // closing quote
        self.make(TokenKind::Str, literal, line, column)
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

fn is_binary_digit(ch: u8) -> bool {
    ch == b'0' || ch == b'1'
}

fn is_octal_digit(ch: u8) -> bool {
    (b'0'..=b'7').contains(&ch)
}

fn is_hex_digit(ch: u8) -> bool {
    ch.is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push((tok.kind, tok.literal.to_string()));
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn simple_let_statement() {
        let got = tokens("let x = 5;");
        assert_eq!(
            got,
            vec![
                (TokenKind::Let, "let".into()),
                (TokenKind::Ident, "x".into()),
                (TokenKind::Assign, "=".into()),
                (TokenKind::Int, "5".into()),
                (TokenKind::Semicolon, ";".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn operator_disambiguation() {
        let got = tokens("// //= / /= ** * *= << <= < >> >= >");
        let kinds: Vec<_> = got.into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::FloorDivide,
                TokenKind::FloorDivideAssign,
                TokenKind::Slash,
                TokenKind::SlashAssign,
                TokenKind::Power,
                TokenKind::Asterisk,
                TokenKind::AsteriskAssign,
                TokenKind::LeftShift,
                TokenKind::Le,
                TokenKind::Lt,
                TokenKind::RightShift,
                TokenKind::Ge,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn radix_literals_exclude_their_prefix() {
        let got = tokens("0b1010 0o17 0xFF");
        assert_eq!(
            got,
            vec![
                (TokenKind::Binary, "1010".into()),
                (TokenKind::Octal, "17".into()),
                (TokenKind::Hex, "FF".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn float_requires_a_digit_after_the_dot() {
        let got = tokens("3.14");
        assert_eq!(got[0], (TokenKind::Float, "3.14".into()));
    }

    #[test]
    fn string_literal_has_no_escape_processing() {
        let got = tokens(r#""hi\nthere""#);
        assert_eq!(got[0], (TokenKind::Str, "hi\\nthere".into()));
    }

    #[test]
    fn unterminated_string_is_illegal() {
        let got = tokens("\"abc");
        assert_eq!(got[0].0, TokenKind::Illegal);
    }

    #[test]
    fn comment_then_whitespace_collapses_before_next_token() {
        let got = tokens("let x = 1; # comment\n   y");
        let kinds: Vec<_> = got.into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unknown_character_is_illegal() {
        let got = tokens("`");
        assert_eq!(got[0], (TokenKind::Illegal, "`".into()));
    }

    #[test]
    fn keyword_table_matches_every_reserved_word() {
        let source = "fn let true false if else return while for in break continue class super self new import from as try except finally raise assert with yield async await pass null";
        let got = tokens(source);
        use TokenKind::*;
        let expected = vec![
            Function, Let, True, False, If, Else, Return, While, For, In, Break, Continue, Class,
            Super, SelfKw, New, Import, From, As, Try, Except, Finally, Raise, Assert, With,
            Yield, Async, Await, Pass, Null, Eof,
        ];
        let kinds: Vec<_> = got.into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn lexing_is_total_for_arbitrary_bytes() {
        // every input, however garbled, ends in a finite Eof-terminated stream
        let got = tokens("@@@ 0b2 \u{1F600}");
        assert_eq!(got.last().unwrap().0, TokenKind::Eof);
    }
}
