use proptest::prelude::*;
use rill_lex::{Lexer, TokenKind};

proptest! {
    /// Lexing is total (§8): any input, however garbled, yields a finite
    /// token stream ending in `Eof`.
    #[test]
    fn any_input_ends_in_eof(source in ".{0,256}") {
        let mut lexer = Lexer::new(&source);
        let mut steps = 0;
        loop {
            let tok = lexer.next_token();
            steps += 1;
            if tok.kind == TokenKind::Eof {
                break;
            }
            prop_assert!(steps < 10_000, "lexer did not reach Eof");
        }
    }
}
