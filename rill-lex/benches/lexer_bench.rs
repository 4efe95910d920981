use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rill_lex::{Lexer, TokenKind};

const SOURCE: &str = r#"
class Counter {
    fn init(self, start) { self.n = start }
    fn tick(self) { self.n = self.n + 1; return self.n }
}
let c = new Counter(0);
for (let i = 0; i < 1000; i = i + 1) {
    c.tick();
}
print(c.n);
"#;

fn lex_all(source: &str) {
    let mut lexer = Lexer::new(source);
    loop {
        let tok = lexer.next_token();
        if tok.kind == TokenKind::Eof {
            break;
        }
    }
}

fn bench_lexer(c: &mut Criterion) {
    c.bench_function("lex_sample_program", |b| {
        b.iter(|| lex_all(black_box(SOURCE)))
    });
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
