use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rill_lex::Lexer;
use rill_par::Parser;

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

fn parse_all(source: &str) {
    let parser = Parser::new(Lexer::new(source));
    let (_program, _handler) = parser.parse();
}

fn bench_parser(c: &mut Criterion) {
    c.bench_function("parse_sample_program", |b| {
        b.iter(|| parse_all(black_box(SOURCE)))
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
