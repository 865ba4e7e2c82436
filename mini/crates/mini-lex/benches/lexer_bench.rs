use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mini_lex::Lexer;

const SOURCE: &str = r#"
fib = (n) => if (n < 2) { n } else { fib(n - 1) + fib(n - 2) };
xs = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
total = 0;
i = 0;
m = {"a": 1, "b": 2, "c": 3};
s = "hello, world";
r = (1..100);
"#;

fn lex_all(source: &str) {
    let mut lexer = Lexer::new(source);
    while !lexer.is_done().expect("lex error") {
        black_box(lexer.next_token(false).expect("lex error"));
    }
}

fn bench_lexer(c: &mut Criterion) {
    c.bench_function("lex_sample_program", |b| {
        b.iter(|| lex_all(black_box(SOURCE)));
    });
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
