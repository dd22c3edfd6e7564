mod util;

use cnf::Grammar;
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;

const WIKI: &str = "S::=AB|BC\nA::=BA|a\nB::=CC|b\nC::=AB|a";

fn examples(c: &mut Criterion) {
    let _tracing = util::init_tracing();

    c.bench_function("parse grammar", |b| {
        b.iter(|| WIKI.parse::<Grammar>().unwrap());
    });

    let grammar: Grammar = WIKI.parse().unwrap();

    c.bench_function("derive baaba", |b| {
        b.iter(|| grammar.is_derived("baaba").unwrap());
    });

    // quadratic table, cubic fill; the interesting curve is word length
    let long_word = "baaba".repeat(8);
    c.bench_function("derive 40 characters", |b| {
        b.iter(|| grammar.is_derived(&long_word).unwrap());
    });

    c.bench_function("render table", |b| {
        b.iter(|| grammar.render_table("baaba").unwrap());
    });

    c.bench_function("generate word", |b| {
        // pseudo random for consistent metrics
        let mut rng: rand::rngs::StdRng = SeedableRng::seed_from_u64(0);
        b.iter(|| grammar.generate_seeded_bounded(&mut rng, 8).unwrap());
    });
}

criterion_group!(benches, examples);
criterion_main!(benches);
