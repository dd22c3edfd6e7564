mod util;

fn main() {
    let _tracing = util::init_tracing();

    // Run registered benchmarks.
    divan::main();
}

mod examples {
    use cnf::Grammar;
    use rand::SeedableRng;

    const WIKI: &str = "S::=AB|BC\nA::=BA|a\nB::=CC|b\nC::=AB|a";

    #[divan::bench]
    fn parse_grammar(bencher: divan::Bencher) {
        let input = divan::black_box(WIKI);
        bencher.bench(|| input.parse::<Grammar>().unwrap());
    }

    #[divan::bench]
    fn derive_baaba(bencher: divan::Bencher) {
        bencher
            .with_inputs(|| WIKI.parse::<Grammar>().unwrap())
            .bench_refs(|grammar| grammar.is_derived("baaba").unwrap());
    }

    #[divan::bench]
    fn derive_long_word(bencher: divan::Bencher) {
        bencher
            .with_inputs(|| (WIKI.parse::<Grammar>().unwrap(), "baaba".repeat(8)))
            .bench_refs(|(grammar, word)| grammar.is_derived(word).unwrap());
    }

    #[divan::bench]
    fn render_table(bencher: divan::Bencher) {
        bencher
            .with_inputs(|| WIKI.parse::<Grammar>().unwrap())
            .bench_refs(|grammar| grammar.render_table("baaba").unwrap());
    }

    #[divan::bench]
    fn generate_word(bencher: divan::Bencher) {
        bencher
            .with_inputs(|| {
                let grammar: Grammar = WIKI.parse().unwrap();
                let rng: rand::rngs::StdRng = SeedableRng::seed_from_u64(0);
                (grammar, rng)
            })
            .bench_refs(|(grammar, rng)| grammar.generate_seeded_bounded(rng, 8).unwrap());
    }
}
