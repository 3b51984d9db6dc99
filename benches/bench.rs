use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glob::glob;
use rex_shallow::*;
use std::fmt::{self, Debug};
use std::fs;
use std::hint::black_box;

struct Input {
    pub name: String,
    pub data: String,
}

impl Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn get_inputs() -> Vec<Input> {
    let mut inputs = glob(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/*/*.xml"))
        .unwrap()
        .map(|path| {
            let path = path.unwrap();

            Input {
                name: path.file_name().unwrap().to_string_lossy().to_string(),
                data: fs::read_to_string(&path).unwrap(),
            }
        })
        .collect::<Vec<_>>();

    let book = r#"<book id="bk" lang="en"><title>Title</title><!-- note --><price currency="USD">1.0</price><cover src="a.png"/></book>"#;

    inputs.push(Input {
        name: "large.xml".into(),
        data: format!("<catalog>{}</catalog>", book.repeat(10_000)),
    });

    inputs
}

fn tokenization_benchmark(c: &mut Criterion) {
    let inputs = get_inputs();
    let mut group = c.benchmark_group("Tokenizer");

    for input in &inputs {
        group.throughput(Throughput::Bytes(input.data.len() as u64));

        group.bench_with_input(BenchmarkId::new("Shallow parse", &input.name), input, |b, i| {
            b.iter(|| black_box(shallow_parse(&i.data)))
        });

        group.bench_with_input(BenchmarkId::new("Tokenize", &input.name), input, |b, i| {
            b.iter(|| {
                for token in tokenize(&i.data) {
                    black_box(token).ok();
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("Check and expand", &input.name), input, |b, i| {
            b.iter(|| {
                black_box(concat_tokens(expand_empty_tags(
                    wellformedness_check(tokenize(&i.data)),
                    &[],
                )))
            })
        });
    }

    group.finish();
}

fn rewriting_benchmark(c: &mut Criterion) {
    let inputs = get_inputs();
    let mut group = c.benchmark_group("Rewriter");

    for input in &inputs {
        group.throughput(Throughput::Bytes(input.data.len() as u64));

        group.bench_with_input(BenchmarkId::new("Set attribute", &input.name), input, |b, i| {
            b.iter(|| {
                let rewritten = tokenize(&i.data).map(|token| {
                    token.map(|mut token| {
                        if let Token::StartTag(tag) = &mut token {
                            tag.set_attribute("data-seen", "1").ok();
                        }

                        token
                    })
                });

                black_box(concat_tokens(rewritten))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, tokenization_benchmark, rewriting_benchmark);
criterion_main!(benches);
