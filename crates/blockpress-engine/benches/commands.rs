use blockpress_engine::editing::{BlockTemplate, Cmd, Direction, Document};
use criterion::{Criterion, criterion_group, criterion_main};

/// Build a document with `n` paragraph blocks appended after the seed block.
fn generate_document(n: usize) -> Document {
    let mut doc = Document::new();
    let mut anchor = doc.blocks()[0].id;
    for _ in 0..n {
        let patch = doc
            .apply(Cmd::InsertAfter {
                anchor,
                template: BlockTemplate::Paragraph,
            })
            .unwrap();
        anchor = patch.changed[0];
    }
    doc
}

fn bench_command_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands");
    group.sample_size(10);

    let doc = generate_document(100);
    let middle = doc.blocks()[50].id;

    group.bench_function("insert_command", |b| {
        let mut d = doc.clone();
        b.iter(|| {
            let patch = d
                .apply(Cmd::InsertAfter {
                    anchor: std::hint::black_box(middle),
                    template: BlockTemplate::Paragraph,
                })
                .unwrap();
            std::hint::black_box(patch);
        });
    });

    group.bench_function("set_text_command", |b| {
        let mut d = doc.clone();
        b.iter(|| {
            let patch = d
                .apply(Cmd::SetText {
                    id: std::hint::black_box(middle),
                    text: std::hint::black_box("updated".to_string()),
                })
                .unwrap();
            std::hint::black_box(patch);
        });
    });

    group.bench_function("move_command_round_trip", |b| {
        let mut d = doc.clone();
        b.iter(|| {
            d.apply(Cmd::Move {
                id: middle,
                direction: Direction::Up,
            })
            .unwrap();
            d.apply(Cmd::Move {
                id: middle,
                direction: Direction::Down,
            })
            .unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_command_operations);
criterion_main!(benches);
