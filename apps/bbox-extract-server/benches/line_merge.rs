//! Line merging benchmarks
//!
//! Measures the text-layer path of the page pipeline (span merging and
//! block walking) and Tesseract TSV parsing on synthetic pages.
//!
//! Run with: `cargo bench --bench line_merge`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bbox_extract_server::extraction::{
    extract_text_layer, merge_line, Block, BoundingBox, Line, Span, StructuredPage,
};
use bbox_extract_server::ocr::parse_tsv;

/// A line of `words` spans laid out left to right
fn synthetic_line(y: f32, words: usize) -> Line {
    let spans = (0..words)
        .map(|i| {
            let x = 40.0 + i as f32 * 32.0;
            Span::new(format!("word{} ", i), BoundingBox::new(x, y, x + 30.0, y + 11.0))
        })
        .collect();
    Line::new(spans)
}

/// A page of `blocks` paragraphs with ten lines of twelve words each
fn synthetic_page(blocks: usize) -> StructuredPage {
    let blocks = (0..blocks)
        .map(|b| {
            let top = 50.0 + b as f32 * 140.0;
            let lines: Vec<Line> = (0..10)
                .map(|l| synthetic_line(top + l as f32 * 13.0, 12))
                .collect();
            Block::Text {
                bbox: BoundingBox::new(40.0, top, 430.0, top + 130.0),
                lines,
            }
        })
        .collect();

    StructuredPage {
        width: 612.0,
        height: 792.0,
        blocks,
    }
}

fn synthetic_tsv(rows: usize) -> String {
    let mut tsv = String::from(
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n",
    );
    for i in 0..rows {
        tsv.push_str(&format!(
            "5\t1\t1\t1\t{}\t{}\t{}\t{}\t40\t12\t91.5\tword{}\n",
            i / 12,
            i % 12,
            (i % 12) * 45,
            (i / 12) * 15,
            i
        ));
    }
    tsv
}

fn bench_merge_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_line");

    for words in [1usize, 12, 64] {
        let line = synthetic_line(100.0, words);
        group.throughput(Throughput::Elements(words as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &line, |b, line| {
            b.iter(|| merge_line(black_box(&line.spans)))
        });
    }

    group.finish();
}

fn bench_text_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_text_layer");

    for blocks in [1usize, 5, 20] {
        let page = synthetic_page(blocks);
        group.throughput(Throughput::Elements((blocks * 10) as u64));
        group.bench_with_input(BenchmarkId::new("blocks", blocks), &page, |b, page| {
            b.iter(|| extract_text_layer(black_box(page)))
        });
    }

    group.finish();
}

fn bench_parse_tsv(c: &mut Criterion) {
    let tsv = synthetic_tsv(600);

    c.bench_function("parse_tsv_600_words", |b| {
        b.iter(|| parse_tsv(black_box(&tsv)))
    });
}

criterion_group!(benches, bench_merge_line, bench_text_layer, bench_parse_tsv);
criterion_main!(benches);
