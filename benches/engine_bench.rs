//! Engine throughput over a synthetic text-heavy content stream.

use criterion::{criterion_group, criterion_main, Criterion};
use orinoco::error::Result;
use orinoco::font::Font;
use orinoco::interp::ResourceScope;
use orinoco::parser::{Token, TokenBuffer};
use orinoco::{NullSink, PdfObject, StreamEngine};
use std::sync::Arc;

struct FixedFont;

impl Font for FixedFont {
    fn encode(&self, bytes: &[u8], offset: usize, len: usize) -> Option<String> {
        Some(
            bytes[offset..offset + len]
                .iter()
                .map(|&b| b as char)
                .collect(),
        )
    }

    fn code_from_array(&self, bytes: &[u8], offset: usize, _len: usize) -> u32 {
        u32::from(bytes[offset])
    }

    fn font_width(&self, _bytes: &[u8], _offset: usize, _len: usize) -> f64 {
        500.0
    }

    fn font_height(&self, _bytes: &[u8], _offset: usize, _len: usize) -> f64 {
        700.0
    }

    fn space_width(&self) -> Result<f64> {
        Ok(250.0)
    }

    fn average_font_width(&self) -> f64 {
        450.0
    }
}

fn page_tokens(lines: usize) -> Vec<Token> {
    let mut tokens = vec![
        Token::Operator("BT".to_string()),
        Token::Operand(PdfObject::Name("F1".to_string())),
        Token::Operand(PdfObject::Real(11.0)),
        Token::Operator("Tf".to_string()),
        Token::Operand(PdfObject::Real(14.0)),
        Token::Operator("TL".to_string()),
    ];
    for _ in 0..lines {
        tokens.push(Token::Operand(PdfObject::String(
            b"The quick brown fox jumps over the lazy dog".to_vec(),
        )));
        tokens.push(Token::Operator("'".to_string()));
    }
    tokens.push(Token::Operator("ET".to_string()));
    tokens
}

fn bench_process_stream(c: &mut Criterion) {
    let tokens = page_tokens(50);
    c.bench_function("process_stream_50_lines", |b| {
        b.iter(|| {
            let mut scope = ResourceScope::new();
            scope.insert_font("F1", Arc::new(FixedFont));
            let mut sink = NullSink;
            let mut engine = StreamEngine::new(&mut sink);
            engine
                .process_stream(
                    Some(scope),
                    &mut TokenBuffer::new(tokens.clone()),
                    (0.0, 0.0, 612.0, 792.0),
                    0,
                )
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_process_stream);
criterion_main!(benches);
