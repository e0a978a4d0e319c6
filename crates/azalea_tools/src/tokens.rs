//! Token stream rendering

use azalea::lexer::ScanOutput;
use azalea::syntax::SyntaxKind;
use serde_json::{Value, json};
use std::fmt::Write;

/// One token per line: line number, byte span, kind and escaped text.
pub fn render_text<K: SyntaxKind>(output: &ScanOutput<K>, name: impl Fn(K) -> String) -> String {
    let mut text = String::new();
    for token in &output.tokens {
        let _ = writeln!(
            text,
            "{:>4}  {:<10} {}({})",
            token.line,
            token.range.to_string(),
            name(token.kind),
            token.text.escape_debug()
        );
    }
    text
}

/// Tokens and errors as one JSON document.
pub fn render_json<K: SyntaxKind>(output: &ScanOutput<K>, name: impl Fn(K) -> String) -> Value {
    let tokens: Vec<Value> = output
        .tokens
        .iter()
        .map(|token| {
            json!({
                "kind": name(token.kind),
                "text": token.text.as_str(),
                "start": token.range.start().to_usize(),
                "end": token.range.end().to_usize(),
                "line": token.line,
            })
        })
        .collect();
    let errors: Vec<Value> = output
        .errors
        .iter()
        .map(|error| {
            json!({
                "message": error.kind.to_string(),
                "offset": error.offset(),
                "line": error.line,
                "column": error.column,
            })
        })
        .collect();
    json!({ "tokens": tokens, "errors": errors })
}
