//! Counts word occurrences across a JSON-Lines corpus of `{"doc_id",
//! "text"}` records, ported from the original `word_count` example.
//!
//! Usage: `word_count <input.jsonl> <output.jsonl>`

#[path = "common/mod.rs"]
mod common;

use cascade::{run, Graph, Record, Source, Sources, Value};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::try_init().ok();

    let mut args = env::args().skip(1);
    let input_path = args.next().expect("usage: word_count <input.jsonl> <output.jsonl>");
    let output_path = args.next().expect("usage: word_count <input.jsonl> <output.jsonl>");

    let input = common::read_jsonl(&input_path)?;

    let graph = Graph::create("input");
    graph.add_map(split_words);
    graph.add_sort("text")?;
    graph.add_reduce(count_group, "text")?;
    graph.add_sort(["count", "text"])?;

    let mut sources = Sources::new();
    sources.insert("input".to_string(), Source::from_iter(input));

    let output: Vec<Record> = run(&graph, sources)?.collect::<cascade::Result<_>>()?;
    let file = std::fs::File::create(&output_path)?;
    common::write_jsonl(&output, file)?;
    Ok(())
}

fn split_words(row: Record) -> cascade::Result<Vec<Record>> {
    let text = match row.get("text") {
        Some(Value::Str(s)) => s.clone(),
        _ => String::new(),
    };
    Ok(text
        .split_whitespace()
        .map(|w| {
            let word: String = w.chars().filter(|c| c.is_alphabetic()).collect();
            Record::from([("text", word.to_lowercase().into())])
        })
        .collect())
}

fn count_group(
    key: Record,
    group: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let mut out = key;
    out.set("count", group.count() as i64);
    Ok(vec![out])
}
