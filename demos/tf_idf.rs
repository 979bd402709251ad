//! Builds a per-word inverted index (top-3 documents by TF-IDF) over a
//! JSON-Lines corpus of `{"doc_id", "text"}` records, ported from the
//! original `inverted_index` example.
//!
//! Usage: `tf_idf <input.jsonl> <output.jsonl>`

#[path = "common/mod.rs"]
mod common;

use cascade::{run, Graph, JoinStrategy, KeySpec, Record, Source, Sources, Value};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::try_init().ok();

    let mut args = env::args().skip(1);
    let input_path = args.next().expect("usage: tf_idf <input.jsonl> <output.jsonl>");
    let output_path = args.next().expect("usage: tf_idf <input.jsonl> <output.jsonl>");
    let input = common::read_jsonl(&input_path)?;

    let split_words = Graph::create("input");
    split_words.add_map(split_word_map);

    let count_docs = Graph::create("input");
    count_docs.add_fold(count_docs_fold);

    let idf = Graph::create_from(&split_words);
    idf.add_sort(["doc_id", "text"])?;
    idf.add_reduce(word_count_reduce, ["doc_id", "text"])?;
    idf.add_join(&count_docs, KeySpec::empty(), JoinStrategy::Inner);
    idf.add_sort("text")?;
    idf.add_reduce(idf_counter, "text")?;

    let calc_index = Graph::create_from(&split_words);
    calc_index.add_sort("doc_id")?;
    calc_index.add_reduce(tf_counter, "doc_id")?;
    calc_index.add_sort("text")?;
    calc_index.add_join(&idf, "text", JoinStrategy::Inner);
    calc_index.add_sort("text")?;
    calc_index.add_reduce(invert_index, "text")?;
    calc_index.add_sort("text")?;

    let mut sources = Sources::new();
    sources.insert("input".to_string(), Source::from_iter(input));

    let output: Vec<Record> = run(&calc_index, sources)?.collect::<cascade::Result<_>>()?;
    let file = std::fs::File::create(&output_path)?;
    common::write_jsonl(&output, file)?;
    Ok(())
}

fn split_word_map(row: Record) -> cascade::Result<Vec<Record>> {
    let text = match row.get("text") {
        Some(Value::Str(s)) => s.clone(),
        _ => String::new(),
    };
    let doc_id = row.get("doc_id").cloned().unwrap_or(Value::Null);
    Ok(text
        .split_whitespace()
        .map(|w| {
            let word: String = w.chars().filter(|c| c.is_alphabetic()).collect();
            Record::from([
                ("text", word.to_lowercase().into()),
                ("doc_id", doc_id.clone()),
            ])
        })
        .collect())
}

fn count_docs_fold(
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Record> {
    let mut seen = std::collections::HashSet::new();
    for row in rows {
        let row = row?;
        seen.insert(row.get("doc_id").cloned().unwrap_or(Value::Null));
    }
    let mut out = Record::new();
    out.set("total_docs", seen.len() as i64);
    Ok(out)
}

fn word_count_reduce(
    key: Record,
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let count = rows.count();
    let mut out = key;
    out.set("count", count as i64);
    Ok(vec![out])
}

fn idf_counter(
    key: Record,
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let mut freq = 0i64;
    let mut total_docs = 0i64;
    for row in rows {
        let row = row?;
        freq += 1;
        if let Some(Value::Int(n)) = row.get("total_docs") {
            total_docs = *n;
        }
    }
    if freq == 0 {
        return Ok(vec![]);
    }
    let mut out = key;
    out.set("idf", (total_docs as f64 / freq as f64).ln());
    Ok(vec![out])
}

fn tf_counter(
    key: Record,
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let doc_id = key.get("doc_id").cloned().unwrap_or(Value::Null);
    let mut word_count: std::collections::HashMap<String, i64> = std::collections::HashMap::new();
    for row in rows {
        let row = row?;
        if let Some(Value::Str(text)) = row.get("text") {
            *word_count.entry(text.clone()).or_insert(0) += 1;
        }
    }
    let total: i64 = word_count.values().sum();
    Ok(word_count
        .into_iter()
        .map(|(word, count)| {
            Record::from([
                ("doc_id", doc_id.clone()),
                ("text", word.into()),
                ("tf", (count as f64 / total as f64).into()),
            ])
        })
        .collect())
}

fn invert_index(
    _key: Record,
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let mut scored: Vec<Record> = Vec::new();
    for row in rows {
        let mut row = row?;
        let tf = match row.get("tf") {
            Some(Value::Float(f)) => f.into_inner(),
            _ => 0.0,
        };
        let idf = match row.get("idf") {
            Some(Value::Float(f)) => f.into_inner(),
            _ => 0.0,
        };
        row.remove("tf");
        row.remove("idf");
        row.set("tf_idf", tf * idf);
        scored.push(row);
    }
    scored.sort_by(|a, b| {
        let ta = match a.get("tf_idf") {
            Some(Value::Float(f)) => f.into_inner(),
            _ => 0.0,
        };
        let tb = match b.get("tf_idf") {
            Some(Value::Float(f)) => f.into_inner(),
            _ => 0.0,
        };
        tb.partial_cmp(&ta).unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(3);
    Ok(scored)
}
