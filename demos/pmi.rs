//! Ranks words within each document by pointwise mutual information
//! against the corpus, ported from the original `pmi` example. Only
//! words at least 4 characters long that occur at least twice in at
//! least two documents are considered.
//!
//! Usage: `pmi <input.jsonl> <output.jsonl>`

#[path = "common/mod.rs"]
mod common;

use cascade::{run, Graph, JoinStrategy, KeySpec, Record, Source, Sources, Value};
use std::collections::{HashMap, HashSet};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::try_init().ok();

    let mut args = env::args().skip(1);
    let input_path = args.next().expect("usage: pmi <input.jsonl> <output.jsonl>");
    let output_path = args.next().expect("usage: pmi <input.jsonl> <output.jsonl>");
    let input = common::read_jsonl(&input_path)?;

    let split_words = Graph::create("input");
    split_words.add_map(split_word_map);

    let count_docs = Graph::create("input");
    count_docs.add_fold(count_docs_fold);

    let doc_filter = Graph::create_from(&split_words);
    doc_filter.add_join(&count_docs, KeySpec::empty(), JoinStrategy::Inner);
    doc_filter.add_sort("text")?;
    doc_filter.add_reduce(doc_filter_reducer, "text")?;

    let calc_pmi = Graph::create_from(&split_words);
    calc_pmi.add_sort("text")?;
    calc_pmi.add_join(&doc_filter, "text", JoinStrategy::Inner);
    calc_pmi.add_sort("doc_id")?;
    calc_pmi.add_reduce(pmi_reducer, "doc_id")?;

    let mut sources = Sources::new();
    sources.insert("input".to_string(), Source::from_iter(input));

    let output: Vec<Record> = run(&calc_pmi, sources)?.collect::<cascade::Result<_>>()?;
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
    let mut seen = HashSet::new();
    for row in rows {
        let row = row?;
        seen.insert(row.get("doc_id").cloned().unwrap_or(Value::Null));
    }
    let mut out = Record::new();
    out.set("total_docs", seen.len() as i64);
    Ok(out)
}

/// Keeps only words that occur at least twice in every document they
/// appear in, and in as many documents as the corpus has.
fn doc_filter_reducer(
    key: Record,
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let word = match key.get("text") {
        Some(Value::Str(s)) => s.clone(),
        _ => String::new(),
    };
    if word.chars().count() < 4 {
        return Ok(vec![]);
    }

    let mut docs_with_1: HashSet<Value> = HashSet::new();
    let mut docs_with_2: HashSet<Value> = HashSet::new();
    let mut total_count = 0i64;
    let mut total_docs = 0i64;
    for row in rows {
        let row = row?;
        let doc_id = row.get("doc_id").cloned().unwrap_or(Value::Null);
        if docs_with_2.contains(&doc_id) {
            // already counted twice, ignore further occurrences
        } else if docs_with_1.contains(&doc_id) {
            docs_with_1.remove(&doc_id);
            docs_with_2.insert(doc_id);
        } else {
            docs_with_1.insert(doc_id);
        }
        total_count += 1;
        if let Some(Value::Int(n)) = row.get("total_docs") {
            total_docs = *n;
        }
    }

    if docs_with_2.len() as i64 != total_docs {
        return Ok(vec![]);
    }
    let mut out = Record::new();
    out.set("text", word);
    out.set("total_count", total_count);
    Ok(vec![out])
}

fn pmi_reducer(
    key: Record,
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let doc_id = key.get("doc_id").cloned().unwrap_or(Value::Null);

    let mut word_pmi: HashMap<String, f64> = HashMap::new();
    for row in rows {
        let row = row?;
        let text = match row.get("text") {
            Some(Value::Str(s)) => s.clone(),
            _ => continue,
        };
        let total_count = match row.get("total_count") {
            Some(Value::Int(n)) => *n as f64,
            _ => continue,
        };
        *word_pmi.entry(text).or_insert(0.0) += 1.0 / total_count;
    }

    let mut words: Vec<(String, f64)> = word_pmi.into_iter().collect();
    words.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(words
        .into_iter()
        .map(|(text, pmi)| {
            Record::from([
                ("doc_id", doc_id.clone()),
                ("text", text.into()),
                ("pmi", pmi.into()),
            ])
        })
        .collect())
}
