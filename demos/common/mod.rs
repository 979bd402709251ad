//! Shared JSON Lines plumbing for the demo binaries: reading a file into
//! `Record`s and writing `Record`s back out, via `serde_json::Value` as
//! the interchange format.

use cascade::{Record, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

pub fn read_jsonl(path: impl AsRef<Path>) -> io::Result<Vec<Record>> {
    let file = File::open(path)?;
    BufReader::new(file)
        .lines()
        .filter(|line| !line.as_ref().map(|l| l.trim().is_empty()).unwrap_or(true))
        .map(|line| {
            let line = line?;
            let json: serde_json::Value = serde_json::from_str(&line)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok(json_to_record(&json))
        })
        .collect()
}

pub fn write_jsonl(records: &[Record], mut out: impl Write) -> io::Result<()> {
    for record in records {
        let json = record_to_json(record);
        writeln!(out, "{json}")?;
    }
    Ok(())
}

fn json_to_record(json: &serde_json::Value) -> Record {
    let obj = json.as_object().expect("each line must be a JSON object");
    obj.iter()
        .map(|(k, v)| (k.clone(), json_to_value(v)))
        .collect()
}

fn json_to_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::from(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::Str(s.clone()),
        other => Value::Str(other.to_string()),
    }
}

fn record_to_json(record: &Record) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (field, value) in record.iter() {
        map.insert(field.to_string(), value_to_json(value));
    }
    serde_json::Value::Object(map)
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Value::from(f.into_inner()),
        Value::Str(s) => serde_json::Value::String(s.clone()),
    }
}
