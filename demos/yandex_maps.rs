//! Computes average vehicle speed per weekday/hour bucket from road-edge
//! geometry and crossing-time logs, ported from the original
//! `yandex_maps` example.
//!
//! Usage: `yandex_maps <edges.jsonl> <times.jsonl> <output.jsonl>`

#[path = "common/mod.rs"]
mod common;

use cascade::{run, Graph, Record, Source, Sources, Value};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::try_init().ok();

    let mut args = env::args().skip(1);
    let edges_path = args.next().expect("usage: yandex_maps <edges.jsonl> <times.jsonl> <output.jsonl>");
    let times_path = args.next().expect("usage: yandex_maps <edges.jsonl> <times.jsonl> <output.jsonl>");
    let output_path = args.next().expect("usage: yandex_maps <edges.jsonl> <times.jsonl> <output.jsonl>");

    let edges_input = common::read_jsonl(&edges_path)?;
    let times_input = common::read_jsonl(&times_path)?;

    let edges = Graph::create("edges_input");
    edges.add_map(edges_mapper);
    edges.add_sort("edge_id")?;

    let times = Graph::create("times_input");
    times.add_map(times_mapper);
    times.add_sort("edge_id")?;
    times.add_join(&edges, "edge_id", cascade::JoinStrategy::Inner);
    times.add_sort(["weekday", "hour"])?;
    times.add_reduce(times_reducer, ["weekday", "hour"])?;
    times.add_sort("hour")?;

    let mut sources = Sources::new();
    sources.insert("edges_input".to_string(), Source::from_iter(edges_input));
    sources.insert("times_input".to_string(), Source::from_iter(times_input));

    let output: Vec<Record> = run(&times, sources)?.collect::<cascade::Result<_>>()?;
    let file = std::fs::File::create(&output_path)?;
    common::write_jsonl(&output, file)?;
    Ok(())
}

/// Great-circle distance in kilometers between two `(lon, lat)` points.
fn haversine_km(start_lon: f64, start_lat: f64, end_lon: f64, end_lat: f64) -> f64 {
    let radius = 6371.0;
    let dlon = start_lon.to_radians() - end_lon.to_radians();
    let dlat = start_lat.to_radians() - end_lat.to_radians();
    let sq_sum = (dlat / 2.0).sin().powi(2)
        + start_lat.to_radians().cos() * end_lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * sq_sum.sqrt().atan2((1.0 - sq_sum).sqrt()) * radius
}

fn as_f64(record: &Record, field: &str) -> f64 {
    match record.get(field) {
        Some(Value::Float(f)) => f.into_inner(),
        Some(Value::Int(n)) => *n as f64,
        _ => 0.0,
    }
}

fn edges_mapper(row: Record) -> cascade::Result<Vec<Record>> {
    let length = haversine_km(
        as_f64(&row, "start_lon"),
        as_f64(&row, "start_lat"),
        as_f64(&row, "end_lon"),
        as_f64(&row, "end_lat"),
    );
    let edge_id = row.get("edge_id").cloned().unwrap_or(Value::Null);
    Ok(vec![Record::from([
        ("edge_id", edge_id),
        ("length", length.into()),
    ])])
}

/// Parses the `%Y%m%dT%H%M%S.%f`-style timestamps the original example
/// uses, returning `(hour, weekday_abbrev, total_seconds)`.
fn parse_timestamp(s: &str) -> (u32, &'static str, f64) {
    const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let date_part = &s[..8];
    let time_part = &s[9..];
    let year: i32 = date_part[0..4].parse().unwrap_or(1970);
    let month: u32 = date_part[4..6].parse().unwrap_or(1);
    let day: u32 = date_part[6..8].parse().unwrap_or(1);
    let hour: u32 = time_part[0..2].parse().unwrap_or(0);
    let minute: u32 = time_part[2..4].parse().unwrap_or(0);
    let second: f64 = time_part[4..].parse().unwrap_or(0.0);

    let days_since_epoch = days_from_civil(year, month, day);
    let weekday = WEEKDAYS[(days_since_epoch.rem_euclid(7) as usize + 3) % 7];
    let total_seconds =
        days_since_epoch as f64 * 86400.0 + hour as f64 * 3600.0 + minute as f64 * 60.0 + second;
    (hour, weekday, total_seconds)
}

/// Howard Hinnant's civil-calendar-to-days algorithm (proleptic
/// Gregorian, days since 1970-01-01).
fn days_from_civil(y: i32, m: u32, d: u32) -> i64 {
    let y = if m <= 2 { y - 1 } else { y } as i64;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as i64;
    let mp = (m as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

fn times_mapper(row: Record) -> cascade::Result<Vec<Record>> {
    let enter = match row.get("enter_time") {
        Some(Value::Str(s)) => s.clone(),
        _ => return Ok(vec![]),
    };
    let leave = match row.get("leave_time") {
        Some(Value::Str(s)) => s.clone(),
        _ => return Ok(vec![]),
    };
    let (hour, weekday, enter_secs) = parse_timestamp(&enter);
    let (_, _, leave_secs) = parse_timestamp(&leave);
    let edge_id = row.get("edge_id").cloned().unwrap_or(Value::Null);
    Ok(vec![Record::from([
        ("edge_id", edge_id),
        ("time", ((leave_secs - enter_secs) / 3600.0).into()),
        ("hour", (hour as i64).into()),
        ("weekday", weekday.into()),
    ])])
}

fn times_reducer(
    key: Record,
    rows: &mut dyn Iterator<Item = cascade::Result<Record>>,
) -> cascade::Result<Vec<Record>> {
    let mut total_time = 0.0;
    let mut total_dist = 0.0;
    for row in rows {
        let row = row?;
        total_dist += as_f64(&row, "length");
        total_time += as_f64(&row, "time");
    }
    let mut out = key;
    out.set("speed", total_dist / total_time);
    Ok(vec![out])
}
