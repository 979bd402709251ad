//! Pre-built sample datasets mirroring the scenarios this crate's
//! `demos/` programs run against.

use crate::record::Record;

/// A handful of short documents, suitable for word-count and
/// inverted-index style graphs. Each record has `doc_id` and `text`.
#[must_use]
pub fn sample_documents() -> Vec<Record> {
    vec![
        Record::from([
            ("doc_id", "1".into()),
            ("text", "hello world hello".into()),
        ]),
        Record::from([
            ("doc_id", "2".into()),
            ("text", "world of rust programming".into()),
        ]),
        Record::from([
            ("doc_id", "3".into()),
            ("text", "hello rust hello world".into()),
        ]),
    ]
}

/// Road-network edges for the Yandex-Maps-style average-speed demo:
/// `edge_id`, `start` (`[lon, lat]`), `end` (`[lon, lat]`).
#[must_use]
pub fn sample_road_edges() -> Vec<Record> {
    vec![
        Record::from([
            ("edge_id", 1i64.into()),
            ("start_lon", 37.84870.into()),
            ("start_lat", 55.73444.into()),
            ("end_lon", 37.85270.into()),
            ("end_lat", 55.73438.into()),
        ]),
        Record::from([
            ("edge_id", 2i64.into()),
            ("start_lon", 37.85270.into()),
            ("start_lat", 55.73438.into()),
            ("end_lon", 37.85628.into()),
            ("end_lat", 55.73678.into()),
        ]),
    ]
}

/// Vehicle crossing times for the same road network: `edge_id`,
/// `enter_time`, `leave_time` (`%Y%m%dT%H%M%S.%f`-formatted strings).
#[must_use]
pub fn sample_road_times() -> Vec<Record> {
    vec![
        Record::from([
            ("edge_id", 1i64.into()),
            ("enter_time", "20171020T112238.723000".into()),
            ("leave_time", "20171020T112238.956000".into()),
        ]),
        Record::from([
            ("edge_id", 2i64.into()),
            ("enter_time", "20171011T145553.040000".into()),
            ("leave_time", "20171011T145551.957000".into()),
        ]),
    ]
}
