//! Join-strategy and column-collision properties.

use cascade::testing::assertions::assert_records_unordered_equal;
use cascade::{run, CascadeError, Graph, JoinStrategy, Record, Source, Sources};

fn run_two(left: &Graph, right_name: &str, left_name: &str, left_in: Vec<Record>, right_in: Vec<Record>) -> cascade::Result<Vec<Record>> {
    let mut sources = Sources::new();
    sources.insert(left_name.to_string(), Source::from_iter(left_in));
    sources.insert(right_name.to_string(), Source::from_iter(right_in));
    run(left, sources)?.collect()
}

fn kv(k: i64) -> Record {
    Record::from([("k", k.into())])
}

fn joined_graph(strategy: JoinStrategy) -> cascade::Result<Graph> {
    let left = Graph::create("left");
    let right = Graph::create("right");
    left.add_join(&right, "k", strategy);
    Ok(left)
}

#[test]
fn inner_join_keeps_only_matches() -> cascade::Result<()> {
    let graph = joined_graph(JoinStrategy::Inner)?;
    let out = run_two(&graph, "right", "left", vec![kv(1), kv(2)], vec![kv(1), kv(3)])?;
    assert_records_unordered_equal(&out, &[kv(1)]);
    Ok(())
}

#[test]
fn left_join_keeps_unmatched_left() -> cascade::Result<()> {
    let graph = joined_graph(JoinStrategy::Left)?;
    let out = run_two(&graph, "right", "left", vec![kv(1), kv(2)], vec![kv(1), kv(3)])?;
    assert_records_unordered_equal(&out, &[kv(1), kv(2)]);
    Ok(())
}

#[test]
fn right_join_keeps_unmatched_right() -> cascade::Result<()> {
    let graph = joined_graph(JoinStrategy::Right)?;
    let out = run_two(&graph, "right", "left", vec![kv(1), kv(2)], vec![kv(1), kv(3)])?;
    assert_records_unordered_equal(&out, &[kv(1), kv(3)]);
    Ok(())
}

#[test]
fn outer_join_keeps_everything() -> cascade::Result<()> {
    let graph = joined_graph(JoinStrategy::Outer)?;
    let out = run_two(&graph, "right", "left", vec![kv(1), kv(2)], vec![kv(1), kv(3)])?;
    assert_records_unordered_equal(&out, &[kv(1), kv(2), kv(3)]);
    Ok(())
}

#[test]
fn colliding_non_key_fields_get_dot_prefixed() -> cascade::Result<()> {
    let left = Graph::create("left");
    let right = Graph::create("right");
    left.add_join(&right, "k", JoinStrategy::Inner);

    let row = |i: i64| Record::from([("k", i.into()), ("v", i.into())]);
    let input = vec![row(1), row(2)];

    let out = run_two(&left, "right", "left", input.clone(), input)?;

    for record in &out {
        let k = record.get("k").cloned();
        let v = record.get("v").cloned();
        let dot_v = record.get(".v").cloned();
        assert_eq!(v, k);
        assert_eq!(dot_v, k);
    }
    Ok(())
}

#[test]
fn unsorted_reduce_input_fails_with_order_error() {
    let graph = Graph::create("xs");
    graph
        .add_reduce(|key, _group| Ok(vec![key]), "k")
        .unwrap();

    let mut sources = Sources::new();
    sources.insert(
        "xs".to_string(),
        Source::from_iter(vec![kv(2), kv(1)]),
    );
    let err = run(&graph, sources)
        .and_then(|it| it.collect::<cascade::Result<Vec<_>>>())
        .unwrap_err();
    assert!(matches!(err, CascadeError::Order(_)));
}

#[test]
fn unsorted_join_input_fails_with_order_error() {
    let left = Graph::create("left");
    let right = Graph::create("right");
    left.add_join(&right, "k", JoinStrategy::Inner);

    let err = run_two(&left, "right", "left", vec![kv(2), kv(1)], vec![kv(1)]).unwrap_err();
    assert!(matches!(err, CascadeError::Order(_)));
}
