//! Properties about how the planner and runner share and re-run graphs:
//! a name used by more than one sub-graph, a diamond dependency, and
//! re-running the same graph handle with fresh inputs.

use cascade::testing::assertions::assert_records_unordered_equal;
use cascade::{run, Graph, JoinStrategy, KeySpec, Record, Source, Sources};

fn kv(k: i64) -> Record {
    Record::from([("k", k.into())])
}

#[test]
fn shared_source_name_is_materialized_once_for_both_readers() -> cascade::Result<()> {
    let left = Graph::create("xs");
    let right = Graph::create("xs");
    let joined = Graph::create_from(&left);
    joined.add_join(&right, KeySpec::empty(), JoinStrategy::Inner);

    let mut sources = Sources::new();
    sources.insert(
        "xs".to_string(),
        Source::from_iter(vec![kv(1), kv(2)]),
    );

    let output: Vec<Record> = run(&joined, sources)?.collect::<cascade::Result<_>>()?;
    assert_eq!(output.len(), 4);
    Ok(())
}

#[test]
fn diamond_dependency_sees_consistent_upstream() -> cascade::Result<()> {
    let base = Graph::create("xs");
    base.add_map(|mut r| {
        r.set("tag", "base");
        Ok(vec![r])
    });

    let via_direct = Graph::create_from(&base);
    let via_detour = Graph::create_from(&base);
    via_detour.add_map(|r| Ok(vec![r]));

    let combined = Graph::create_from(&via_direct);
    combined.add_join(&via_detour, KeySpec::empty(), JoinStrategy::Inner);

    let mut sources = Sources::new();
    sources.insert("xs".to_string(), Source::from_iter(vec![kv(1), kv(2)]));

    let output: Vec<Record> = run(&combined, sources)?.collect::<cascade::Result<_>>()?;
    assert_eq!(output.len(), 4);
    for record in &output {
        assert_eq!(record.get("tag"), Some(&cascade::Value::from("base")));
    }
    Ok(())
}

#[test]
fn rerunning_the_same_graph_handle_is_independent() -> cascade::Result<()> {
    let graph = Graph::create("xs");
    graph.add_map(|mut r| {
        let k = match r.get("k") {
            Some(cascade::Value::Int(n)) => *n,
            _ => 0,
        };
        r.set("k", k * 10);
        Ok(vec![r])
    });

    let mut first_sources = Sources::new();
    first_sources.insert("xs".to_string(), Source::from_iter(vec![kv(1), kv(2)]));
    let first: Vec<Record> = run(&graph, first_sources)?.collect::<cascade::Result<_>>()?;
    assert_records_unordered_equal(&first, &[kv(10), kv(20)]);

    let mut second_sources = Sources::new();
    second_sources.insert("xs".to_string(), Source::from_iter(vec![kv(5)]));
    let second: Vec<Record> = run(&graph, second_sources)?.collect::<cascade::Result<_>>()?;
    assert_records_unordered_equal(&second, &[kv(50)]);

    Ok(())
}
