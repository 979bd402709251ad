//! Properties of the single-graph operators: identity, map composition,
//! sort, reduce, and fold.

use cascade::testing::assertions::{assert_records_equal, assert_records_unordered_equal};
use cascade::{run, CascadeError, Graph, Record, Source, Sources};

fn records(pairs: &[(i64, i64)]) -> Vec<Record> {
    pairs
        .iter()
        .map(|(k, v)| Record::from([("k", (*k).into()), ("v", (*v).into())]))
        .collect()
}

fn run_graph(graph: &Graph, name: &str, input: Vec<Record>) -> cascade::Result<Vec<Record>> {
    let mut sources = Sources::new();
    sources.insert(name.to_string(), Source::from_iter(input));
    run(graph, sources)?.collect()
}

#[test]
fn empty_pipeline_is_identity() -> cascade::Result<()> {
    let graph = Graph::create("xs");
    let input = records(&[(1, 10), (2, 20), (3, 30)]);
    let output = run_graph(&graph, "xs", input.clone())?;
    assert_records_equal(&output, &input);
    Ok(())
}

#[test]
fn two_maps_compose_like_one() -> cascade::Result<()> {
    let chained = Graph::create("xs");
    chained.add_map(|mut r| {
        let v = match r.get("v") {
            Some(cascade::Value::Int(n)) => *n,
            _ => 0,
        };
        r.set("v", v * 2);
        Ok(vec![r])
    });
    chained.add_map(|mut r| {
        let v = match r.get("v") {
            Some(cascade::Value::Int(n)) => *n,
            _ => 0,
        };
        r.set("v", v + 3);
        Ok(vec![r])
    });

    let single_step = Graph::create("xs");
    single_step.add_map(|mut r| {
        let v = match r.get("v") {
            Some(cascade::Value::Int(n)) => *n,
            _ => 0,
        };
        r.set("v", v * 2 + 3);
        Ok(vec![r])
    });

    let input = records(&[(1, 5), (2, 7)]);
    let chained_out = run_graph(&chained, "xs", input.clone())?;
    let fused_out = run_graph(&single_step, "xs", input.clone())?;
    assert_records_equal(&chained_out, &fused_out);
    Ok(())
}

#[test]
fn sort_is_a_permutation_ascending_on_key() -> cascade::Result<()> {
    let graph = Graph::create("xs");
    graph.add_sort("k")?;
    let input = records(&[(3, 0), (1, 0), (2, 0)]);
    let output = run_graph(&graph, "xs", input.clone())?;

    assert_records_unordered_equal(&output, &input);
    let keys: Vec<i64> = output
        .iter()
        .map(|r| match r.get("k") {
            Some(cascade::Value::Int(n)) => *n,
            _ => panic!("missing k"),
        })
        .collect();
    let mut sorted_keys = keys.clone();
    sorted_keys.sort();
    assert_eq!(keys, sorted_keys);
    Ok(())
}

#[test]
fn reduce_groups_match_key_multiset() -> cascade::Result<()> {
    let graph = Graph::create("xs");
    graph.add_sort("k")?;
    graph.add_reduce(
        |key, group| {
            let mut out = key;
            out.set("count", group.count() as i64);
            Ok(vec![out])
        },
        "k",
    )?;

    let input = records(&[(1, 0), (1, 0), (2, 0), (1, 0), (3, 0), (2, 0)]);
    let output = run_graph(&graph, "xs", input)?;

    let mut counts: Vec<(i64, i64)> = output
        .iter()
        .map(|r| {
            let k = match r.get("k") {
                Some(cascade::Value::Int(n)) => *n,
                _ => panic!("missing k"),
            };
            let count = match r.get("count") {
                Some(cascade::Value::Int(n)) => *n,
                _ => panic!("missing count"),
            };
            (k, count)
        })
        .collect();
    counts.sort();
    assert_eq!(counts, vec![(1, 3), (2, 2), (3, 1)]);
    Ok(())
}

#[test]
fn fold_emits_one_record_over_full_input() -> cascade::Result<()> {
    let graph = Graph::create("xs");
    graph.add_fold(|rows| {
        let mut total = 0i64;
        let mut count = 0i64;
        for row in rows {
            let row = row?;
            if let Some(cascade::Value::Int(n)) = row.get("v") {
                total += n;
            }
            count += 1;
        }
        let mut out = Record::new();
        out.set("total", total);
        out.set("count", count);
        Ok(out)
    });

    let input = records(&[(1, 10), (2, 20), (3, 30)]);
    let output = run_graph(&graph, "xs", input)?;

    assert_eq!(output.len(), 1);
    assert_eq!(output[0].get("total"), Some(&cascade::Value::Int(60)));
    assert_eq!(output[0].get("count"), Some(&cascade::Value::Int(3)));
    Ok(())
}

#[derive(Debug)]
struct BadRow(i64);

impl std::fmt::Display for BadRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} is not allowed", self.0)
    }
}

impl std::error::Error for BadRow {}

#[test]
fn mapper_error_surfaces_as_user_error() {
    let graph = Graph::create("xs");
    graph.add_map(|r| {
        let v = match r.get("v") {
            Some(cascade::Value::Int(n)) => *n,
            _ => 0,
        };
        if v == 20 {
            return Err(CascadeError::user(BadRow(v)));
        }
        Ok(vec![r])
    });

    let input = records(&[(1, 10), (2, 20), (3, 30)]);
    let err = run_graph(&graph, "xs", input).expect_err("mapper error must propagate");
    match err {
        CascadeError::User(inner) => {
            assert_eq!(inner.to_string(), "row 20 is not allowed");
        }
        other => panic!("expected CascadeError::User, got {other:?}"),
    }
}

#[test]
fn reducer_error_surfaces_as_user_error() -> cascade::Result<()> {
    let graph = Graph::create("xs");
    graph.add_sort("k")?;
    graph.add_reduce(
        |key, group| {
            let k = match key.get("k") {
                Some(cascade::Value::Int(n)) => *n,
                _ => 0,
            };
            if k == 2 {
                return Err(CascadeError::user(BadRow(k)));
            }
            group.collect::<cascade::Result<Vec<_>>>()
        },
        "k",
    )?;

    let input = records(&[(1, 10), (2, 20), (3, 30)]);
    let err = run_graph(&graph, "xs", input).expect_err("reducer error must propagate");
    match err {
        CascadeError::User(inner) => {
            assert_eq!(inner.to_string(), "row 2 is not allowed");
        }
        other => panic!("expected CascadeError::User, got {other:?}"),
    }
    Ok(())
}

#[test]
fn folder_error_surfaces_as_user_error() {
    let graph = Graph::create("xs");
    graph.add_fold(|rows| {
        for row in rows {
            let row = row?;
            if let Some(cascade::Value::Int(n)) = row.get("v") {
                if *n == 20 {
                    return Err(CascadeError::user(BadRow(*n)));
                }
            }
        }
        Ok(Record::new())
    });

    let input = records(&[(1, 10), (2, 20), (3, 30)]);
    let err = run_graph(&graph, "xs", input).expect_err("folder error must propagate");
    match err {
        CascadeError::User(inner) => {
            assert_eq!(inner.to_string(), "row 20 is not allowed");
        }
        other => panic!("expected CascadeError::User, got {other:?}"),
    }
}

#[test]
fn reduce_and_sort_reject_empty_keys() {
    let graph = Graph::create("xs");
    assert!(matches!(
        graph.add_sort(Vec::<String>::new()),
        Err(CascadeError::Config(_))
    ));
    assert!(matches!(
        graph.add_reduce(|k, _g| Ok(vec![k]), Vec::<String>::new()),
        Err(CascadeError::Config(_))
    ));
}
