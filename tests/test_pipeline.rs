/// Pipeline correctness tests: order lifecycle, aggregation and ranking

use pitch_volume::{
    aggregate_volume, DecodePolicy, Pipeline, PipelineConfig, PipelineError, Symbol,
};

fn add(order_id: &str, shares: u32, symbol: &str) -> String {
    format!("28800011A{:0>12}S{:06}{:<6}0000619200Y", order_id, shares, symbol)
}

fn exec(order_id: &str, shares: u32) -> String {
    format!("28800318E{:0>12}{:06}00000000001A", order_id, shares)
}

fn sym(s: &str) -> Symbol {
    Symbol::from_padded(s.as_bytes()).unwrap()
}

#[test]
fn test_empty_feed() {
    let mut pipeline = Pipeline::default();
    pipeline.run(Vec::<String>::new()).unwrap();

    assert!(pipeline.volumes().is_empty());
    assert!(pipeline.top_performers(10).is_empty());
    assert_eq!(pipeline.stats().total_records(), 0);
}

#[test]
fn test_over_execution_rejected() {
    let records = [
        add("1", 100, "AAPL"),
        exec("1", 40),
        add("2", 50, "MSFT"),
        exec("2", 60),
    ];

    let mut pipeline = Pipeline::default();
    pipeline.run(&records).unwrap();

    assert_eq!(pipeline.volumes().snapshot(), &[(sym("AAPL"), 40)]);
    assert_eq!(pipeline.volumes().get(&sym("MSFT")), None);
    assert_eq!(pipeline.top_performers(1), vec![(sym("AAPL"), 40)]);
    assert_eq!(pipeline.stats().rejected_executions(), 1);
}

#[test]
fn test_remaining_shares_tracked_across_executions() {
    let records = [
        add("7", 100, "IBM"),
        exec("7", 60),
        exec("7", 50), // only 40 left
        exec("7", 40),
    ];

    let mut pipeline = Pipeline::default();
    pipeline.run(&records).unwrap();

    assert_eq!(pipeline.volumes().get(&sym("IBM")), Some(100));
    let order_id = pitch_volume::OrderId::from_bytes(b"000000000007").unwrap();
    assert_eq!(pipeline.tracker().remaining_shares(&order_id), Some(0));
    assert_eq!(pipeline.tracker().order_count(), 1);
}

#[test]
fn test_volume_summed_across_orders() {
    let records = [
        add("1", 100, "AAPL"),
        add("2", 200, "AAPL"),
        add("3", 300, "MSFT"),
        exec("1", 100),
        exec("2", 150),
        exec("3", 10),
    ];

    let volumes = aggregate_volume(&records).unwrap();
    assert_eq!(volumes.get(&sym("AAPL")), Some(250));
    assert_eq!(volumes.get(&sym("MSFT")), Some(10));
    assert_eq!(volumes.total(), 260);
}

#[test]
fn test_unknown_order_halts() {
    let records = [
        add("1", 100, "AAPL"),
        exec("99", 10),
        exec("1", 10),
    ];

    let mut pipeline = Pipeline::default();
    let err = pipeline.run(&records).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownOrder { record: 2, .. }));

    // nothing after the failing record was applied
    assert!(pipeline.volumes().is_empty());
}

#[test]
fn test_unknown_order_fatal_even_when_skipping() {
    let mut pipeline = Pipeline::new(PipelineConfig {
        decode_policy: DecodePolicy::Skip,
        ..PipelineConfig::default()
    });
    let result = pipeline.run([exec("5", 1)]);
    assert!(matches!(result, Err(PipelineError::UnknownOrder { .. })));
}

#[test]
fn test_duplicate_add_overwrites() {
    let records = [
        add("1", 100, "AAPL"),
        add("1", 10, "MSFT"),
        exec("1", 50), // over the replacement's 10 shares
        exec("1", 10),
    ];

    let mut pipeline = Pipeline::default();
    pipeline.run(&records).unwrap();

    assert_eq!(pipeline.volumes().snapshot(), &[(sym("MSFT"), 10)]);
    assert_eq!(pipeline.stats().duplicate_adds(), 1);
}

#[test]
fn test_other_messages_pass_through() {
    let records = [
        add("1", 100, "AAPL"),
        "28800168X000000000001000100".to_string(),
        "S28800168P000000000001".to_string(),
        exec("1", 25),
    ];

    let mut pipeline = Pipeline::default();
    pipeline.run(&records).unwrap();

    assert_eq!(pipeline.volumes().get(&sym("AAPL")), Some(25));
    assert_eq!(pipeline.stats().other_messages(), 2);
    assert_eq!(pipeline.stats().other_messages_of(b'X'), 1);
}

#[test]
fn test_ranking_order_and_ties() {
    let records = [
        add("1", 1000, "ZVZZT"),
        add("2", 1000, "AAPL"),
        add("3", 1000, "SPY"),
        add("4", 1000, "QQQ"),
        exec("1", 300),
        exec("2", 300),
        exec("3", 500),
        exec("4", 100),
    ];

    let mut pipeline = Pipeline::default();
    pipeline.run(&records).unwrap();

    assert_eq!(
        pipeline.top_performers(10),
        vec![
            (sym("SPY"), 500),
            (sym("AAPL"), 300),
            (sym("ZVZZT"), 300),
            (sym("QQQ"), 100),
        ]
    );
    assert_eq!(pipeline.top_performers(2).len(), 2);
    assert!(pipeline.top_performers(0).is_empty());
    assert_eq!(pipeline.top_performers(3), pipeline.top_performers(3));
}

#[test]
fn test_zero_share_execution_listed() {
    let records = [add("1", 0, "NOP"), exec("1", 0)];
    let volumes = aggregate_volume(&records).unwrap();
    assert_eq!(volumes.snapshot(), &[(sym("NOP"), 0)]);
}

#[test]
fn test_reader_with_session_markers() {
    let feed = [
        format!("S{}", add("1", 100, "AAPL")),
        format!("S{}", exec("1", 100)),
        add("2", 20, "MSFT"),
        exec("2", 20),
    ]
    .join("\n");

    let mut pipeline = Pipeline::default();
    pipeline.run_reader(feed.as_bytes()).unwrap();

    assert_eq!(
        pipeline.top_performers(10),
        vec![(sym("AAPL"), 100), (sym("MSFT"), 20)]
    );
}

#[test]
fn test_reader_blank_line_is_decode_error() {
    let feed = format!("{}\n\n{}\n", add("1", 100, "AAPL"), exec("1", 5));

    let mut pipeline = Pipeline::default();
    let err = pipeline.run_reader(feed.as_bytes()).unwrap_err();
    assert!(matches!(err, PipelineError::Decode { record: 2, .. }));

    let mut lenient = Pipeline::new(PipelineConfig {
        decode_policy: DecodePolicy::Skip,
        ..PipelineConfig::default()
    });
    lenient.run_reader(feed.as_bytes()).unwrap();
    assert_eq!(lenient.stats().skipped_records(), 1);
    assert_eq!(lenient.volumes().get(&sym("AAPL")), Some(5));
}
