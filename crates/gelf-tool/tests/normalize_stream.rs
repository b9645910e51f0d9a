#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::Value;

use gelf_tool::{config, normalize::Normalizer};

const INPUT: &str = concat!(
    r#"{"version":"1.1","short_message":"first","timestamp":1,"_req":"a1"}"#,
    "\n",
    "\n",
    r#"{"short_message":"second","timestamp":2,"weird":true}"#,
    "\n",
    "not json at all\n",
    r#"{"short_message":"third","timestamp":3,"level":"high"}"#,
    "\n",
    r#"  {"host":"db-2","short_message":"fourth","timestamp":4,"level":3}  "#,
);

fn lines(out: &[u8]) -> Vec<Value> {
    std::str::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn skips_bad_records_and_counts_them() {
    let cfg = config::load_from_str("version: 1\nnormalize:\n  default_host: edge-1\n").unwrap();
    let normalizer = Normalizer::new(cfg);

    let mut out = Vec::new();
    let summary = normalizer.run(INPUT.as_bytes(), &mut out).await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.skipped_by_code.get("UNKNOWN_FIELD"), Some(&1));
    assert_eq!(summary.skipped_by_code.get("MALFORMED_JSON"), Some(&1));
    assert_eq!(summary.skipped_by_code.get("INVALID_FIELD"), Some(&1));

    let recs = lines(&out);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["short_message"], "first");
    assert_eq!(recs[0]["host"], "edge-1");
    assert_eq!(recs[0]["_req"], "a1");
    assert_eq!(recs[1]["host"], "db-2");
    assert_eq!(recs[1]["level"], 3);
}

#[tokio::test]
async fn ignore_policy_keeps_records_with_unknown_keys() {
    let cfg = config::load_from_str("version: 1\ndecode:\n  unknown_fields: ignore\n").unwrap();
    let normalizer = Normalizer::new(cfg);

    let mut out = Vec::new();
    let summary = normalizer.run(INPUT.as_bytes(), &mut out).await.unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.skipped, 2);

    let recs = lines(&out);
    assert_eq!(recs[1]["short_message"], "second");
    assert!(recs[1].get("weird").is_none());
    assert_eq!(recs[1]["version"], "1.1");
}

#[tokio::test]
async fn empty_input_produces_nothing() {
    let normalizer = Normalizer::new(config::ToolConfig::default());
    let mut out = Vec::new();
    let summary = normalizer.run(&b""[..], &mut out).await.unwrap();
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped, 0);
    assert!(out.is_empty());
}
