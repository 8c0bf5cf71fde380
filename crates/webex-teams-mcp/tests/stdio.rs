//! Stdio loop behavior: framing, ordering, and cancellation.

mod common;

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use webex_teams_mcp::protocol::ProtocolHandler;
use webex_teams_mcp::transport::StdioTransport;
use webex_teams_mcp::types::error_codes;

use common::{Behavior, StubApi};

/// Feed `lines` to a transport and collect every response it writes.
async fn run_lines(api: StubApi, lines: &[Value]) -> Vec<Value> {
    let input: String = lines.iter().map(|l| format!("{l}\n")).collect();
    run_raw(api, input).await
}

async fn run_raw(api: StubApi, input: String) -> Vec<Value> {
    run_bytes(api, input.into_bytes()).await
}

async fn run_bytes(api: StubApi, input: Vec<u8>) -> Vec<Value> {
    let transport = StdioTransport::new(ProtocolHandler::new(Arc::new(api)));
    let mut output = Vec::new();

    tokio::time::timeout(
        Duration::from_secs(5),
        transport.serve(Cursor::new(input), &mut output),
    )
    .await
    .expect("transport should finish at EOF")
    .expect("transport should not fail");

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn call(id: i64, tool: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": {} }
    })
}

fn ping(id: i64) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "method": "ping" })
}

fn cancel(id: i64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "notifications/cancelled",
        "params": { "requestId": id, "reason": "user abort" }
    })
}

#[tokio::test]
async fn test_eof_without_input_exits_cleanly() {
    let responses = run_raw(StubApi::seeded(), String::new()).await;
    assert!(responses.is_empty());
}

#[tokio::test]
async fn test_malformed_json_gets_parse_error_with_null_id() {
    let responses = run_raw(
        StubApi::seeded(),
        format!("{{not json\n\n{}\n", ping(1)),
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], error_codes::PARSE_ERROR);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 1);
}

#[tokio::test]
async fn test_invalid_utf8_line_gets_parse_error_and_loop_continues() {
    let mut input = b"\xff\xfe not text\n".to_vec();
    input.extend_from_slice(format!("{}\n", ping(1)).as_bytes());

    let responses = run_bytes(StubApi::seeded(), input).await;

    assert_eq!(responses.len(), 2, "{responses:?}");
    assert_eq!(responses[0]["error"]["code"], error_codes::PARSE_ERROR);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 1);
    assert!(responses[1]["result"].is_object());
}

#[tokio::test]
async fn test_notifications_produce_no_output() {
    let responses = run_lines(
        StubApi::seeded(),
        &[json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }), ping(1)],
    )
    .await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 1);
}

#[tokio::test]
async fn test_cancelled_call_gets_no_response() {
    let api = StubApi::seeded().with_behavior(Behavior::Hang);
    let responses = run_lines(api, &[call(1, "get_my_details"), cancel(1), ping(2)]).await;

    assert_eq!(responses.len(), 1, "{responses:?}");
    assert_eq!(responses[0]["id"], 2);
}

#[tokio::test]
async fn test_cancellation_of_another_id_is_ignored() {
    let api = StubApi::seeded().with_behavior(Behavior::Delay(Duration::from_millis(20)));
    let responses = run_lines(api, &[call(1, "get_my_details"), cancel(99)]).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["isError"], false);
}

#[tokio::test]
async fn test_lines_during_a_call_are_answered_in_order() {
    let api = StubApi::seeded().with_behavior(Behavior::Delay(Duration::from_millis(50)));
    let responses = run_lines(
        api,
        &[call(1, "list_spaces"), ping(2), call(3, "get_my_details")],
    )
    .await;

    let ids: Vec<&Value> = responses.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, [&json!(1), &json!(2), &json!(3)]);
    assert_eq!(responses[2]["result"]["isError"], false);
}

#[tokio::test]
async fn test_queued_request_cancelled_before_it_starts() {
    let api = StubApi::seeded().with_behavior(Behavior::Delay(Duration::from_millis(50)));
    let responses = run_lines(
        api,
        &[call(1, "list_spaces"), call(2, "get_my_details"), cancel(2), ping(3)],
    )
    .await;

    let ids: Vec<&Value> = responses.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, [&json!(1), &json!(3)]);
}
