use super::*;

fn messages_body(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 12, "output_tokens": 7 }
    })
    .to_string()
}

#[test]
fn prefill_brace_is_restored() {
    let body = messages_body(serde_json::json!([{ "type": "text", "text": "\"summary\":\"short\"}" }]));
    let resp = parse_response(&body).unwrap();
    assert_eq!(resp.text(), r#"{"summary":"short"}"#);
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!((resp.input_tokens, resp.output_tokens), (12, 7));
}

#[test]
fn brace_goes_on_first_text_block_after_thinking() {
    let body = messages_body(serde_json::json!([
        { "type": "thinking", "thinking": "plan" },
        { "type": "text", "text": "\"a\":1}" },
        { "type": "future_block", "data": {} }
    ]));
    let resp = parse_response(&body).unwrap();
    assert_eq!(resp.content.len(), 2);
    assert!(matches!(&resp.content[0], ContentBlock::Thinking { thinking } if thinking == "plan"));
    assert_eq!(resp.text(), r#"{"a":1}"#);
}

#[test]
fn missing_stop_reason_defaults() {
    let body = serde_json::json!({
        "content": [{ "type": "text", "text": "}" }],
        "model": "m",
        "usage": { "input_tokens": 1, "output_tokens": 1 }
    })
    .to_string();
    assert_eq!(parse_response(&body).unwrap().stop_reason, "unknown");
}

#[test]
fn malformed_bodies_error() {
    assert!(matches!(parse_response("<html>"), Err(LlmError::ApiParse(_))));
    let no_usage = serde_json::json!({ "content": [], "model": "m" }).to_string();
    assert!(matches!(parse_response(&no_usage), Err(LlmError::ApiParse(_))));
}

#[test]
fn request_appends_prefill_turn() {
    let req = build_request("m", 64, "answer in JSON", &[Message::user("hello")]);
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["system"], "answer in JSON");
    assert_eq!(json["max_tokens"], 64);
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "hello");
    assert_eq!(json["messages"][1]["role"], "assistant");
    assert_eq!(json["messages"][1]["content"], "{");
}

#[test]
fn request_omits_empty_system() {
    let req = build_request("m", 8, "", &[Message::user("x")]);
    let json = serde_json::to_value(&req).unwrap();
    assert!(json.get("system").is_none());
}
