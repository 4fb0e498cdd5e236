#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use lopdf::content::Content;
use lopdf::{Document, Object};
use serde_json::{json, Value};
use travel_advisor::AdvisorConfig;

pub const ADD_PATH: &str = "/api/v1/gen_tables/action/rows/add";
pub const ROWS_PATH: &str = "/api/v1/gen_tables/action/Travel_Advisor/rows";

pub fn test_config(base_url: &str) -> AdvisorConfig {
    AdvisorConfig::from_toml_str(&format!(
        r#"
[service]
base_url = "{}"
table_id = "Travel_Advisor"
api_key = "test-key"
project_id = "proj_test"
timeout_seconds = 5
"#,
        base_url
    ))
    .unwrap()
}

pub fn row(inputs: (&str, &str, &str), outputs: (&str, &str, &str)) -> Value {
    json!({
        "ID": "generated",
        "Updated at": "2026-10-16T08:30:00Z",
        "Home Country": {"value": inputs.0},
        "Desired Country": {"value": inputs.1},
        "Preferred Activity": {"value": inputs.2},
        "Flight Duration": {"value": outputs.0},
        "Currency": {"value": outputs.1},
        "Activity Locations": {"value": outputs.2}
    })
}

pub fn mock_add_ok(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path(ADD_PATH)
            .header("authorization", "Bearer test-key")
            .header("x-project-id", "proj_test");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"object": "gen_table.completion.rows", "rows": []}));
    })
}

pub fn mock_rows(server: &MockServer, items: Vec<Value>) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path(ROWS_PATH)
            .header("authorization", "Bearer test-key")
            .header("x-project-id", "proj_test");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "items": items }));
    })
}

/// 讀回 PDF 每個 `Tj` 繪出的文字
pub fn drawn_text(bytes: &[u8]) -> Vec<String> {
    let mut doc = Document::load_mem(bytes).unwrap();
    doc.decompress();

    let mut lines = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        for operation in content.operations {
            if operation.operator != "Tj" {
                continue;
            }
            if let Some(Object::String(text, _)) = operation.operands.first() {
                lines.push(text.iter().map(|&b| b as char).collect());
            }
        }
    }
    lines
}
