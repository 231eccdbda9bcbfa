//! Integration tests for MCP tool schemas.
//!
//! These tests verify that the tools exposed by the ui-prompt-mcp server
//! have the correct schemas and advertise the expected arguments.

mod common;

use serde_json::{Value, json};
use ui_prompt_mcp::server::router::TOOL_NAMES;

/// Helper function to validate that a JSON schema contains expected fields
fn schema_has_property(schema: &Value, property: &str) -> bool {
    schema["properties"][property].is_object()
}

fn tool_schema(name: &str) -> Value {
    let server = common::server_with(None);
    let tool = server
        .tool_definitions()
        .into_iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("tool {} not listed", name));
    Value::Object((*tool.input_schema).clone())
}

#[test]
fn test_list_tools_returns_expected_tools() {
    let server = common::server_with(None);
    let listed: Vec<String> = server
        .tool_definitions()
        .iter()
        .map(|t| t.name.to_string())
        .collect();
    assert_eq!(listed, TOOL_NAMES.map(String::from).to_vec());
    for tool in server.tool_definitions() {
        assert!(tool.description.is_some(), "{} has no description", tool.name);
        assert_eq!(tool.input_schema.get("type"), Some(&json!("object")));
    }
}

#[test]
fn test_plain_prompt_schemas_have_optional_request() {
    for name in ["generate_pc_prompt", "generate_app_prompt"] {
        let schema = tool_schema(name);
        assert!(schema_has_property(&schema, "request"));
        assert!(schema.get("required").is_none(), "{} requires nothing", name);
    }
}

#[test]
fn test_enhanced_prompt_platform_enum() {
    let schema = tool_schema("generate_gemini_enhanced_prompt");
    assert!(schema_has_property(&schema, "request"));
    let platforms = schema["properties"]["platform"]["enum"].as_array().unwrap();
    assert_eq!(platforms, &vec![json!("PC"), json!("APP")]);
    assert_eq!(schema["properties"]["platform"]["default"], "PC");
}

#[test]
fn test_suggest_components_schema_structure() {
    let schema = tool_schema("suggest_components");
    assert!(schema_has_property(&schema, "text"));
    assert_eq!(schema["required"], json!(["text"]));

    let server = common::server_with(None);
    let tool = server
        .tool_definitions()
        .into_iter()
        .find(|t| t.name == "suggest_components")
        .unwrap();
    let output = Value::Object((*tool.output_schema.unwrap()).clone());
    assert_eq!(output["required"], json!(["components", "charts"]));
    let tiers = &output["properties"]["components"]["items"]["properties"]["necessity"]["enum"];
    assert_eq!(tiers, &json!(["critical", "important", "optional"]));
}

#[test]
fn test_detailed_help_schema_lists_every_tool() {
    let schema = tool_schema("detailed_help");
    assert_eq!(schema["required"], json!(["tool"]));
    let tools = schema["properties"]["tool"]["enum"].as_array().unwrap();
    assert_eq!(tools.len(), TOOL_NAMES.len());
    for name in TOOL_NAMES {
        assert!(tools.contains(&json!(name)), "{}", name);
    }
    let formats = schema["properties"]["format"]["enum"].as_array().unwrap();
    assert!(formats.contains(&json!("compact")));
    assert!(formats.contains(&json!("full")));
}
