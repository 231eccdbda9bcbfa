use serde_json::{Map, Value, json};
use std::sync::Arc;

pub fn generate_prompt_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "request": {"type": "string", "description": "UI requirement; the platform default is used when omitted"}
        }
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

pub fn enhanced_prompt_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "request": {"type": "string", "description": "UI requirement; the platform default is used when omitted"},
            "platform": {"type": "string", "enum": ["PC", "APP"], "default": "PC"}
        }
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

pub fn suggest_components_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "text": {"type": "string", "description": "Free-form UI description or screenshot analysis"}
        },
        "required": ["text"]
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

pub fn detailed_help_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "tool": {"type": "string", "enum": [
                "generate_pc_prompt",
                "generate_app_prompt",
                "generate_gemini_enhanced_prompt",
                "suggest_components",
                "detailed_help"
            ]},
            "format": {"type": "string", "enum": ["compact", "full"], "default": "full"}
        },
        "required": ["tool"]
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

fn suggestion_list_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "necessity": {"type": "string", "enum": ["critical", "important", "optional"]},
                "justification": {"type": "string"}
            },
            "required": ["name", "necessity", "justification"]
        }
    })
}

pub fn suggest_components_output_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "components": suggestion_list_schema(),
            "charts": suggestion_list_schema()
        },
        "required": ["components", "charts"]
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}

pub fn detailed_help_output_schema() -> Arc<Map<String, Value>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "tool": {"type": "string"},
            "description": {"type": "string"},
            "summary": {"type": "string"},
            "arguments": {"type": "object"},
            "returns": {}
        }
    });
    Arc::new(schema.as_object().cloned().unwrap_or_else(Map::new))
}
