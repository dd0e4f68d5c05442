// src/optimizer/schema.rs
//! Response schema declared to the model, and validation of what comes back
//!
//! The schema uses the uppercase type names of the Gemini API. The same value
//! is sent as `responseSchema` and used to check the returned JSON, so the
//! two can never drift apart.

use serde_json::{json, Map, Value};

use crate::error::OptimizationError;

/// Schema of an `OptimizationResult` document
pub fn optimization_result_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    json!({
        "type": "OBJECT",
        "properties": {
            "optimizedResume": {
                "type": "OBJECT",
                "properties": {
                    "personalInfo": {
                        "type": "OBJECT",
                        "properties": {
                            "fullName": { "type": "STRING" },
                            "email": { "type": "STRING" },
                            "phone": { "type": "STRING" },
                            "location": { "type": "STRING" },
                            "linkedin": { "type": "STRING" },
                            "website": { "type": "STRING" }
                        },
                        "required": ["fullName", "email", "phone", "location"]
                    },
                    "summary": { "type": "STRING" },
                    "experience": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "company": { "type": "STRING" },
                                "role": { "type": "STRING" },
                                "startDate": { "type": "STRING" },
                                "endDate": { "type": "STRING" },
                                "description": string_list
                            },
                            "required": ["company", "role", "startDate", "endDate", "description"]
                        }
                    },
                    "education": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "school": { "type": "STRING" },
                                "degree": { "type": "STRING" },
                                "graduationDate": { "type": "STRING" },
                                "location": { "type": "STRING" }
                            },
                            "required": ["school", "degree", "graduationDate"]
                        }
                    },
                    "skills": string_list
                },
                "required": ["personalInfo", "summary", "experience", "education", "skills"]
            },
            "atsScore": { "type": "NUMBER" },
            "suggestions": string_list,
            "matchedKeywords": string_list,
            "missingKeywords": string_list
        },
        "required": ["optimizedResume", "atsScore", "suggestions", "matchedKeywords", "missingKeywords"]
    })
}

/// Remove a surrounding Markdown code fence, with or without a language tag
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string on the opening line, e.g. "json"
    let body = match rest.find('\n') {
        Some(newline) if rest[..newline].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[newline + 1..]
        }
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Check `value` against a schema, reporting the JSON path of the first mismatch
pub fn validate(value: &Value, schema: &Value) -> Result<(), OptimizationError> {
    validate_at(value, schema, "$")
}

fn validate_at(value: &Value, schema: &Value, path: &str) -> Result<(), OptimizationError> {
    let expected = schema.get("type").and_then(Value::as_str).unwrap_or("");

    match (expected, value) {
        ("OBJECT", Value::Object(fields)) => validate_object(fields, schema, path),
        ("ARRAY", Value::Array(items)) => match schema.get("items") {
            Some(item_schema) => items.iter().enumerate().try_for_each(|(i, item)| {
                validate_at(item, item_schema, &format!("{}[{}]", path, i))
            }),
            None => Ok(()),
        },
        ("STRING", Value::String(_)) | ("BOOLEAN", Value::Bool(_)) => Ok(()),
        ("NUMBER", Value::Number(_)) => Ok(()),
        ("INTEGER", Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(()),
        ("", _) => Ok(()),
        (expected, found) => Err(mismatch(
            path,
            format!("expected {}, found {}", expected.to_lowercase(), kind_of(found)),
        )),
    }
}

fn validate_object(
    fields: &Map<String, Value>,
    schema: &Value,
    path: &str,
) -> Result<(), OptimizationError> {
    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();

    for name in &required {
        match fields.get(*name) {
            None | Some(Value::Null) => {
                return Err(mismatch(
                    &format!("{}.{}", path, name),
                    "required property is missing".to_string(),
                ))
            }
            Some(_) => {}
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (name, property_schema) in properties {
        match fields.get(name) {
            // Optional properties may be null or absent
            None | Some(Value::Null) => {}
            Some(field) => validate_at(field, property_schema, &format!("{}.{}", path, name))?,
        }
    }

    Ok(())
}

fn mismatch(path: &str, reason: String) -> OptimizationError {
    OptimizationError::SchemaMismatch {
        path: path.to_string(),
        reason,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
