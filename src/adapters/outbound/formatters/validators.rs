//! Structural checks for emitted SBOM documents.
//!
//! These gate obvious shape problems (missing or mistyped required fields);
//! they are not full schema validators.

use serde_json::Value;

/// Parses `content` as JSON and runs `check` on it
pub fn validate_json(content: &str, check: fn(&Value) -> Vec<String>) -> Vec<String> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => check(&value),
        Err(e) => vec![format!("document is not valid JSON: {}", e)],
    }
}

/// Required SPDX 2.3 top-level and per-file fields
pub fn validate_spdx(doc: &Value) -> Vec<String> {
    let mut problems = Vec::new();
    if !doc.is_object() {
        return vec!["document must be a JSON object".to_string()];
    }

    require_string(doc, "spdxVersion", "document", &mut problems);
    require_string(doc, "documentNamespace", "document", &mut problems);

    let Some(files) = require_array(doc, "files", "document", &mut problems) else {
        return problems;
    };
    for (i, file) in files.iter().enumerate() {
        let at = format!("files[{}]", i);
        require_string(file, "fileName", &at, &mut problems);
        if let Some(checksums) = require_array(file, "checksums", &at, &mut problems) {
            for (j, checksum) in checksums.iter().enumerate() {
                let at = format!("{}.checksums[{}]", at, j);
                require_string(checksum, "algorithm", &at, &mut problems);
                require_string(checksum, "checksumValue", &at, &mut problems);
            }
        }
        optional_string(file, "licenseConcluded", &at, &mut problems);
    }

    problems
}

/// Required CycloneDX 1.6 top-level and per-component fields
pub fn validate_cyclonedx(bom: &Value) -> Vec<String> {
    let mut problems = Vec::new();
    if !bom.is_object() {
        return vec!["document must be a JSON object".to_string()];
    }

    match bom.get("bomFormat") {
        Some(Value::String(format)) if format == "CycloneDX" => {}
        Some(_) => problems.push("document.bomFormat must be \"CycloneDX\"".to_string()),
        None => problems.push("document.bomFormat is required".to_string()),
    }
    require_string(bom, "specVersion", "document", &mut problems);
    optional_string(bom, "serialNumber", "document", &mut problems);
    match bom.get("version") {
        Some(v) if v.is_i64() || v.is_u64() => {}
        Some(_) => problems.push("document.version must be an integer".to_string()),
        None => problems.push("document.version is required".to_string()),
    }

    let Some(components) = require_array(bom, "components", "document", &mut problems) else {
        return problems;
    };
    for (i, component) in components.iter().enumerate() {
        let at = format!("components[{}]", i);
        for field in ["name", "version", "type"] {
            require_string(component, field, &at, &mut problems);
        }
        if component.get("hashes").is_some() {
            if let Some(hashes) = require_array(component, "hashes", &at, &mut problems) {
                for (j, hash) in hashes.iter().enumerate() {
                    let at = format!("{}.hashes[{}]", at, j);
                    require_string(hash, "alg", &at, &mut problems);
                    require_string(hash, "content", &at, &mut problems);
                }
            }
        }
    }

    problems
}

fn require_string(value: &Value, field: &str, at: &str, problems: &mut Vec<String>) {
    match value.get(field) {
        Some(Value::String(_)) => {}
        Some(_) => problems.push(format!("{}.{} must be a string", at, field)),
        None => problems.push(format!("{}.{} is required", at, field)),
    }
}

fn optional_string(value: &Value, field: &str, at: &str, problems: &mut Vec<String>) {
    if let Some(v) = value.get(field) {
        if !v.is_string() {
            problems.push(format!("{}.{} must be a string", at, field));
        }
    }
}

fn require_array<'v>(
    value: &'v Value,
    field: &str,
    at: &str,
    problems: &mut Vec<String>,
) -> Option<&'v Vec<Value>> {
    match value.get(field) {
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            problems.push(format!("{}.{} must be an array", at, field));
            None
        }
        None => {
            problems.push(format!("{}.{} is required", at, field));
            None
        }
    }
}
