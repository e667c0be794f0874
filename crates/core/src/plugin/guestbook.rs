//! Guestbook form configuration: custom fields, column DDL, and
//! submission validation.
//!
//! The guestbook stores submissions in real table columns, one per
//! configured field. Field definitions therefore do double duty: they
//! render the `ALTER TABLE` column DDL and they validate incoming
//! submissions before anything touches the database.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Maximum length of a custom field identifier.
const MAX_FIELD_NAME_LEN: usize = 50;

/// Input type of a guestbook form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    Text,
    Number,
    Textarea,
    Radio,
    Checkbox,
    Select,
}

impl CustomFieldType {
    /// Whether submissions must match one of the declared options.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }
}

/// A configurable guestbook form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    /// Display label shown on the form.
    pub name: String,
    /// Column identifier, `^[a-z][a-z0-9_]*$`, at most 50 chars.
    pub field_name: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    pub required: bool,
    /// System fields always exist and cannot be removed via config.
    pub is_system: bool,
    /// Option source for radio/checkbox/select, one option per line.
    #[serde(default)]
    pub content: String,
}

impl CustomField {
    /// Split the option source into trimmed, non-empty items.
    pub fn split_content(&self) -> Vec<&str> {
        self.content
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Render the column DDL fragment for this field.
    ///
    /// Required columns carry a default so `ALTER TABLE ADD COLUMN` still
    /// succeeds on a populated table.
    pub fn column_ddl(&self) -> Result<String, CoreError> {
        if !is_valid_field_name(&self.field_name) {
            return Err(CoreError::Validation(format!(
                "invalid field_name '{}': must match ^[a-z][a-z0-9_]*$ and be at most {} chars",
                self.field_name, MAX_FIELD_NAME_LEN
            )));
        }

        let mut column = format!("\"{}\"", self.field_name);

        match self.field_type {
            CustomFieldType::Number => column.push_str(" integer"),
            CustomFieldType::Textarea => column.push_str(" text"),
            _ => column.push_str(" varchar(250)"),
        }

        if self.required {
            match self.field_type {
                CustomFieldType::Number => column.push_str(" NOT NULL DEFAULT 0"),
                _ => column.push_str(" NOT NULL DEFAULT ''"),
            }
        } else {
            column.push_str(" DEFAULT NULL");
        }

        Ok(column)
    }
}

/// Check a custom field identifier against the column-name rules.
pub fn is_valid_field_name(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("static regex"));
    name.len() <= MAX_FIELD_NAME_LEN && re.is_match(name)
}

/// Guestbook plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestbookConfig {
    /// Message shown to the visitor after a successful submission.
    pub return_message: String,
    /// Extra fields beyond the system defaults.
    pub fields: Vec<CustomField>,
}

impl GuestbookConfig {
    /// System fields plus configured extras.
    ///
    /// Extras that collide with a system `field_name` are dropped so the
    /// fixed schema always wins.
    pub fn all_fields(&self) -> Vec<CustomField> {
        let mut fields = default_fields();
        for field in &self.fields {
            if !fields.iter().any(|f| f.field_name == field.field_name) {
                fields.push(field.clone());
            }
        }
        fields
    }
}

/// The three system fields every guestbook form carries.
pub fn default_fields() -> Vec<CustomField> {
    vec![
        CustomField {
            name: "Name".to_string(),
            field_name: "user_name".to_string(),
            field_type: CustomFieldType::Text,
            required: true,
            is_system: true,
            content: String::new(),
        },
        CustomField {
            name: "Contact".to_string(),
            field_name: "contact".to_string(),
            field_type: CustomFieldType::Text,
            required: true,
            is_system: true,
            content: String::new(),
        },
        CustomField {
            name: "Message".to_string(),
            field_name: "content".to_string(),
            field_type: CustomFieldType::Textarea,
            required: true,
            is_system: true,
            content: String::new(),
        },
    ]
}

/// A validated submission value, typed for column binding.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

/// One validated field of a guestbook submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedField {
    pub field_name: String,
    pub value: FieldValue,
}

/// Validate a raw JSON submission against a field set.
///
/// - Required fields must be present and non-empty.
/// - Number fields must parse as integers.
/// - Option-typed fields must submit declared options; checkbox values may
///   be comma-joined.
/// - Keys not in the field set are ignored.
///
/// Omitted optional fields are dropped from the result so their columns
/// keep their DB defaults.
pub fn validate_submission(
    fields: &[CustomField],
    submission: &Value,
) -> Result<Vec<ValidatedField>, CoreError> {
    let object = submission.as_object().ok_or_else(|| {
        CoreError::Validation("guestbook submission must be a JSON object".to_string())
    })?;

    let mut validated = Vec::with_capacity(fields.len());

    for field in fields {
        let raw = object.get(&field.field_name);

        let text = match raw {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "field '{}' has unsupported value type: {other}",
                    field.field_name
                )))
            }
        };

        if text.is_empty() {
            if field.required {
                return Err(CoreError::Validation(format!(
                    "field '{}' is required",
                    field.name
                )));
            }
            continue;
        }

        if field.field_type == CustomFieldType::Number {
            let number: i64 = text.parse().map_err(|_| {
                CoreError::Validation(format!("field '{}' must be a number", field.name))
            })?;
            validated.push(ValidatedField {
                field_name: field.field_name.clone(),
                value: FieldValue::Integer(number),
            });
            continue;
        }

        if field.field_type.has_options() {
            let options = field.split_content();
            let values: Vec<&str> = if field.field_type == CustomFieldType::Checkbox {
                text.split(',').map(str::trim).collect()
            } else {
                vec![text.as_str()]
            };
            for value in &values {
                if !options.contains(value) {
                    return Err(CoreError::Validation(format!(
                        "field '{}' does not accept '{value}'",
                        field.name
                    )));
                }
            }
        }

        validated.push(ValidatedField {
            field_name: field.field_name.clone(),
            value: FieldValue::Text(text),
        });
    }

    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn field(name: &str, field_type: CustomFieldType, required: bool) -> CustomField {
        CustomField {
            name: name.to_string(),
            field_name: name.to_string(),
            field_type,
            required,
            is_system: false,
            content: String::new(),
        }
    }

    // -- split_content -------------------------------------------------------

    #[test]
    fn split_content_trims_and_drops_empties() {
        let mut f = field("color", CustomFieldType::Select, false);
        f.content = "  red \n\nblue\n green \n".to_string();
        assert_eq!(f.split_content(), vec!["red", "blue", "green"]);
    }

    // -- column_ddl ----------------------------------------------------------

    #[test]
    fn number_column_ddl() {
        let f = field("age", CustomFieldType::Number, true);
        assert_eq!(
            f.column_ddl().unwrap(),
            "\"age\" integer NOT NULL DEFAULT 0"
        );
    }

    #[test]
    fn textarea_column_ddl() {
        let f = field("remarks", CustomFieldType::Textarea, false);
        assert_eq!(f.column_ddl().unwrap(), "\"remarks\" text DEFAULT NULL");
    }

    #[test]
    fn text_column_ddl_defaults_to_varchar() {
        let f = field("city", CustomFieldType::Text, true);
        assert_eq!(
            f.column_ddl().unwrap(),
            "\"city\" varchar(250) NOT NULL DEFAULT ''"
        );
    }

    #[test]
    fn hostile_field_name_is_rejected() {
        for bad in ["", "User", "1abc", "a b", "x\"; DROP TABLE --", &"a".repeat(51)] {
            let f = field(bad, CustomFieldType::Text, false);
            assert_matches!(f.column_ddl(), Err(CoreError::Validation(_)), "{bad}");
        }
    }

    // -- all_fields ----------------------------------------------------------

    #[test]
    fn all_fields_prepends_system_fields() {
        let config = GuestbookConfig {
            return_message: String::new(),
            fields: vec![field("company", CustomFieldType::Text, false)],
        };
        let names: Vec<_> = config
            .all_fields()
            .iter()
            .map(|f| f.field_name.clone())
            .collect();
        assert_eq!(names, vec!["user_name", "contact", "content", "company"]);
    }

    #[test]
    fn extras_cannot_shadow_system_fields() {
        let config = GuestbookConfig {
            return_message: String::new(),
            fields: vec![field("content", CustomFieldType::Number, false)],
        };
        let fields = config.all_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2].field_type, CustomFieldType::Textarea);
    }

    // -- validate_submission -------------------------------------------------

    fn system_submission() -> Value {
        json!({
            "user_name": "Alice",
            "contact": "alice@example.com",
            "content": "Hello there",
        })
    }

    #[test]
    fn valid_submission_passes() {
        let validated = validate_submission(&default_fields(), &system_submission()).unwrap();
        assert_eq!(validated.len(), 3);
        assert_eq!(
            validated[0],
            ValidatedField {
                field_name: "user_name".to_string(),
                value: FieldValue::Text("Alice".to_string()),
            }
        );
    }

    #[test]
    fn missing_required_field_fails() {
        let submission = json!({ "user_name": "Alice" });
        assert_matches!(
            validate_submission(&default_fields(), &submission),
            Err(CoreError::Validation(msg)) if msg.contains("required")
        );
    }

    #[test]
    fn number_field_must_parse() {
        let fields = vec![field("age", CustomFieldType::Number, true)];
        let bad = json!({ "age": "not-a-number" });
        assert_matches!(
            validate_submission(&fields, &bad),
            Err(CoreError::Validation(_))
        );

        let good = json!({ "age": 42 });
        let validated = validate_submission(&fields, &good).unwrap();
        assert_eq!(validated[0].value, FieldValue::Integer(42));
    }

    #[test]
    fn option_field_rejects_undeclared_values() {
        let mut f = field("color", CustomFieldType::Radio, true);
        f.content = "red\nblue".to_string();
        let fields = vec![f];

        assert!(validate_submission(&fields, &json!({ "color": "red" })).is_ok());
        assert_matches!(
            validate_submission(&fields, &json!({ "color": "green" })),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn checkbox_accepts_comma_joined_options() {
        let mut f = field("tags", CustomFieldType::Checkbox, false);
        f.content = "news\nsale\nblog".to_string();
        let fields = vec![f];

        assert!(validate_submission(&fields, &json!({ "tags": "news, blog" })).is_ok());
        assert_matches!(
            validate_submission(&fields, &json!({ "tags": "news, spam" })),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn omitted_optional_field_is_dropped() {
        let fields = vec![field("company", CustomFieldType::Text, false)];
        let validated = validate_submission(&fields, &json!({})).unwrap();
        assert!(validated.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let fields = vec![field("company", CustomFieldType::Text, false)];
        let validated =
            validate_submission(&fields, &json!({ "company": "ACME", "evil": "x" })).unwrap();
        assert_eq!(validated.len(), 1);
    }
}
