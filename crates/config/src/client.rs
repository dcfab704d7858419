//! Per-client chatbot records
//!
//! A record is read field by field from a loosely typed JSON/YAML document.
//! The only hard requirement is that the document is an object; everything
//! else is optional and a field with an unexpected type is treated as absent.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use std::fmt;

use crate::constants::{default_client, legacy, placeholders};
use crate::ConfigError;

/// Structured contact block (`contact: {phone, email, website}`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl ContactDetails {
    fn from_map(map: &Map<String, JsonValue>) -> Self {
        Self {
            phone: text_field(map, "phone"),
            email: text_field(map, "email"),
            website: text_field(map, "website"),
        }
    }
}

/// The `contact` field in any of the shapes found in stored records
#[derive(Debug, Clone, PartialEq)]
pub enum Contact {
    /// Current shape: an object with optional phone/email/website
    Details(ContactDetails),
    /// Legacy shape: a free-form string
    Text(String),
    /// Anything else; kept so its presence is still visible
    Other(JsonValue),
}

impl Contact {
    fn from_value(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::Object(map) => Some(Contact::Details(ContactDetails::from_map(map))),
            JsonValue::String(text) => Some(Contact::Text(text.clone())),
            other => Some(Contact::Other(other.clone())),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contact::Text(text) => f.write_str(text),
            Contact::Details(details) => {
                let parts: Vec<&str> = [&details.phone, &details.email, &details.website]
                    .into_iter()
                    .filter_map(|v| v.as_deref())
                    .collect();
                f.write_str(&parts.join(", "))
            }
            Contact::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Flat fields of the legacy record shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFields {
    /// Services text; its presence as a string marks the record as legacy
    pub services: String,
    /// Opening hours text
    pub hours: Option<String>,
}

/// Chatbot configuration for one client
///
/// Immutable once loaded. The store builds a fresh value per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    /// Display name of the business
    pub business_name: Option<String>,
    /// Pipe-delimited keyword patterns mapped to responses, in document order
    pub responses: IndexMap<String, String>,
    /// Contact block
    pub contact: Option<Contact>,
    /// Industry name as written in the record
    pub industry: Option<String>,
    /// Preferred fallback override
    pub fallback_response: Option<String>,
    /// Secondary fallback override
    pub fallback: Option<String>,
    /// Present when the record uses the legacy flat-field shape
    pub legacy: Option<LegacyFields>,
}

impl ClientConfig {
    /// Record served for clients without stored configuration
    pub fn builtin_default() -> Self {
        let mut responses = IndexMap::new();
        responses.insert(
            default_client::RESPONSE_PATTERN.to_string(),
            default_client::RESPONSE.to_string(),
        );

        Self {
            business_name: Some(default_client::BUSINESS_NAME.to_string()),
            responses,
            contact: Some(Contact::Details(ContactDetails {
                phone: Some(placeholders::PHONE.to_string()),
                ..Default::default()
            })),
            fallback: Some(default_client::FALLBACK.to_string()),
            ..Default::default()
        }
    }

    /// Read a record from a parsed document
    pub fn from_value(value: &JsonValue) -> Result<Self, ConfigError> {
        let map = value.as_object().ok_or_else(|| {
            ConfigError::ParseError("client config document must be an object".to_string())
        })?;

        let responses = match map.get("responses") {
            Some(JsonValue::Object(entries)) => entries
                .iter()
                .filter_map(|(pattern, response)| match response.as_str() {
                    Some(text) => Some((pattern.clone(), text.to_string())),
                    None => {
                        tracing::debug!(pattern = %pattern, "Skipping non-string response");
                        None
                    }
                })
                .collect(),
            _ => IndexMap::new(),
        };

        let legacy = text_field(map, "services").map(|services| LegacyFields {
            services,
            hours: map.get("hours").and_then(loose_text),
        });

        Ok(Self {
            business_name: text_field(map, "business_name"),
            responses,
            contact: map.get("contact").and_then(Contact::from_value),
            industry: text_field(map, "industry"),
            fallback_response: text_field(map, "fallback_response"),
            fallback: text_field(map, "fallback"),
            legacy,
        })
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: JsonValue = serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Invalid client config JSON: {}", e)))?;
        Self::from_value(&value)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let value: JsonValue = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Invalid client config YAML: {}", e)))?;
        Self::from_value(&value)
    }

    /// Whether the record uses the legacy flat-field shape
    pub fn is_legacy(&self) -> bool {
        self.legacy.is_some()
    }

    /// Whether the record carries a contact field of any shape
    pub fn has_contact(&self) -> bool {
        self.contact.is_some()
    }

    /// Structured contact details, if the contact field is an object
    pub fn contact_details(&self) -> Option<&ContactDetails> {
        match &self.contact {
            Some(Contact::Details(details)) => Some(details),
            _ => None,
        }
    }

    /// Canonical pattern-to-response table in match order
    ///
    /// Legacy records get up to three synthesized synonym patterns and
    /// their `responses` mapping is ignored.
    pub fn response_entries(&self) -> IndexMap<String, String> {
        let Some(flat) = &self.legacy else {
            return self.responses.clone();
        };

        let mut entries = IndexMap::new();
        entries.insert(legacy::SERVICES_PATTERN.to_string(), flat.services.clone());
        if let Some(hours) = &flat.hours {
            entries.insert(legacy::HOURS_PATTERN.to_string(), hours.clone());
        }
        if let Some(contact) = &self.contact {
            entries.insert(
                legacy::CONTACT_PATTERN.to_string(),
                format!("Call us at {} for more information", contact),
            );
        }
        entries
    }
}

fn text_field(map: &Map<String, JsonValue>, key: &str) -> Option<String> {
    map.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

/// Strings as-is, other non-null values as their JSON text
fn loose_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_default() {
        let config = ClientConfig::builtin_default();
        assert_eq!(config.business_name.as_deref(), Some("Business"));
        assert_eq!(
            config.responses.get("default").map(String::as_str),
            Some("Thank you for contacting us. Please call (555) 123-4567 for assistance.")
        );
        assert_eq!(
            config.contact_details().and_then(|c| c.phone.as_deref()),
            Some("(555) 123-4567")
        );
        assert_eq!(
            config.fallback.as_deref(),
            Some("Please call us at (555) 123-4567 for assistance.")
        );
        assert!(!config.is_legacy());
    }

    #[test]
    fn test_responses_keep_document_order() {
        let config = ClientConfig::from_json_str(
            r#"{"responses": {"zeta|z": "last letter", "alpha|a": "first letter", "mid": "m"}}"#,
        )
        .unwrap();

        let keys: Vec<&str> = config.responses.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta|z", "alpha|a", "mid"]);
    }

    #[test]
    fn test_yaml_record() {
        let yaml = r#"
business_name: Smile Dental
industry: Dental
responses:
  "hours|open": "Mon-Fri 9-5"
  "insurance": "We accept most plans"
contact:
  phone: "555-0100"
  website: "smile.example"
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.business_name.as_deref(), Some("Smile Dental"));
        assert_eq!(config.industry.as_deref(), Some("Dental"));
        assert_eq!(config.responses.len(), 2);
        let details = config.contact_details().unwrap();
        assert_eq!(details.phone.as_deref(), Some("555-0100"));
        assert_eq!(details.email, None);
    }

    #[test]
    fn test_mistyped_fields_are_absent() {
        let config = ClientConfig::from_value(&json!({
            "business_name": 42,
            "responses": {"hours": "9-5", "broken": ["not", "text"]},
            "industry": null,
            "fallback": false,
            "contact": {"phone": 5550100, "email": "a@b.com"}
        }))
        .unwrap();

        assert_eq!(config.business_name, None);
        assert_eq!(config.responses.len(), 1);
        assert_eq!(config.industry, None);
        assert_eq!(config.fallback, None);
        let details = config.contact_details().unwrap();
        assert_eq!(details.phone, None);
        assert_eq!(details.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(ClientConfig::from_json_str("[1, 2, 3]").is_err());
        assert!(ClientConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_legacy_shape_synthesizes_patterns() {
        let config = ClientConfig::from_value(&json!({
            "services": "Yoga, Pilates",
            "hours": "6am-10pm daily",
            "contact": "555-0199",
            "responses": {"ignored": "never used"}
        }))
        .unwrap();

        assert!(config.is_legacy());
        let entries = config.response_entries();
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "services|training|classes|workout",
                "hours|open|time|schedule",
                "contact|phone|call"
            ]
        );
        assert_eq!(entries["services|training|classes|workout"], "Yoga, Pilates");
        assert_eq!(
            entries["contact|phone|call"],
            "Call us at 555-0199 for more information"
        );
    }

    #[test]
    fn test_legacy_shape_without_optional_fields() {
        let config = ClientConfig::from_value(&json!({"services": "Boxing"})).unwrap();
        let entries = config.response_entries();
        assert_eq!(entries.len(), 1);
        assert!(!config.has_contact());
    }

    #[test]
    fn test_non_string_services_is_not_legacy() {
        let config = ClientConfig::from_value(&json!({
            "services": ["yoga"],
            "responses": {"yoga": "Daily at 7"}
        }))
        .unwrap();

        assert!(!config.is_legacy());
        assert_eq!(config.response_entries().len(), 1);
    }

    #[test]
    fn test_contact_display() {
        let details = Contact::Details(ContactDetails {
            phone: Some("555-0100".to_string()),
            email: None,
            website: Some("gym.example".to_string()),
        });
        assert_eq!(details.to_string(), "555-0100, gym.example");
        assert_eq!(Contact::Other(json!(5550100)).to_string(), "5550100");
    }
}
