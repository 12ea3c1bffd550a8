//! Entry model
//!
//! The wire shape of one memorial record as served by `/data`. Deserialisation is
//! lenient about what the server sends (numeric or string ids, `""` for unset
//! text); serialisation always writes absent optionals as `null` so an update
//! can clear a field.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Flat string-keyed representation of an entry, as exchanged with the edit form
pub type Record = Map<String, Value>;

/// Opaque server-assigned identifier.
///
/// The server may send a number or a string; both are held as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryIdVisitor;

        impl<'de> de::Visitor<'de> for EntryIdVisitor {
            type Value = EntryId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integral number id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(EntryId(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(EntryId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(EntryId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(EntryId(v.to_string()))
            }

            // Some backends serialise integer ids as `1.0`
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.007_199_254_740_992e15 {
                    Ok(EntryId((v as i64).to_string()))
                } else {
                    Err(E::invalid_value(de::Unexpected::Float(v), &self))
                }
            }
        }

        deserializer.deserialize_any(EntryIdVisitor)
    }
}

/// One memorial record.
///
/// `id` is `None` for a draft that has not been created server-side yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<EntryId>,

    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub last_name: Option<String>,

    /// ISO-8601 instant, e.g. `1950-01-01T00:00:00.000Z`
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub birth_date: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub death_date: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub image_url: Option<String>,

    /// Any further fields the server or form carries
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Empty draft with the given first name
    pub fn draft(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// First and last name joined, trimmed
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.name,
            self.last_name.as_deref().unwrap_or_default()
        );
        full.trim().to_string()
    }

    /// Flatten into the string-keyed form representation
    pub fn to_record(&self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // An Entry always serialises to an object
            _ => Record::new(),
        }
    }

    /// Build an entry from a string-keyed record
    pub fn from_record(record: Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record))
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<EntryId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<EntryId>::deserialize(deserializer)?.filter(|id| !id.is_blank()))
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_text))
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(value_to_text)
        .unwrap_or_default())
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids() {
        let e: Entry = serde_json::from_value(json!({"id": 1, "name": "Ana"})).unwrap();
        assert_eq!(e.id, Some(EntryId::new("1")));

        let e: Entry = serde_json::from_value(json!({"id": "abc", "name": "Ana"})).unwrap();
        assert_eq!(e.id, Some(EntryId::new("abc")));
    }

    #[test]
    fn test_integral_float_id() {
        let entries: Vec<Entry> =
            serde_json::from_str(r#"[{"id": 1.0, "name": "Ana"}, {"id": 2, "name": "Frida"}]"#)
                .unwrap();
        assert_eq!(entries[0].id, Some(EntryId::new("1")));
        assert_eq!(entries[1].id, Some(EntryId::new("2")));

        assert!(serde_json::from_str::<Entry>(r#"{"id": 1.5, "name": "Ana"}"#).is_err());
    }

    #[test]
    fn test_blank_id_means_draft() {
        let e: Entry = serde_json::from_value(json!({"id": "", "name": "Ana"})).unwrap();
        assert!(!e.is_persisted());
        let e: Entry = serde_json::from_value(json!({"id": null, "name": "Ana"})).unwrap();
        assert!(!e.is_persisted());
    }

    #[test]
    fn test_empty_text_is_absent() {
        let e: Entry = serde_json::from_value(json!({
            "name": "Ana",
            "lastName": "",
            "description": null
        }))
        .unwrap();
        assert_eq!(e.last_name, None);
        assert_eq!(e.description, None);
        assert_eq!(e.display_name(), "Ana");
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let e: Entry = serde_json::from_value(json!({
            "id": 7,
            "name": "Luis",
            "favorite": true,
            "candles": 3
        }))
        .unwrap();
        assert_eq!(e.extra.get("favorite"), Some(&json!(true)));
        assert_eq!(e.extra.get("candles"), Some(&json!(3)));

        let back = serde_json::to_value(&e).unwrap();
        assert_eq!(back["favorite"], json!(true));
        assert_eq!(back["candles"], json!(3));
    }

    #[test]
    fn test_draft_serialises_without_id_and_with_nulls() {
        let mut draft = Entry::draft("Ana");
        draft.birth_date = Some("1950-01-01T00:00:00.000Z".into());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Ana",
                "lastName": null,
                "birthDate": "1950-01-01T00:00:00.000Z",
                "deathDate": null,
                "description": null,
                "imageUrl": null
            })
        );
    }

    #[test]
    fn test_record_round_trip() {
        let mut entry = Entry::draft("Frida");
        entry.id = Some(EntryId::from(3u64));
        entry.last_name = Some("Kahlo".into());
        entry.extra.insert("age".into(), json!(47));

        let record = entry.to_record();
        assert_eq!(record.get("lastName"), Some(&json!("Kahlo")));
        assert_eq!(Entry::from_record(record).unwrap(), entry);
        assert_eq!(entry.display_name(), "Frida Kahlo");
    }
}
