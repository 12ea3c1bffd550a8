//! Form codec: raw form inputs <-> typed record
//!
//! Encoding is type-directed by each field's [`FieldKind`]:
//! checkboxes become booleans, number/range inputs become numbers (or `null`
//! when blank), date inputs become UTC-midnight ISO-8601 instants (or `null`),
//! everything else is passed through as the raw string.
//!
//! Decoding goes the other way and also refreshes the photo preview, calling the
//! optional preview hook supplied at construction.

use super::{FieldInput, FieldKind, FormState};
use crate::error::FormError;
use crate::model::{Entry, Record};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

const IMAGE_FIELD: &str = "imageUrl";

/// Photo preview shown next to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub src: String,
    /// False when `src` is the default placeholder
    pub has_photo: bool,
}

impl ImagePreview {
    pub fn placeholder(default_photo: &str) -> Self {
        Self {
            src: default_photo.to_string(),
            has_photo: false,
        }
    }

    pub fn photo(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            has_photo: true,
        }
    }
}

/// Called after every preview change (e.g. to toggle a "remove photo" control)
pub type PreviewHook = Arc<dyn Fn(&ImagePreview) + Send + Sync>;

/// Converts between `FormState` and `Record`
#[derive(Clone)]
pub struct FormCodec {
    default_photo: String,
    preview_hook: Option<PreviewHook>,
}

impl fmt::Debug for FormCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormCodec")
            .field("default_photo", &self.default_photo)
            .field("preview_hook", &self.preview_hook.is_some())
            .finish()
    }
}

impl FormCodec {
    pub fn new(default_photo: impl Into<String>) -> Self {
        Self {
            default_photo: default_photo.into(),
            preview_hook: None,
        }
    }

    pub fn with_preview_hook(mut self, hook: PreviewHook) -> Self {
        self.preview_hook = Some(hook);
        self
    }

    pub fn default_photo(&self) -> &str {
        &self.default_photo
    }

    /// Read every form field into a typed record.
    ///
    /// The record's keys are exactly the form's field names.
    pub fn encode(&self, form: &FormState) -> Result<Record, FormError> {
        let mut record = Record::new();
        for (spec, input) in form.fields() {
            let value = match (spec.kind, input) {
                (FieldKind::Checkbox, FieldInput::Checked(checked)) => Value::Bool(*checked),
                (FieldKind::Checkbox, FieldInput::Text(raw)) => Value::Bool(!raw.is_empty()),
                (kind, FieldInput::Text(raw)) if kind.is_numeric() => encode_number(&spec.name, raw)?,
                (FieldKind::Date, FieldInput::Text(raw)) => encode_date(&spec.name, raw)?,
                (_, FieldInput::Text(raw)) => Value::String(raw.clone()),
                (_, FieldInput::Checked(checked)) => Value::Bool(*checked),
            };
            record.insert(spec.name.clone(), value);
        }
        Ok(record)
    }

    /// Encode the form and interpret the record as an entry
    pub fn encode_entry(&self, form: &FormState) -> Result<Entry, FormError> {
        let record = self.encode(form)?;
        Entry::from_record(record).map_err(|e| FormError::InvalidRecord(e.to_string()))
    }

    /// Write every record value that has a matching form field into the form.
    ///
    /// Keys without a matching field are ignored. Also refreshes the photo preview.
    pub fn decode(&self, record: &Record, form: &mut FormState) {
        for (spec, input) in form.fields_mut() {
            let Some(value) = record.get(&spec.name) else {
                continue;
            };
            *input = match spec.kind {
                FieldKind::Checkbox => FieldInput::Checked(is_truthy(value)),
                // Calendar-date part only, so re-display does not shift across time zones
                FieldKind::Date => FieldInput::Text(match value {
                    Value::String(s) => s.chars().take(10).collect(),
                    _ => String::new(),
                }),
                _ => FieldInput::Text(value_to_input(value)),
            };
        }

        let preview = match record.get(IMAGE_FIELD) {
            Some(Value::String(src)) if !src.is_empty() => ImagePreview::photo(src.clone()),
            _ => ImagePreview::placeholder(&self.default_photo),
        };
        self.show_preview(form, preview);
    }

    pub fn decode_entry(&self, entry: &Entry, form: &mut FormState) {
        self.decode(&entry.to_record(), form);
    }

    /// Blank every input and restore the default photo
    pub fn reset(&self, form: &mut FormState) {
        form.clear_inputs();
        self.show_preview(form, ImagePreview::placeholder(&self.default_photo));
    }

    /// Drop the photo reference from the form
    pub fn clear_photo(&self, form: &mut FormState) {
        form.set_value(IMAGE_FIELD, "");
        self.show_preview(form, ImagePreview::placeholder(&self.default_photo));
    }

    /// Point the preview at the typed photo URL (or the default when blank)
    pub fn sync_preview(&self, form: &mut FormState) {
        let preview = match form.value(IMAGE_FIELD) {
            Some(src) if !src.trim().is_empty() => ImagePreview::photo(src.trim()),
            _ => ImagePreview::placeholder(&self.default_photo),
        };
        if &preview != form.preview() {
            self.show_preview(form, preview);
        }
    }

    fn show_preview(&self, form: &mut FormState, preview: ImagePreview) {
        form.set_preview(preview);
        if let Some(hook) = &self.preview_hook {
            hook(form.preview());
        }
    }
}

fn encode_number(field: &str, raw: &str) -> Result<Value, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(Value::Number(int.into()));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| FormError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

fn encode_date(field: &str, raw: &str) -> Result<Value, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    let instant = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date.and_time(NaiveTime::MIN).and_utc(),
        Err(_) => DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| FormError::InvalidDate {
                field: field.to_string(),
                value: raw.to_string(),
            })?,
    };
    Ok(Value::String(
        instant.to_rfc3339_opts(SecondsFormat::Millis, true),
    ))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_input(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
