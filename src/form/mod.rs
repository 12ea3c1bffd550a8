//! Edit form model
//!
//! A `FormSchema` names the fields of the create/edit form and their input kinds.
//! `FormState` holds the raw, user-typed values for one open form. Conversion
//! between a `FormState` and a typed `Record` lives in [`codec`].

pub mod codec;

pub use codec::{FormCodec, ImagePreview, PreviewHook};

/// Input kind of a form field; drives the type-directed conversion in the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Url,
    Hidden,
    Checkbox,
    Number,
    Range,
    Date,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Range)
    }
}

/// One named field of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
        }
    }
}

/// Ordered set of form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::ofrenda()
    }
}

impl FormSchema {
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// The memorial entry form
    pub fn ofrenda() -> Self {
        Self::empty()
            .with_field(FieldSpec::new("id", "Id", FieldKind::Hidden))
            .with_field(FieldSpec::new("name", "First name", FieldKind::Text))
            .with_field(FieldSpec::new("lastName", "Last name", FieldKind::Text))
            .with_field(FieldSpec::new("birthDate", "Born", FieldKind::Date))
            .with_field(FieldSpec::new("deathDate", "Passed", FieldKind::Date))
            .with_field(FieldSpec::new(
                "description",
                "Remembrance",
                FieldKind::TextArea,
            ))
            .with_field(FieldSpec::new("imageUrl", "Photo URL", FieldKind::Url))
    }

    /// Add a field; a field with the same name replaces the earlier one
    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Raw value of one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

impl FieldInput {
    fn blank(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Checkbox => FieldInput::Checked(false),
            _ => FieldInput::Text(String::new()),
        }
    }
}

/// Raw state of an open form: one input per schema field, plus the photo preview
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: FormSchema,
    inputs: Vec<FieldInput>,
    preview: ImagePreview,
}

impl FormState {
    pub fn new(schema: FormSchema, default_photo: &str) -> Self {
        let inputs = schema
            .fields()
            .iter()
            .map(|f| FieldInput::blank(f.kind))
            .collect();
        Self {
            schema,
            inputs,
            preview: ImagePreview::placeholder(default_photo),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Clear every input back to blank
    pub(crate) fn clear_inputs(&mut self) {
        for (input, spec) in self.inputs.iter_mut().zip(self.schema.fields()) {
            *input = FieldInput::blank(spec.kind);
        }
    }

    /// Raw text of a non-checkbox field
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.input(name)? {
            FieldInput::Text(s) => Some(s.as_str()),
            FieldInput::Checked(_) => None,
        }
    }

    /// Checked state of a checkbox field
    pub fn is_checked(&self, name: &str) -> Option<bool> {
        match self.input(name)? {
            FieldInput::Checked(b) => Some(*b),
            FieldInput::Text(_) => None,
        }
    }

    /// Set the raw text of a field; returns false if the form has no such text field
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.input_mut(name) {
            Some(FieldInput::Text(s)) => {
                *s = value.into();
                true
            }
            _ => false,
        }
    }

    /// Set a checkbox; returns false if the form has no such checkbox
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        match self.input_mut(name) {
            Some(FieldInput::Checked(b)) => {
                *b = checked;
                true
            }
            _ => false,
        }
    }

    /// Fields with their editable inputs, in schema order
    pub fn fields_mut(&mut self) -> impl Iterator<Item = (&FieldSpec, &mut FieldInput)> {
        self.schema.fields.iter().zip(self.inputs.iter_mut())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &FieldInput)> {
        self.schema.fields.iter().zip(self.inputs.iter())
    }

    pub fn preview(&self) -> &ImagePreview {
        &self.preview
    }

    pub(crate) fn set_preview(&mut self, preview: ImagePreview) {
        self.preview = preview;
    }

    fn input(&self, name: &str) -> Option<&FieldInput> {
        self.schema.position(name).map(|i| &self.inputs[i])
    }

    fn input_mut(&mut self, name: &str) -> Option<&mut FieldInput> {
        self.schema.position(name).map(|i| &mut self.inputs[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ofrenda_schema_fields() {
        let schema = FormSchema::ofrenda();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "id",
                "name",
                "lastName",
                "birthDate",
                "deathDate",
                "description",
                "imageUrl"
            ]
        );
        assert_eq!(schema.field("birthDate").unwrap().kind, FieldKind::Date);
    }

    #[test]
    fn test_with_field_replaces_same_name() {
        let schema = FormSchema::ofrenda()
            .with_field(FieldSpec::new("candles", "Candles", FieldKind::Number))
            .with_field(FieldSpec::new("candles", "Velas", FieldKind::Range));
        assert_eq!(schema.fields().len(), 8);
        assert_eq!(schema.field("candles").unwrap().kind, FieldKind::Range);
    }

    #[test]
    fn test_set_and_read_inputs() {
        let schema = FormSchema::ofrenda().with_field(FieldSpec::new(
            "favorite",
            "Favorite",
            FieldKind::Checkbox,
        ));
        let mut form = FormState::new(schema, "assets/photo.svg");

        assert!(form.set_value("name", "Ana"));
        assert!(form.set_checked("favorite", true));
        assert!(!form.set_value("favorite", "yes"));
        assert!(!form.set_value("nickname", "x"));

        assert_eq!(form.value("name"), Some("Ana"));
        assert_eq!(form.is_checked("favorite"), Some(true));

        form.clear_inputs();
        assert_eq!(form.value("name"), Some(""));
        assert_eq!(form.is_checked("favorite"), Some(false));
    }
}
