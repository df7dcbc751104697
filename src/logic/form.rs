use serde_json::{Map, Value};

use crate::error::ConsoleError;
use crate::model::{Id, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Id),
}

/// The add/edit form behind every list view.
///
/// Holds one draft: blank in create mode, a copy of the selected record in
/// edit mode. Field changes replace the matching draft property. Submission
/// checks required fields, clears conditional sub-fields that are switched
/// off, and hands the draft back to the caller for the store to merge.
#[derive(Debug, Clone)]
pub struct FormDraft<R: Record> {
    mode: FormMode,
    draft: R::Draft,
}

impl<R: Record> FormDraft<R> {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: R::Draft::default(),
        }
    }

    pub fn edit(record: &R) -> Self {
        Self {
            mode: FormMode::Edit(record.id()),
            draft: record.to_draft(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    /// Replace a single draft property
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), ConsoleError> {
        let mut fields = Map::new();
        fields.insert(name.to_string(), value);
        self.merge(fields)
    }

    /// Shallow-merge submitted fields over the draft. Keys the draft does not
    /// know are ignored; a value of the wrong type rejects the whole merge and
    /// leaves the draft untouched.
    pub fn merge(&mut self, fields: Map<String, Value>) -> Result<(), ConsoleError> {
        let mut current = match serde_json::to_value(&self.draft).map_err(Self::invalid)? {
            Value::Object(map) => map,
            other => {
                return Err(Self::invalid(format!(
                    "draft serialized to {} instead of an object",
                    other
                )))
            }
        };

        for (key, value) in fields {
            current.insert(key, value);
        }

        self.draft = serde_json::from_value(Value::Object(current)).map_err(Self::invalid)?;
        Ok(())
    }

    /// Merge an arbitrary JSON body; anything but an object is rejected
    pub fn merge_value(&mut self, body: Value) -> Result<(), ConsoleError> {
        match body {
            Value::Object(fields) => self.merge(fields),
            other => Err(Self::invalid(format!("expected a JSON object, got {}", other))),
        }
    }

    pub fn submit(mut self) -> Result<R::Draft, ConsoleError> {
        for (field, value) in R::required_fields(&self.draft) {
            if value.trim().is_empty() {
                return Err(ConsoleError::MissingField {
                    kind: R::KIND,
                    field,
                });
            }
        }

        R::normalize_draft(&mut self.draft);
        Ok(self.draft)
    }

    fn invalid(message: impl std::fmt::Display) -> ConsoleError {
        ConsoleError::InvalidDraft {
            kind: R::KIND,
            message: message.to_string(),
        }
    }
}
