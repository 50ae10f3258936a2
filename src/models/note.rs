//! Note model
//!
//! A note is a short piece of text with a title and a one-line summary.
//! `NoteInput` is the shape accepted from clients for both create and update;
//! its fields are optional so the two operations can interpret absence
//! differently.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Maximum length of `shortDescription`, counted in characters
pub const SHORT_DESCRIPTION_MAX_CHARS: usize = 20;

/// Stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Assigned by the database, never changed afterwards
    pub id: i64,
    pub title: String,
    pub content: String,
    pub short_description: String,
}

/// Note fields without an id, as written by insert and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub short_description: String,
}

impl NewNote {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        short_description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            short_description: short_description.into(),
        }
    }
}

impl From<Note> for NewNote {
    fn from(note: Note) -> Self {
        Self {
            title: note.title,
            content: note.content,
            short_description: note.short_description,
        }
    }
}

/// Client-supplied note body.
///
/// Absent and `null` fields decode to `None`. On create every field is
/// required and non-empty; on update `None` and `""` both mean "keep the
/// stored value".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub content: Option<String>,
    #[serde(rename = "shortDescription")]
    #[validate(required, length(min = 1, max = 20))]
    pub short_description: Option<String>,
}

/// One violated validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field name as it appears in JSON
    pub field: String,
    /// Rule that failed (`required` or `length`)
    pub rule: String,
    pub message: String,
}

impl NoteInput {
    /// Validate a create request and turn it into insertable fields
    pub fn into_new_note(self) -> Result<NewNote, Vec<FieldViolation>> {
        self.validate().map_err(|errors| violations(&errors))?;

        Ok(NewNote {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            short_description: self.short_description.unwrap_or_default(),
        })
    }
}

impl Note {
    /// Merge an update body into this note.
    ///
    /// A non-empty incoming value replaces the stored one; an empty or
    /// missing value leaves it untouched, so a field can never be cleared.
    /// The merged note is not re-validated.
    pub fn merge(mut self, patch: NoteInput) -> Note {
        fn replace(slot: &mut String, incoming: Option<String>) {
            if let Some(value) = incoming.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }

        replace(&mut self.title, patch.title);
        replace(&mut self.content, patch.content);
        replace(&mut self.short_description, patch.short_description);
        self
    }
}

fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut list: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| {
                let rule = err.code.to_string();
                let message = match rule.as_str() {
                    "required" => format!("{} is required", field),
                    "length" if field == "shortDescription" => format!(
                        "{} must be between 1 and {} characters",
                        field, SHORT_DESCRIPTION_MAX_CHARS
                    ),
                    "length" => format!("{} must not be empty", field),
                    _ => format!("{} is invalid", field),
                };
                FieldViolation {
                    field: field.clone(),
                    rule,
                    message,
                }
            })
        })
        .collect();

    list.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    list
}
