use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field-level errors returned by the origin with HTTP 422.
///
/// The origin keys the payload by the id of the form that triggered the
/// request: `{ "<form id>": { "<field>": "<message>" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    forms: BTreeMap<String, BTreeMap<String, String>>,
}

/// Messages placed on named controls of a single form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineErrors {
    /// control name -> message
    pub by_control: BTreeMap<String, String>,
    /// Messages whose field has no matching control, shown at form level
    pub unmatched: Vec<String>,
}

impl FieldErrors {
    /// Parse a 422 response body. Returns `None` when the body is not a
    /// field-error payload.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body).ok()
    }

    /// Total number of field messages across all forms
    pub fn len(&self) -> usize {
        self.forms.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn for_form(&self, form_id: &str) -> Option<&BTreeMap<String, String>> {
        self.forms.get(form_id)
    }

    /// Map the errors of `form_id` onto the form's named controls
    pub fn map_onto<'a, I>(&self, form_id: &str, controls: I) -> InlineErrors
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut inline = InlineErrors::default();
        let Some(fields) = self.forms.get(form_id) else {
            return inline;
        };

        let controls: Vec<&str> = controls.into_iter().collect();
        for (field, message) in fields {
            if controls.contains(&field.as_str()) {
                inline.by_control.insert(field.clone(), message.clone());
            } else {
                inline.unmatched.push(format!("{}: {}", field, message));
            }
        }

        inline
    }
}
