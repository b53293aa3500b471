use std::collections::BTreeSet;

use crate::contact::{ContactDraft, ContactField, ContactSubmission, FieldError, FieldErrors};

/// Everything the presentation layer needs to render the contact form.
///
/// Errors of a field are only reported once the field has been left (see
/// [`blur`](Self::blur)) or after the first submit attempt. From then on the
/// field is re-validated on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    pub values: ContactDraft,
    pub errors: FieldErrors,
    pub touched: BTreeSet<ContactField>,
    pub submitted: bool,
    pub is_sending: bool,
}

impl ContactFormState {
    pub fn set_value(&mut self, field: ContactField, value: impl Into<String>) {
        self.values.set(field, value.into());
        if self.submitted || self.touched.contains(&field) {
            self.revalidate(field);
        }
    }

    pub fn blur(&mut self, field: ContactField) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    /// Validate every field as part of a submit attempt.
    pub fn validate(&mut self) -> Result<ContactSubmission, FieldErrors> {
        self.submitted = true;
        self.touched.extend(ContactField::ALL);

        let result = self.values.validate();
        self.errors = result.as_ref().err().cloned().unwrap_or_default();
        result
    }

    /// Clear all values and errors. The in-flight flag is not affected.
    pub fn reset(&mut self) {
        *self = Self {
            is_sending: self.is_sending,
            ..Default::default()
        };
    }

    pub fn error(&self, field: ContactField) -> Option<FieldError> {
        self.errors.get(field)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_sending
    }

    fn revalidate(&mut self, field: ContactField) {
        self.errors
            .set(field, self.values.validate_field(field).err());
    }
}
