use std::{collections::BTreeMap, fmt};

use email_address::{EmailAddress, Options};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contact form submission which passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub content: ContactContent,
}

#[nutype(
    validate(
        len_char_min = ContactName::MIN_LENGTH,
        len_char_max = ContactName::MAX_LENGTH
    ),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

impl ContactName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 10;
}

#[nutype(
    validate(len_char_min = ContactContent::MIN_LENGTH),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactContent(String);

impl ContactContent {
    pub const MIN_LENGTH: usize = 2;
}

/// Parse an email address the way the contact form accepts it: a plain
/// `local@domain.tld` address, no display name and no domain literal.
pub fn parse_email_address(value: &str) -> Result<EmailAddress, FieldError> {
    EmailAddress::parse_with_options(
        value,
        Options {
            minimum_sub_domains: 2,
            allow_domain_literal: false,
            allow_display_text: false,
        },
    )
    .map_err(|_| FieldError::InvalidEmail)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Content,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Content];

    /// The key of this field in the template parameters of the email provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Content => "content",
        }
    }

    /// Human readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email address",
            Self::Content => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("enter {min} or more characters")]
    TooShort { min: usize },
    #[error("enter {max} or fewer characters")]
    TooLong { max: usize },
    #[error("not a valid email format")]
    InvalidEmail,
}

impl From<ContactNameError> for FieldError {
    fn from(value: ContactNameError) -> Self {
        match value {
            ContactNameError::LenCharMinViolated => Self::TooShort {
                min: ContactName::MIN_LENGTH,
            },
            ContactNameError::LenCharMaxViolated => Self::TooLong {
                max: ContactName::MAX_LENGTH,
            },
        }
    }
}

impl From<ContactContentError> for FieldError {
    fn from(value: ContactContentError) -> Self {
        match value {
            ContactContentError::LenCharMinViolated => Self::TooShort {
                min: ContactContent::MIN_LENGTH,
            },
        }
    }
}

/// Validation errors of a form, keyed by the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ContactField, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: ContactField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// Sets the error of `field`, or clears it if `error` is `None`.
    pub fn set(&mut self, field: ContactField, error: Option<FieldError>) {
        match error {
            Some(error) => self.0.insert(field, error),
            None => self.0.remove(&field),
        };
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, FieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }
}

impl FromIterator<(ContactField, FieldError)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, FieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

/// The raw, unvalidated values of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub content: String,
}

impl ContactDraft {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Content => &self.content,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        *match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Content => &mut self.content,
        } = value;
    }

    /// Validate a single field, ignoring the others.
    pub fn validate_field(&self, field: ContactField) -> Result<(), FieldError> {
        match field {
            ContactField::Name => self.parse_name().map(drop),
            ContactField::Email => self.parse_email().map(drop),
            ContactField::Content => self.parse_content().map(drop),
        }
    }

    /// Validate all fields and build a submission if every field is valid.
    pub fn validate(&self) -> Result<ContactSubmission, FieldErrors> {
        match (self.parse_name(), self.parse_email(), self.parse_content()) {
            (Ok(name), Ok(email), Ok(content)) => Ok(ContactSubmission {
                name,
                email,
                content,
            }),
            (name, email, content) => Err([
                (ContactField::Name, name.err()),
                (ContactField::Email, email.err()),
                (ContactField::Content, content.err()),
            ]
            .into_iter()
            .filter_map(|(field, error)| Some((field, error?)))
            .collect()),
        }
    }

    fn parse_name(&self) -> Result<ContactName, FieldError> {
        ContactName::try_new(self.name.clone()).map_err(Into::into)
    }

    fn parse_email(&self) -> Result<EmailAddress, FieldError> {
        parse_email_address(&self.email)
    }

    fn parse_content(&self) -> Result<ContactContent, FieldError> {
        ContactContent::try_new(self.content.clone()).map_err(Into::into)
    }
}
