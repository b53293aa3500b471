use thiserror::Error;

use crate::Sensitive;

/// Everything needed to authenticate a send request against EmailJS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsCredentials {
    /// The public key of the account (called `user_id` by the API).
    pub user_id: String,
    pub service_id: String,
    pub template_id: String,
    /// Optional private key of the account.
    pub access_token: Option<Sensitive<String>>,
}

/// Delivery settings as they come out of the configuration. Every required
/// value may be missing; this is only checked when a message is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailJsSettings {
    pub user_id: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub access_token: Option<Sensitive<String>>,
}

impl EmailJsSettings {
    pub const USER_ID: &'static str = "emailjs.user_id";
    pub const SERVICE_ID: &'static str = "emailjs.service_id";
    pub const TEMPLATE_ID: &'static str = "emailjs.template_id";

    pub fn credentials(&self) -> Result<EmailJsCredentials, MissingConfigError> {
        fn present(value: &Option<String>) -> Option<&String> {
            value.as_ref().filter(|x| !x.is_empty())
        }

        match (
            present(&self.user_id),
            present(&self.service_id),
            present(&self.template_id),
        ) {
            (Some(user_id), Some(service_id), Some(template_id)) => Ok(EmailJsCredentials {
                user_id: user_id.clone(),
                service_id: service_id.clone(),
                template_id: template_id.clone(),
                access_token: self.access_token.clone(),
            }),
            (user_id, service_id, template_id) => Err(MissingConfigError {
                missing: [
                    (Self::USER_ID, user_id.is_none()),
                    (Self::SERVICE_ID, service_id.is_none()),
                    (Self::TEMPLATE_ID, template_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, missing)| missing.then_some(key))
                .collect(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing delivery configuration: {}", .missing.join(", "))]
pub struct MissingConfigError {
    pub missing: Vec<&'static str>,
}
