use std::{collections::BTreeMap, future::Future};

use mailform_models::emailjs::EmailJsCredentials;
use thiserror::Error;

/// The dynamic variables of an EmailJS template.
pub type EmailJsTemplateParams = BTreeMap<String, String>;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailJsApiService: Send + Sync + 'static {
    /// Send an email by rendering the template referenced by `credentials`
    /// with the given parameters.
    fn send(
        &self,
        credentials: EmailJsCredentials,
        template_params: EmailJsTemplateParams,
    ) -> impl Future<Output = Result<(), EmailJsSendError>> + Send;
}

#[derive(Debug, Error)]
pub enum EmailJsSendError {
    #[error("EmailJS rejected the request with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailJsApiService {
    pub fn with_send(
        mut self,
        credentials: EmailJsCredentials,
        template_params: EmailJsTemplateParams,
        result: Result<(), EmailJsSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(credentials),
                mockall::predicate::eq(template_params),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
