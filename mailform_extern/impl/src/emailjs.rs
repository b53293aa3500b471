use std::sync::Arc;

use anyhow::Context;
use mailform_extern_contracts::emailjs::{
    EmailJsApiService, EmailJsSendError, EmailJsTemplateParams,
};
use mailform_models::emailjs::EmailJsCredentials;
use mailform_utils::Apply;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::http::HttpClient;

/// https://www.emailjs.com/docs/rest-api/send/
const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailJsApiServiceConfig {
    pub fn new(send_endpoint_override: Option<Url>) -> Self {
        Self {
            send_endpoint: send_endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
        }
    }

    pub fn send_endpoint(&self) -> &Url {
        &self.send_endpoint
    }
}

impl EmailJsApiServiceImpl {
    pub fn new(config: EmailJsApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

impl EmailJsApiService for EmailJsApiServiceImpl {
    #[instrument(skip_all, fields(
        service_id = %credentials.service_id,
        template_id = %credentials.template_id,
    ))]
    async fn send(
        &self,
        credentials: EmailJsCredentials,
        template_params: EmailJsTemplateParams,
    ) -> Result<(), EmailJsSendError> {
        let request = SendRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.user_id,
            access_token: None,
            template_params: &template_params,
        }
        .apply_map(
            credentials.access_token.as_deref().map(String::as_str),
            |request, token| SendRequest {
                access_token: Some(token),
                ..request
            },
        );

        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .json(&request)
            .send()
            .await
            .context("Failed to send EmailJS request")?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "EmailJS accepted the email");
            return Ok(());
        }

        let reason = response
            .text()
            .await
            .context("Failed to read EmailJS error response")?;

        Err(EmailJsSendError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a EmailJsTemplateParams,
}
