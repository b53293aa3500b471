use std::sync::Arc;

use anyhow::Context;
use mailform_config::Config;
use mailform_core_contact_impl::{
    delivery::{ContactDeliveryConfig, ContactDeliveryServiceImpl},
    ContactFormConfig, ContactFormServiceImpl,
};
use mailform_extern_impl::{
    emailjs::{EmailJsApiServiceConfig, EmailJsApiServiceImpl},
    http::HttpClient,
};
use mailform_models::emailjs::EmailJsSettings;
use mailform_notify_impl::{NotificationServiceConfig, NotificationServiceImpl};
use types::{ContactForm, Notify};

pub mod types;

/// All services of a single contact form, wired from the configuration.
#[derive(Debug, Clone)]
pub struct Environment {
    pub form: ContactForm,
    pub notify: Notify,
}

impl Environment {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Extern
        let http = HttpClient::new(config.emailjs.timeout.into())
            .context("Failed to build HTTP client")?;
        let emailjs_api = EmailJsApiServiceImpl::new(
            EmailJsApiServiceConfig::new(config.emailjs.api_endpoint_override.clone()),
            http,
        );

        // Notifications
        let notify = NotificationServiceImpl::new(NotificationServiceConfig {
            success_ttl: config.notifications.success_ttl.map(Into::into),
            error_ttl: config.notifications.error_ttl.map(Into::into),
        });

        // Core
        let delivery = ContactDeliveryServiceImpl::new(
            emailjs_api,
            notify.clone(),
            ContactDeliveryConfig {
                emailjs: Arc::new(emailjs_settings(config)),
            },
        );
        let form = ContactFormServiceImpl::new(
            delivery,
            ContactFormConfig {
                reset_on_failure: config.form.reset_on_failure,
            },
        );

        Ok(Self { form, notify })
    }
}

pub fn emailjs_settings(config: &Config) -> EmailJsSettings {
    EmailJsSettings {
        user_id: config.emailjs.user_id.clone(),
        service_id: config.emailjs.service_id.clone(),
        template_id: config.emailjs.template_id.clone(),
        access_token: config.emailjs.access_token.clone(),
    }
}
