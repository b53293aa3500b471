use anyhow::ensure;
use mailform_config::Config;
use mailform_core_contact_contracts::{ContactFormService, DeliveryOutcome};
use mailform_models::contact::ContactField;

use crate::{environment::Environment, render::with_notifications};

/// Fill in the contact form with the given values and submit it.
pub async fn send(config: Config, name: String, email: String, content: String) -> anyhow::Result<()> {
    let env = Environment::new(&config)?;

    for (field, value) in [
        (ContactField::Name, name),
        (ContactField::Email, email),
        (ContactField::Content, content),
    ] {
        env.form.set_value(field, value);
    }

    let outcome = with_notifications(env.notify.subscribe(), env.form.submit()).await?;
    ensure!(outcome == DeliveryOutcome::Sent, "Failed to send message");

    Ok(())
}
