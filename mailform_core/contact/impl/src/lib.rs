use std::sync::Arc;

use mailform_core_contact_contracts::{
    delivery::{ContactDeliveryService, DeliveryOutcome},
    ContactFormService, ContactSubmitError,
};
use mailform_models::{contact::ContactField, form::ContactFormState};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

pub mod delivery;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct ContactFormServiceImpl<Delivery> {
    delivery: Delivery,
    config: ContactFormConfig,
    state: Arc<watch::Sender<ContactFormState>>,
}

#[derive(Debug, Clone)]
pub struct ContactFormConfig {
    /// Clear the form after a failed delivery, just like after a successful
    /// one.
    pub reset_on_failure: bool,
}

impl<Delivery> ContactFormServiceImpl<Delivery> {
    pub fn new(delivery: Delivery, config: ContactFormConfig) -> Self {
        Self {
            delivery,
            config,
            state: Arc::new(watch::Sender::new(ContactFormState::default())),
        }
    }
}

impl<Delivery> ContactFormService for ContactFormServiceImpl<Delivery>
where
    Delivery: ContactDeliveryService,
{
    fn state(&self) -> ContactFormState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ContactFormState> {
        self.state.subscribe()
    }

    fn set_value(&self, field: ContactField, value: String) {
        self.state.send_modify(|state| state.set_value(field, value));
    }

    fn blur(&self, field: ContactField) {
        self.state.send_modify(|state| state.blur(field));
    }

    fn reset(&self) {
        self.state.send_modify(ContactFormState::reset);
    }

    #[instrument(skip_all)]
    async fn submit(&self) -> Result<DeliveryOutcome, ContactSubmitError> {
        let mut submission = Err(ContactSubmitError::AlreadySending);
        self.state.send_if_modified(|state| {
            if state.is_sending {
                return false;
            }
            submission = state.validate().map_err(ContactSubmitError::Invalid);
            state.is_sending = submission.is_ok();
            true
        });

        let submission = submission.inspect_err(|err| debug!("Rejected submit: {err}"))?;
        let _in_flight = InFlight(&self.state);

        let outcome = self
            .delivery
            .send(submission)
            .await
            .inspect_err(|err| warn!("Cannot deliver contact message: {err}"))?;

        if outcome == DeliveryOutcome::Sent || self.config.reset_on_failure {
            self.state.send_modify(ContactFormState::reset);
        }

        Ok(outcome)
    }
}

/// Clears the in-flight flag when the submission completes or is dropped.
struct InFlight<'a>(&'a watch::Sender<ContactFormState>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|state| state.is_sending = false);
    }
}
