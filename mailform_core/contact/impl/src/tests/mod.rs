use mailform_core_contact_contracts::{delivery::MockContactDeliveryService, ContactFormService};
use mailform_models::contact::{ContactDraft, ContactField, ContactSubmission};

use crate::{ContactFormConfig, ContactFormServiceImpl};


type Sut = ContactFormServiceImpl<MockContactDeliveryService>;

fn make_sut(delivery: MockContactDeliveryService, reset_on_failure: bool) -> Sut {
    ContactFormServiceImpl::new(delivery, ContactFormConfig { reset_on_failure })
}

fn fill(sut: &Sut, draft: &ContactDraft) {
    for field in ContactField::ALL {
        sut.set_value(field, draft.get(field).into());
    }
}

fn alice() -> ContactDraft {
    ContactDraft {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        content: "Hello there".into(),
    }
}

fn submission(draft: ContactDraft) -> ContactSubmission {
    draft.validate().unwrap()
}
