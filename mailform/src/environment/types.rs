use mailform_core_contact_impl::{delivery::ContactDeliveryServiceImpl, ContactFormServiceImpl};
use mailform_extern_impl::emailjs::EmailJsApiServiceImpl;
use mailform_notify_impl::NotificationServiceImpl;

pub type EmailJsApi = EmailJsApiServiceImpl;
pub type Notify = NotificationServiceImpl;

pub type ContactDelivery = ContactDeliveryServiceImpl<EmailJsApi, Notify>;
pub type ContactForm = ContactFormServiceImpl<ContactDelivery>;
