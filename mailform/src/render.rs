use std::{collections::HashSet, future::Future, io::Write};

use mailform_models::{
    contact::ContactField,
    form::ContactFormState,
    notification::{Notification, NotificationId, NotificationKind},
};
use tokio::sync::watch;

/// Prints every notification once, at the moment it first shows up.
#[derive(Debug, Default)]
pub struct NotificationPrinter {
    visible: HashSet<NotificationId>,
}

impl NotificationPrinter {
    pub fn print(
        &mut self,
        active: &[Notification],
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        for notification in active {
            if self.visible.insert(notification.id) {
                writeln!(
                    out,
                    "{} {}",
                    marker(notification.kind),
                    notification.message
                )?;
            }
        }

        self.visible
            .retain(|id| active.iter().any(|notification| notification.id == *id));

        Ok(())
    }
}

fn marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Loading => "[..]",
        NotificationKind::Success => "[ok]",
        NotificationKind::Error => "[error]",
    }
}

/// Drive `future` to completion while printing notifications to stdout.
pub async fn with_notifications<F: Future>(
    mut notifications: watch::Receiver<Vec<Notification>>,
    future: F,
) -> F::Output {
    let mut printer = NotificationPrinter::default();
    let mut print = |active: &[Notification]| {
        if let Err(err) = printer.print(active, &mut std::io::stdout()) {
            tracing::warn!("Failed to print notification: {err}");
        }
    };

    print(notifications.borrow_and_update().as_slice());

    tokio::pin!(future);
    loop {
        tokio::select! {
            output = &mut future => {
                print(notifications.borrow_and_update().as_slice());
                return output;
            }
            Ok(()) = notifications.changed() => print(notifications.borrow_and_update().as_slice()),
        }
    }
}

/// Inline error of a field, if the form currently shows one.
pub fn field_error(state: &ContactFormState, field: ContactField) -> Option<String> {
    state
        .error(field)
        .map(|error| format!("  {}: {error}", field.label()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    fn notification(n: u128, kind: NotificationKind, message: &str) -> Notification {
        Notification {
            id: Uuid::from_u128(n).into(),
            kind,
            message: message.into(),
        }
    }

    #[test]
    fn prints_new_notifications_once() {
        // Arrange
        let mut sut = NotificationPrinter::default();
        let mut out = Vec::new();
        let loading = notification(1, NotificationKind::Loading, "Sending...");
        let success = notification(2, NotificationKind::Success, "Message sent successfully.");

        // Act
        sut.print(&[loading.clone()], &mut out).unwrap();
        sut.print(&[loading, success.clone()], &mut out).unwrap();
        sut.print(&[success], &mut out).unwrap();

        // Assert
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[..] Sending...\n[ok] Message sent successfully.\n"
        );
    }

    #[test]
    fn error_marker() {
        let mut sut = NotificationPrinter::default();
        let mut out = Vec::new();

        sut.print(
            &[notification(1, NotificationKind::Error, "Failed to send message.")],
            &mut out,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[error] Failed to send message.\n"
        );
    }

    #[test]
    fn field_errors_after_blur() {
        let mut state = ContactFormState::default();
        state.set_value(ContactField::Name, "A");

        assert_eq!(field_error(&state, ContactField::Name), None);

        state.blur(ContactField::Name);
        assert_eq!(
            field_error(&state, ContactField::Name).as_deref(),
            Some("  Name: enter 2 or more characters")
        );
    }
}
