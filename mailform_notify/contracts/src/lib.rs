use mailform_models::notification::{NotificationId, NotificationKind};

/// Transient user facing messages ("toasts").
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// Show a new notification and return its id.
    fn show(&self, kind: NotificationKind, message: String) -> NotificationId;

    /// Remove a notification. Unknown or already dismissed ids are ignored.
    fn dismiss(&self, id: NotificationId);
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_show(
        mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        id: NotificationId,
    ) -> Self {
        let message: String = message.into();
        self.expect_show()
            .once()
            .with(
                mockall::predicate::eq(kind),
                mockall::predicate::eq(message),
            )
            .return_const(id);
        self
    }

    pub fn with_dismiss(mut self, id: NotificationId) -> Self {
        self.expect_dismiss()
            .once()
            .with(mockall::predicate::eq(id))
            .return_const(());
        self
    }
}
