use std::{sync::Arc, time::Duration};

use mailform_models::notification::{Notification, NotificationId, NotificationKind};
use mailform_notify_contracts::NotificationService;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

/// Keeps the list of visible notifications and publishes every change to
/// its subscribers.
#[derive(Debug, Clone)]
pub struct NotificationServiceImpl {
    config: NotificationServiceConfig,
    active: Arc<watch::Sender<Vec<Notification>>>,
}

#[derive(Debug, Clone)]
pub struct NotificationServiceConfig {
    /// How long success notifications stay visible. `None` keeps them until
    /// they are dismissed.
    pub success_ttl: Option<Duration>,
    /// How long error notifications stay visible.
    pub error_ttl: Option<Duration>,
}

impl NotificationServiceImpl {
    pub fn new(config: NotificationServiceConfig) -> Self {
        Self {
            config,
            active: Arc::new(watch::Sender::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.active.subscribe()
    }

    /// Returns the currently visible notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.active.borrow().clone()
    }

    fn ttl(&self, kind: NotificationKind) -> Option<Duration> {
        match kind {
            NotificationKind::Loading => None,
            NotificationKind::Success => self.config.success_ttl,
            NotificationKind::Error => self.config.error_ttl,
        }
    }

    fn schedule_dismiss(&self, id: NotificationId, ttl: Duration) {
        // notifications shown outside of a runtime simply stay until dismissed
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let active = Arc::downgrade(&self.active);
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(active) = active.upgrade() {
                remove(&active, id);
            }
        });
    }
}

impl NotificationService for NotificationServiceImpl {
    fn show(&self, kind: NotificationKind, message: String) -> NotificationId {
        let id = NotificationId::from(Uuid::new_v4());
        info!(%id, ?kind, text = %message, "Showing notification");

        self.active.send_modify(|active| {
            active.push(Notification { id, kind, message });
        });

        if let Some(ttl) = self.ttl(kind) {
            self.schedule_dismiss(id, ttl);
        }

        id
    }

    fn dismiss(&self, id: NotificationId) {
        if remove(&self.active, id) {
            debug!(%id, "Dismissed notification");
        }
    }
}

fn remove(active: &watch::Sender<Vec<Notification>>, id: NotificationId) -> bool {
    active.send_if_modified(|active| {
        let len = active.len();
        active.retain(|notification| notification.id != id);
        active.len() != len
    })
}
