//! HTTP webhook delivery for planner notifications.

use tracing::{debug, warn};

use crate::notify::Notification;
use crate::traits::NotificationSink;

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/notifications".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Posts each notification as JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    config: WebhookConfig,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(config: WebhookConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Send one notification, reporting transport and HTTP status errors.
    pub fn deliver(&self, notification: &Notification) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.config.url)
            .json(notification)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map(|_| ())
    }
}

impl NotificationSink for WebhookNotifier {
    fn notify(&self, notification: &Notification) {
        match self.deliver(notification) {
            Ok(()) => debug!(
                route_id = %notification.route_id,
                kind = ?notification.kind,
                "webhook delivered"
            ),
            Err(err) => warn!(
                route_id = %notification.route_id,
                kind = ?notification.kind,
                url = %self.config.url,
                error = %err,
                "webhook delivery failed"
            ),
        }
    }
}
