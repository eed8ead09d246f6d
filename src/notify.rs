//! Cross-platform native desktop notifications
//!
//! Uses notify-rust for native notifications on macOS, Linux, and BSD.
//! A request is built up front, then handed to a [`NotificationDelivery`]
//! which owns the trigger wait and the call into the OS service.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use notify_rust::Notification;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{DeliveryError, Result};

/// Delay before every scheduled notification fires
pub const TRIGGER_DELAY: Duration = Duration::from_secs(5);

/// When a request fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub interval: Duration,
    pub repeats: bool,
}

impl Trigger {
    /// Fire once after `interval`
    pub const fn one_shot(interval: Duration) -> Self {
        Self {
            interval,
            repeats: false,
        }
    }
}

/// A single notification ready for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Fresh per request, opaque to callers
    pub identifier: String,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub trigger: Trigger,
}

impl NotificationRequest {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            identifier: Uuid::new_v4().to_string(),
            title: title.into(),
            subtitle: subtitle.into(),
            body: body.into(),
            trigger: Trigger::one_shot(TRIGGER_DELAY),
        }
    }
}

/// Something that can deliver a notification request
#[async_trait]
pub trait NotificationDelivery: Send + Sync {
    /// Submit a request; resolves once the service has accepted or refused it
    async fn submit(&self, request: NotificationRequest) -> Result<()>;
}

/// Delivery through the desktop notification service
///
/// On macOS, uses native NSUserNotification or UNUserNotification APIs.
/// On Linux, uses libnotify (freedesktop.org compliant).
#[derive(Debug, Clone)]
pub struct DesktopDelivery {
    app_name: String,
    icon: Option<String>,
}

impl DesktopDelivery {
    pub fn new(config: &Config) -> Self {
        Self {
            app_name: config.app_name.clone(),
            icon: config.icon.clone(),
        }
    }

    fn build(&self, request: &NotificationRequest) -> Notification {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(&request.title);

        #[cfg(target_os = "macos")]
        {
            notification.subtitle(&request.subtitle).body(&request.body);
        }
        #[cfg(not(target_os = "macos"))]
        {
            notification.body(&body_with_subtitle(&request.subtitle, &request.body));
        }

        if let Some(icon) = &self.icon {
            notification.icon(icon);
        }
        notification
    }
}

#[async_trait]
impl NotificationDelivery for DesktopDelivery {
    async fn submit(&self, request: NotificationRequest) -> Result<()> {
        let notification = self.build(&request);

        tokio::time::sleep(request.trigger.interval).await;

        // show() talks to the notification daemon synchronously
        tokio::task::spawn_blocking(move || {
            notification.show().map(|_| ()).map_err(DeliveryError::from)
        })
        .await??;
        Ok(())
    }
}

/// Services without a subtitle field get it as the first body line
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn body_with_subtitle(subtitle: &str, body: &str) -> String {
    if subtitle.is_empty() {
        body.to_string()
    } else {
        format!("{subtitle}\n{body}")
    }
}

/// Build a request from the three fields and submit it.
///
/// A refusal is written to `out` as `Error: <description>`; success writes
/// nothing. Neither outcome is escalated to the caller.
pub async fn schedule<D, W>(
    delivery: &D,
    title: &str,
    subtitle: &str,
    body: &str,
    out: &mut W,
) -> std::io::Result<()>
where
    D: NotificationDelivery + ?Sized,
    W: Write,
{
    let request = NotificationRequest::new(title, subtitle, body);
    let identifier = request.identifier.clone();
    tracing::debug!(
        id = %identifier,
        delay_secs = request.trigger.interval.as_secs(),
        repeats = request.trigger.repeats,
        "Notification request built"
    );

    match delivery.submit(request).await {
        Ok(()) => {
            tracing::info!(id = %identifier, "Notification delivered");
        }
        Err(e) => {
            tracing::warn!(id = %identifier, error = %e, "Notification delivery failed");
            report_error(&e, out)?;
        }
    }
    Ok(())
}

fn report_error<W: Write>(error: &DeliveryError, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Error: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records every submitted request and optionally refuses it
    #[derive(Default)]
    struct FakeDelivery {
        submitted: Mutex<Vec<NotificationRequest>>,
        failure: Option<DeliveryError>,
    }

    impl FakeDelivery {
        fn failing(message: &str) -> Self {
            Self {
                failure: Some(DeliveryError::Rejected(message.to_string())),
                ..Self::default()
            }
        }

        fn submitted(&self) -> Vec<NotificationRequest> {
            self.submitted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationDelivery for FakeDelivery {
        async fn submit(&self, request: NotificationRequest) -> Result<()> {
            self.submitted.lock().unwrap().push(request);
            match &self.failure {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_request_fields_and_trigger() {
        let request = NotificationRequest::new("Meeting", "Room 4", "Starts in 5 minutes");
        assert_eq!(request.title, "Meeting");
        assert_eq!(request.subtitle, "Room 4");
        assert_eq!(request.body, "Starts in 5 minutes");
        assert_eq!(request.trigger.interval, Duration::from_secs(5));
        assert!(!request.trigger.repeats);
        assert!(!request.identifier.is_empty());
    }

    #[test]
    fn test_trigger_fixed_regardless_of_input() {
        let long = "y".repeat(4096);
        for (t, s, b) in [("", "", ""), ("ä", "ö", "ü"), ("a", "b", long.as_str())] {
            let request = NotificationRequest::new(t, s, b);
            assert_eq!(request.trigger, Trigger::one_shot(TRIGGER_DELAY));
        }
    }

    #[test]
    fn test_identifiers_are_distinct() {
        let ids: HashSet<String> = (0..1000)
            .map(|_| NotificationRequest::new("a", "b", "c").identifier)
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_body_with_subtitle() {
        assert_eq!(body_with_subtitle("Room 4", "Starts soon"), "Room 4\nStarts soon");
        assert_eq!(body_with_subtitle("", "Starts soon"), "Starts soon");
    }

    #[tokio::test]
    async fn test_schedule_submits_exact_fields() {
        let delivery = FakeDelivery::default();
        let mut out = Vec::new();

        schedule(&delivery, "Meeting", "Room 4", "Starts in 5 minutes", &mut out)
            .await
            .unwrap();

        let submitted = delivery.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].title, "Meeting");
        assert_eq!(submitted[0].subtitle, "Room 4");
        assert_eq!(submitted[0].body, "Starts in 5 minutes");
        assert!(out.is_empty(), "unexpected output: {:?}", String::from_utf8_lossy(&out));
    }

    #[tokio::test]
    async fn test_schedule_reports_delivery_error() {
        let delivery = FakeDelivery::failing("permission denied");
        let mut out = Vec::new();

        schedule(&delivery, "a", "b", "c", &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Error: permission denied\n");
        assert_eq!(delivery.submitted().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_schedules_use_fresh_identifiers() {
        let delivery = FakeDelivery::default();
        let mut out = Vec::new();

        for _ in 0..3 {
            schedule(&delivery, "a", "b", "c", &mut out).await.unwrap();
        }

        let ids: HashSet<String> = delivery
            .submitted()
            .into_iter()
            .map(|r| r.identifier)
            .collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_desktop_delivery_uses_config() {
        let config = Config {
            app_name: "FileWatcher".to_string(),
            icon: Some("dialog-information".to_string()),
            log_level: "info".to_string(),
            log_dir: std::path::PathBuf::from("/tmp"),
        };
        let delivery = DesktopDelivery::new(&config);
        assert_eq!(delivery.app_name, "FileWatcher");
        assert_eq!(delivery.icon.as_deref(), Some("dialog-information"));
    }
}
