//! Notifier trait definition and shared error types.

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("delivery rejected by endpoint: errcode {errcode}: {errmsg}")]
    Delivery { errcode: i64, errmsg: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Trait for notification channel implementations.
///
/// Callers catch and log delivery errors; a failed announcement never
/// changes the outcome of the operation that triggered it.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a plain-text message, optionally @-mentioning everyone.
    async fn send_text(&self, content: &str, at_all: bool) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "dingtalk").
    fn channel_name(&self) -> &str;
}

/// Channel used when no webhook is configured: logs the message and drops it.
#[derive(Debug, Default)]
pub struct NullNotifier;

#[async_trait::async_trait]
impl Notifier for NullNotifier {
    async fn send_text(&self, content: &str, _at_all: bool) -> Result<(), NotifyError> {
        tracing::info!(content, "no webhook configured, dropping notification");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "null"
    }
}
