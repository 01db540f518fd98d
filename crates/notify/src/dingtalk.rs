//! DingTalk group-robot notifier.
//!
//! Delivers text messages to a robot webhook as JSON. When a signing secret
//! is configured, each request URL carries `timestamp` and `sign` query
//! params where `sign = urlencode(base64(hmac_sha256(secret, "{ts}\n{secret}")))`.

use std::time::Duration;

use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::traits::{Notifier, NotifyError};

type HmacSha256 = Hmac<Sha256>;

/// Robot endpoints answer with an errcode/errmsg pair; 0 means accepted.
#[derive(Debug, Deserialize)]
struct RobotResponse {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// Sends text messages to a DingTalk robot webhook.
#[derive(Debug, Clone)]
pub struct DingTalkNotifier {
    webhook_url: String,
    secret: Option<String>,
    client: reqwest::Client,
}

impl DingTalkNotifier {
    /// Create a notifier with a bounded request timeout.
    pub fn new(
        webhook_url: String,
        secret: Option<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        if webhook_url.trim().is_empty() {
            return Err(NotifyError::Config("webhook URL is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Http)?;
        Ok(Self {
            webhook_url,
            secret,
            client,
        })
    }

    /// The URL to post to, signed when a secret is configured.
    fn delivery_url(&self, timestamp_ms: i64) -> String {
        match &self.secret {
            Some(secret) => {
                let sign = sign(secret, timestamp_ms);
                let sep = if self.webhook_url.contains('?') { '&' } else { '?' };
                format!(
                    "{}{}timestamp={}&sign={}",
                    self.webhook_url, sep, timestamp_ms, sign
                )
            }
            None => self.webhook_url.clone(),
        }
    }
}

/// Compute the robot signature for one timestamp: the HMAC-SHA256 of
/// `"{timestamp}\n{secret}"` keyed by the secret, base64- then URL-encoded.
fn sign(secret: &str, timestamp_ms: i64) -> String {
    let string_to_sign = format!("{}\n{}", timestamp_ms, secret);
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC key of any length is valid"));
    mac.update(string_to_sign.as_bytes());
    let digest = mac.finalize().into_bytes();
    let encoded = base64::engine::general_purpose::STANDARD.encode(digest);
    urlencoding::encode(&encoded).into_owned()
}

/// Build the robot text-message payload.
fn text_payload(content: &str, at_all: bool) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "msgtype": "text",
        "text": { "content": content },
    });
    if at_all {
        payload["at"] = serde_json::json!({ "isAtAll": true });
    }
    payload
}

#[async_trait::async_trait]
impl Notifier for DingTalkNotifier {
    async fn send_text(&self, content: &str, at_all: bool) -> Result<(), NotifyError> {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let url = self.delivery_url(timestamp_ms);

        let response = self
            .client
            .post(&url)
            .json(&text_payload(content, at_all))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%status, body = %body, "webhook returned non-2xx status");
            return Err(NotifyError::Delivery {
                errcode: status.as_u16() as i64,
                errmsg: body,
            });
        }

        let robot: RobotResponse = response.json().await?;
        if robot.errcode != 0 {
            tracing::warn!(errcode = robot.errcode, errmsg = %robot.errmsg, "robot rejected message");
            return Err(NotifyError::Delivery {
                errcode: robot.errcode,
                errmsg: robot.errmsg,
            });
        }

        tracing::debug!(at_all, "dingtalk notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "dingtalk"
    }
}
