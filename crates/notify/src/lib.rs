//! Outbound chat notification.
//!
//! This crate provides:
//! - `Notifier` trait for pluggable notification channels
//! - DingTalk group-robot implementation with optional HMAC-SHA256 signing
//! - a null channel for deployments without a configured webhook

pub mod dingtalk;
pub mod traits;

pub use dingtalk::DingTalkNotifier;
pub use traits::{Notifier, NotifyError, NullNotifier};
