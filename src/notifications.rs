//! Transient user notifications ("toasts").
//!
//! Every user-visible outcome of the pipeline (upload accepted, export
//! failed, admin login, ...) is pushed here as a [`Toast`]. The queue is
//! bounded; the oldest toast is dropped when it overflows.

use crate::constants::MAX_NOTIFICATIONS;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Error,
    Info,
}

impl ToastVariant {
    pub fn default_duration(&self) -> Duration {
        match self {
            ToastVariant::Success | ToastVariant::Info => Duration::from_secs(3),
            ToastVariant::Error => Duration::from_secs(5),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "✓",
            ToastVariant::Error => "✗",
            ToastVariant::Info => "ℹ",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub variant: ToastVariant,
    pub duration: Duration,
    created_at: Instant,
}

impl Toast {
    fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            id: 0,
            message: message.into(),
            variant,
            duration: variant.default_duration(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Info)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Bounded FIFO of toasts, newest last
#[derive(Debug)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
    capacity: usize,
    next_id: u64,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    pub fn new() -> Self {
        Self::with_capacity(MAX_NOTIFICATIONS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Queue a toast and return its id
    pub fn push(&mut self, mut toast: Toast) -> u64 {
        toast.id = self.next_id;
        self.next_id += 1;
        match toast.variant {
            ToastVariant::Error => tracing::warn!(message = %toast.message, "Notification"),
            _ => tracing::info!(message = %toast.message, "Notification"),
        }
        if self.toasts.len() == self.capacity {
            self.toasts.pop_front();
        }
        let id = toast.id;
        self.toasts.push_back(toast);
        id
    }

    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop expired toasts
    pub fn prune(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn count(&self) -> usize {
        self.toasts.len()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }
}
