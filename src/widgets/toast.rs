//! Toast notifications
//!
//! A toast slides in shortly after it is appended to `<body>`, stays for its
//! lifetime, slides out, then is removed. The queue is bounded: showing a
//! toast past capacity starts the exit of the oldest one immediately.

use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dom::{DocumentPart, DomEffects};
use crate::html::{escape_html, handler_arg};
use crate::ids::IdGenerator;

/// Offscreen position; removing it slides the toast in.
const HIDDEN_CLASS: &str = "translate-x-full";

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "bg-green-500 text-white",
            Severity::Error => "bg-red-500 text-white",
            Severity::Warning => "bg-yellow-500 text-black",
            Severity::Info => "bg-orange-500 text-white",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "fas fa-check-circle",
            Severity::Error => "fas fa-times-circle",
            Severity::Warning => "fas fa-exclamation-triangle",
            Severity::Info => "fas fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    /// Delay between insertion and the slide-in.
    pub enter_delay: Duration,
    /// Time on screen before the automatic dismissal.
    pub lifetime: Duration,
    /// Slide-out transition before the element is removed.
    pub exit: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            enter_delay: Duration::from_millis(100),
            lifetime: Duration::from_millis(5000),
            exit: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    fn markup(&self) -> String {
        format!(
            r#"<div id="{id}" class="toast fixed top-4 right-4 {class} px-6 py-3 rounded-lg shadow-lg z-50 flex items-center space-x-2 transform {hidden} transition-transform duration-300">
    <i class="{icon}"></i>
    <span>{message}</span>
    <button onclick="closeToast('{arg}')" class="ml-2 opacity-70 hover:opacity-100">
        <i class="fas fa-times"></i>
    </button>
</div>"#,
            id = escape_html(&self.id),
            class = self.severity.css_class(),
            hidden = HIDDEN_CLASS,
            icon = self.severity.icon(),
            message = escape_html(&self.message),
            arg = handler_arg(&self.id),
        )
    }
}

struct ToastShared {
    dom: Arc<dyn DomEffects>,
    ids: Arc<IdGenerator>,
    timings: ToastTimings,
    capacity: usize,
    active: Mutex<VecDeque<Toast>>,
}

/// Bounded on-screen toast queue. Cheap to clone; clones share the queue.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<ToastShared>,
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("timings", &self.inner.timings)
            .field("capacity", &self.inner.capacity)
            .field("active", &self.active().len())
            .finish()
    }
}

impl ToastQueue {
    /// A capacity of zero is treated as one.
    pub fn new(dom: Arc<dyn DomEffects>, timings: ToastTimings, capacity: usize) -> Self {
        Self::with_ids(dom, Arc::new(IdGenerator::new()), timings, capacity)
    }

    pub fn with_ids(
        dom: Arc<dyn DomEffects>,
        ids: Arc<IdGenerator>,
        timings: ToastTimings,
        capacity: usize,
    ) -> Self {
        Self {
            inner: Arc::new(ToastShared {
                dom,
                ids,
                timings,
                capacity: capacity.max(1),
                active: Mutex::new(VecDeque::new()),
            }),
        }
    }

    pub fn timings(&self) -> ToastTimings {
        self.inner.timings
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Show a toast and schedule its lifecycle. Must be called inside a tokio
    /// runtime.
    pub fn show(&self, message: &str, severity: Severity) -> Toast {
        let toast = Toast {
            id: self.inner.ids.next_id(),
            message: message.to_string(),
            severity,
            created_at: Utc::now(),
        };
        tracing::debug!("Toast {:?}: {}", severity, message);

        self.inner.dom.append_to(DocumentPart::Body, &toast.markup());

        let evicted: Vec<Toast> = {
            let mut active = self.active_guard();
            active.push_back(toast.clone());
            let excess = active.len().saturating_sub(self.inner.capacity);
            active.drain(..excess).collect()
        };
        for old in evicted {
            tracing::debug!("Toast queue full, evicting {}", old.id);
            self.begin_exit(&old.id);
        }

        let queue = self.clone();
        let id = toast.id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(queue.inner.timings.enter_delay).await;
            // dismissed or evicted before it slid in
            if !queue.is_active(&id) {
                return;
            }
            queue.inner.dom.remove_class(&id, HIDDEN_CLASS);
            tokio::time::sleep(
                queue
                    .inner
                    .timings
                    .lifetime
                    .saturating_sub(queue.inner.timings.enter_delay),
            )
            .await;
            queue.dismiss(&id);
        });

        toast
    }

    pub fn success(&self, message: &str) -> Toast {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: &str) -> Toast {
        self.show(message, Severity::Error)
    }

    pub fn warning(&self, message: &str) -> Toast {
        self.show(message, Severity::Warning)
    }

    pub fn info(&self, message: &str) -> Toast {
        self.show(message, Severity::Info)
    }

    /// Start the exit of an active toast. Returns false if it already left.
    pub fn dismiss(&self, id: &str) -> bool {
        let removed = {
            let mut active = self.active_guard();
            match active.iter().position(|t| t.id == id) {
                Some(pos) => active.remove(pos).is_some(),
                None => false,
            }
        };
        if removed {
            self.begin_exit(id);
        }
        removed
    }

    /// Toasts still on screen and not yet leaving, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.active_guard().iter().cloned().collect()
    }

    fn is_active(&self, id: &str) -> bool {
        self.active_guard().iter().any(|t| t.id == id)
    }

    fn begin_exit(&self, id: &str) {
        self.inner.dom.add_class(id, HIDDEN_CLASS);
        let dom = self.inner.dom.clone();
        let exit = self.inner.timings.exit;
        let id = id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(exit).await;
            dom.remove_element(&id);
        });
    }

    fn active_guard(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.inner.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Log an error that escaped async glue and show the generic error toast.
pub fn report_unexpected(toasts: &ToastQueue, error: &dyn Display) -> Toast {
    tracing::error!("Unexpected error: {}", error);
    toasts.error(UNEXPECTED_ERROR_MESSAGE)
}
