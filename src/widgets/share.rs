//! Section sharing: link builders per network and the share modal.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::Serialize;
use urlencoding::encode;

use super::toast::ToastQueue;
use crate::dom::{DocumentPart, DomEffects, ListenerId};
use crate::error::WidgetError;
use crate::html::{escape_html, handler_arg};
use crate::ids::IdGenerator;
use crate::url::set_query_param;

/// What gets shared: the page URL with `?section=<id>` and a short blurb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareData {
    pub fn for_section(current_url: &str, section_id: &str, title: &str) -> Self {
        Self {
            title: title.to_string(),
            text: format!("Check out this section: {}", title),
            url: set_query_param(current_url, "section", section_id),
        }
    }

    /// Text and URL in one line, for networks that take a single message.
    fn text_with_url(&self) -> String {
        format!("{} {}", self.text, self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShareNetwork {
    WhatsApp,
    Telegram,
    Twitter,
    Facebook,
    LinkedIn,
    Email,
}

impl ShareNetwork {
    pub const ALL: [ShareNetwork; 6] = [
        ShareNetwork::WhatsApp,
        ShareNetwork::Telegram,
        ShareNetwork::Twitter,
        ShareNetwork::Facebook,
        ShareNetwork::LinkedIn,
        ShareNetwork::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShareNetwork::WhatsApp => "WhatsApp",
            ShareNetwork::Telegram => "Telegram",
            ShareNetwork::Twitter => "Twitter",
            ShareNetwork::Facebook => "Facebook",
            ShareNetwork::LinkedIn => "LinkedIn",
            ShareNetwork::Email => "Email",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ShareNetwork::WhatsApp => "fab fa-whatsapp",
            ShareNetwork::Telegram => "fab fa-telegram",
            ShareNetwork::Twitter => "fab fa-twitter",
            ShareNetwork::Facebook => "fab fa-facebook",
            ShareNetwork::LinkedIn => "fab fa-linkedin",
            ShareNetwork::Email => "fas fa-envelope",
        }
    }

    fn button_class(&self) -> &'static str {
        match self {
            ShareNetwork::WhatsApp => "bg-green-500 hover:bg-green-600",
            ShareNetwork::Telegram => "bg-blue-500 hover:bg-blue-600",
            ShareNetwork::Twitter => "bg-blue-400 hover:bg-blue-500",
            ShareNetwork::Facebook => "bg-blue-600 hover:bg-blue-700",
            ShareNetwork::LinkedIn => "bg-blue-700 hover:bg-blue-800",
            ShareNetwork::Email => "bg-gray-600 hover:bg-gray-700",
        }
    }

    /// Outbound share link with every component URL-encoded.
    pub fn share_url(&self, data: &ShareData) -> String {
        match self {
            ShareNetwork::WhatsApp => {
                format!("https://wa.me/?text={}", encode(&data.text_with_url()))
            }
            ShareNetwork::Telegram => format!(
                "https://t.me/share/url?url={}&text={}",
                encode(&data.url),
                encode(&data.text)
            ),
            ShareNetwork::Twitter => format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode(&data.text),
                encode(&data.url)
            ),
            ShareNetwork::Facebook => format!(
                "https://www.facebook.com/sharer/sharer.php?u={}",
                encode(&data.url)
            ),
            ShareNetwork::LinkedIn => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}&title={}&summary={}",
                encode(&data.url),
                encode(&data.title),
                encode(&data.text)
            ),
            ShareNetwork::Email => format!(
                "mailto:?subject={}&body={}",
                encode(&data.title),
                encode(&data.text_with_url())
            ),
        }
    }
}

/// Id of the read-only URL input inside a modal.
pub fn url_input_id(modal_id: &str) -> String {
    format!("share-url-{}", modal_id)
}

fn modal_markup(modal_id: &str, data: &ShareData) -> String {
    let id_arg = handler_arg(modal_id);
    let buttons: String = ShareNetwork::ALL
        .iter()
        .map(|network| {
            format!(
                r#"
                    <a href="{href}" target="_blank" rel="noopener" class="flex items-center justify-center px-4 py-3 {class} text-white rounded-lg transition-colors">
                        <i class="{icon} mr-2"></i>{label}
                    </a>"#,
                href = escape_html(&network.share_url(data)),
                class = network.button_class(),
                icon = network.icon(),
                label = network.label(),
            )
        })
        .collect();

    format!(
        r#"<div id="{id}" class="share-modal fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50 animate-fade-in">
    <div class="bg-white dark:bg-gray-800 rounded-lg p-6 max-w-md w-full mx-4 transform animate-slide-in">
        <div class="flex items-center justify-between mb-4">
            <h3 class="text-lg font-semibold text-gray-900 dark:text-white">Share: {title}</h3>
            <button onclick="closeShareModal('{id_arg}')" class="p-1 text-gray-400 hover:text-gray-600 dark:hover:text-gray-300 rounded">
                <i class="fas fa-times"></i>
            </button>
        </div>
        <div class="mb-4">
            <label class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-2">Share URL:</label>
            <div class="flex items-center space-x-2">
                <input type="text" id="{input_id}" value="{url}" readonly class="flex-1 px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-lg bg-gray-50 dark:bg-gray-700 text-sm text-gray-900 dark:text-white">
                <button onclick="copyShareUrl('{id_arg}')" class="px-3 py-2 bg-orange-500 text-white rounded-lg hover:bg-orange-600 transition-colors">
                    <i class="fas fa-copy"></i>
                </button>
            </div>
        </div>
        <div class="mb-4">
            <label class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-3">Share on:</label>
            <div class="grid grid-cols-2 gap-3">{buttons}
            </div>
        </div>
        <div class="flex space-x-3">
            <button onclick="copyShareUrl('{id_arg}')" class="flex-1 flex items-center justify-center px-4 py-2 bg-orange-500 text-white rounded-lg hover:bg-orange-600 transition-colors">
                <i class="fas fa-link mr-2"></i>Copy Link
            </button>
            <button onclick="closeShareModal('{id_arg}')" class="px-4 py-2 border border-gray-300 dark:border-gray-600 text-gray-700 dark:text-gray-300 rounded-lg hover:bg-gray-50 dark:hover:bg-gray-700 transition-colors">
                Cancel
            </button>
        </div>
    </div>
</div>"#,
        id = escape_html(modal_id),
        id_arg = id_arg,
        title = escape_html(&data.title),
        input_id = escape_html(&url_input_id(modal_id)),
        url = escape_html(&data.url),
        buttons = buttons,
    )
}

struct OpenModal {
    data: ShareData,
    listener: ListenerId,
}

struct ModalShared {
    dom: Arc<dyn DomEffects>,
    ids: Arc<IdGenerator>,
    toasts: ToastQueue,
    close_delay: Duration,
    open: Mutex<FxHashMap<String, OpenModal>>,
}

/// Share modals currently on screen. Each open modal holds one Escape key
/// listener, removed on every close path.
#[derive(Clone)]
pub struct ShareModalController {
    inner: Arc<ModalShared>,
}

impl ShareModalController {
    pub fn new(
        dom: Arc<dyn DomEffects>,
        ids: Arc<IdGenerator>,
        toasts: ToastQueue,
        close_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ModalShared {
                dom,
                ids,
                toasts,
                close_delay,
                open: Mutex::new(FxHashMap::default()),
            }),
        }
    }

    /// Share button handler: open a modal for `section_id` on the current page.
    pub fn share_section(&self, section_id: &str, title: &str) -> String {
        let data = ShareData::for_section(&self.inner.dom.current_url(), section_id, title);
        self.open(data)
    }

    /// Append a modal to `<body>` and register its Escape listener.
    pub fn open(&self, data: ShareData) -> String {
        let modal_id = self.inner.ids.next_id();
        self.inner
            .dom
            .append_to(DocumentPart::Body, &modal_markup(&modal_id, &data));

        let controller = self.clone();
        let listener_modal = modal_id.clone();
        let listener = self.inner.dom.add_key_listener(Arc::new(move |key: &str| {
            controller.handle_key(&listener_modal, key);
        }));

        tracing::debug!("Opened share modal {} for {}", modal_id, data.url);
        self.open_modals()
            .insert(modal_id.clone(), OpenModal { data, listener });
        modal_id
    }

    /// Start the fade-out and drop the key listener. The element is removed
    /// after the close delay. Must be called inside a tokio runtime.
    pub fn close(&self, modal_id: &str) -> Result<(), WidgetError> {
        let modal = self
            .open_modals()
            .remove(modal_id)
            .ok_or_else(|| WidgetError::ModalNotOpen(modal_id.to_string()))?;
        self.inner.dom.remove_key_listener(modal.listener);
        self.inner.dom.add_class(modal_id, "animate-fade-out");

        let dom = self.inner.dom.clone();
        let delay = self.inner.close_delay;
        let modal_id = modal_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dom.remove_element(&modal_id);
        });
        Ok(())
    }

    /// Escape closes the modal. Returns whether the key was handled.
    pub fn handle_key(&self, modal_id: &str, key: &str) -> bool {
        key == "Escape" && self.close(modal_id).is_ok()
    }

    /// Clicks on the backdrop itself close the modal; clicks inside the
    /// dialog do not.
    pub fn handle_backdrop_click(&self, modal_id: &str, target_id: &str) -> bool {
        target_id == modal_id && self.close(modal_id).is_ok()
    }

    pub fn copy_url(&self, modal_id: &str) -> Result<(), WidgetError> {
        let url = self
            .data(modal_id)
            .map(|data| data.url)
            .ok_or_else(|| WidgetError::ModalNotOpen(modal_id.to_string()))?;
        match self.inner.dom.write_clipboard(&url) {
            Ok(()) => {
                self.inner.toasts.success("Link copied to clipboard!");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to copy: {}", e);
                self.inner.toasts.error("Failed to copy link");
                Err(e.into())
            }
        }
    }

    /// Open the network's share page in a new window.
    pub fn share_to(&self, modal_id: &str, network: ShareNetwork) -> Result<String, WidgetError> {
        let data = self
            .data(modal_id)
            .ok_or_else(|| WidgetError::ModalNotOpen(modal_id.to_string()))?;
        let url = network.share_url(&data);
        self.inner.dom.open_window(&url);
        Ok(url)
    }

    pub fn is_open(&self, modal_id: &str) -> bool {
        self.open_modals().contains_key(modal_id)
    }

    pub fn open_count(&self) -> usize {
        self.open_modals().len()
    }

    pub fn data(&self, modal_id: &str) -> Option<ShareData> {
        self.open_modals().get(modal_id).map(|m| m.data.clone())
    }

    fn open_modals(&self) -> MutexGuard<'_, FxHashMap<String, OpenModal>> {
        self.inner.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
