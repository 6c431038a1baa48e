//! Deferred Asset Loader
//!
//! Per code block: `Pending -> Loading -> Loaded | Errored`. The load starts
//! a short delay after the markup is attached, shows the loading indicator
//! while the fetch is in flight, then writes the file text (or an error
//! placeholder) into the `<code>` element.
//!
//! Every `schedule`/`load` for a target takes a new generation. A fetch that
//! settles after a newer generation started is discarded instead of
//! overwriting the newer content. Only in-flight loads are tracked; a target
//! is forgotten once its latest load settles.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tokio::task::JoinHandle;

use super::{AssetFetcher, DeferredCodeAsset};
use crate::dom::DomEffects;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadState {
    Pending,
    Loading,
    Loaded,
    Errored,
    /// Superseded by a newer load of the same target; nothing was written.
    Discarded,
}

impl LoadState {
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Errored | LoadState::Discarded)
    }
}

/// Optional syntax highlighting hook. Absence is silently tolerated.
pub trait SyntaxHighlighter: Send + Sync {
    fn highlight_element(&self, dom: &dyn DomEffects, id: &str);

    fn highlight_all(&self, dom: &dyn DomEffects);
}

/// In-flight loads. Generations are unique across targets, so a pruned
/// target never hands a stale load a matching generation.
#[derive(Default)]
struct Tracker {
    next: u64,
    targets: FxHashMap<String, (u64, LoadState)>,
}

pub struct DeferredAssetLoader<F> {
    dom: Arc<dyn DomEffects>,
    fetcher: Arc<F>,
    highlighter: Option<Arc<dyn SyntaxHighlighter>>,
    delay: Duration,
    tracker: Arc<Mutex<Tracker>>,
}

impl<F> Clone for DeferredAssetLoader<F> {
    fn clone(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            fetcher: self.fetcher.clone(),
            highlighter: self.highlighter.clone(),
            delay: self.delay,
            tracker: self.tracker.clone(),
        }
    }
}

impl<F: AssetFetcher> DeferredAssetLoader<F> {
    pub fn new(dom: Arc<dyn DomEffects>, fetcher: Arc<F>, delay: Duration) -> Self {
        Self {
            dom,
            fetcher,
            highlighter: None,
            delay,
            tracker: Arc::new(Mutex::new(Tracker::default())),
        }
    }

    pub fn with_highlighter(mut self, highlighter: Arc<dyn SyntaxHighlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn highlighter(&self) -> Option<&Arc<dyn SyntaxHighlighter>> {
        self.highlighter.as_ref()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// State of the in-flight load for a content element. `None` once it
    /// settled or if none was started.
    pub fn state(&self, content_id: &str) -> Option<LoadState> {
        self.tracker().targets.get(content_id).map(|(_, state)| *state)
    }

    /// Number of targets with a load in flight.
    pub fn in_flight(&self) -> usize {
        self.tracker().targets.len()
    }

    /// Load after the configured delay. Must be called inside a tokio runtime.
    pub fn schedule(&self, asset: DeferredCodeAsset) -> JoinHandle<LoadState> {
        let generation = self.begin(&asset.content_id);
        let loader = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(loader.delay).await;
            loader.run(asset, generation).await
        })
    }

    pub fn schedule_all(&self, assets: Vec<DeferredCodeAsset>) -> Vec<JoinHandle<LoadState>> {
        assets.into_iter().map(|asset| self.schedule(asset)).collect()
    }

    /// Load now, without the delay.
    pub async fn load(&self, asset: DeferredCodeAsset) -> LoadState {
        let generation = self.begin(&asset.content_id);
        self.run(asset, generation).await
    }

    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, content_id: &str) -> u64 {
        let mut tracker = self.tracker();
        tracker.next += 1;
        let generation = tracker.next;
        tracker
            .targets
            .insert(content_id.to_string(), (generation, LoadState::Pending));
        generation
    }

    /// Record `state` if `generation` is still the latest for the target.
    fn advance(&self, content_id: &str, generation: u64, state: LoadState) -> bool {
        match self.tracker().targets.get_mut(content_id) {
            Some(entry) if entry.0 == generation => {
                entry.1 = state;
                true
            }
            _ => false,
        }
    }

    /// Forget the target if `generation` is still the latest for it.
    fn settle(&self, content_id: &str, generation: u64) -> bool {
        let mut tracker = self.tracker();
        let latest = tracker.targets.get(content_id).map(|(latest, _)| *latest);
        if latest != Some(generation) {
            return false;
        }
        tracker.targets.remove(content_id);
        true
    }

    async fn run(&self, asset: DeferredCodeAsset, generation: u64) -> LoadState {
        if !self.advance(&asset.content_id, generation, LoadState::Loading) {
            return LoadState::Discarded;
        }
        self.dom.remove_class(&asset.loader_id, "hidden");
        tracing::debug!("Loading code from: {}", asset.fetch_path);

        let result = self.fetcher.fetch_text(&asset.fetch_path).await;

        let (text, state) = match result {
            Ok(text) => (text, LoadState::Loaded),
            Err(e) => {
                tracing::error!("Failed to read file: {} ({})", asset.source_path, e);
                (asset.error_placeholder(&e.to_string()), LoadState::Errored)
            }
        };

        if !self.settle(&asset.content_id, generation) {
            tracing::debug!(
                "Discarding stale load of {} into {}",
                asset.fetch_path,
                asset.content_id
            );
            return LoadState::Discarded;
        }

        self.dom.add_class(&asset.loader_id, "hidden");
        if !self.dom.set_text_content(&asset.content_id, &text) {
            tracing::debug!("Code element {} is gone; content dropped", asset.content_id);
            return state;
        }
        if state == LoadState::Loaded {
            if let Some(highlighter) = &self.highlighter {
                highlighter.highlight_element(self.dom.as_ref(), &asset.content_id);
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticFetcher;
    use crate::dom::MemoryDom;
    use crate::error::FetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn code_block(asset: &DeferredCodeAsset) -> String {
        format!(
            r#"<div id="{}" class="hidden"></div><code id="{}">Loading...</code>"#,
            asset.loader_id, asset.content_id
        )
    }

    #[derive(Default)]
    struct CountingHighlighter {
        calls: AtomicUsize,
    }

    impl SyntaxHighlighter for CountingHighlighter {
        fn highlight_element(&self, _dom: &dyn DomEffects, _id: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn highlight_all(&self, _dom: &dyn DomEffects) {}
    }

    /// Answers after a per-path delay, so two loads can settle out of order.
    struct SlowFetcher;

    impl AssetFetcher for SlowFetcher {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            let delay = if path.contains("slow") { 500 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!("body of {}", path))
        }
    }

    /// Holds every fetch until released; paths containing "bad" then fail.
    #[derive(Default)]
    struct GatedFetcher {
        release: Notify,
    }

    impl AssetFetcher for GatedFetcher {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            self.release.notified().await;
            if path.contains("bad") {
                Err(FetchError::not_found())
            } else {
                Ok(format!("body of {}", path))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_load_fills_element() {
        let asset = DeferredCodeAsset::new("./src/a.js", "code-1");
        let dom = Arc::new(MemoryDom::from_body_html("http://localhost/", &code_block(&asset)));
        let fetcher = Arc::new(StaticFetcher::new().with_file("/src/a.js", "const x=1;"));
        let highlighter = Arc::new(CountingHighlighter::default());
        let loader = DeferredAssetLoader::new(dom.clone(), fetcher, Duration::from_millis(100))
            .with_highlighter(highlighter.clone());

        let handle = loader.schedule(asset.clone());
        assert_eq!(loader.state("code-1"), Some(LoadState::Pending));
        assert_eq!(dom.text_content("code-1").as_deref(), Some("Loading..."));

        assert_eq!(handle.await.unwrap(), LoadState::Loaded);
        assert_eq!(dom.text_content("code-1").as_deref(), Some("const x=1;"));
        assert!(dom.has_class(&asset.loader_id, "hidden"));
        assert_eq!(highlighter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.state("code-1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_indicator_visible_only_while_fetching() {
        let asset = DeferredCodeAsset::new("./src/bad.js", "code-4");
        let dom = Arc::new(MemoryDom::from_body_html("http://localhost/", &code_block(&asset)));
        let fetcher = Arc::new(GatedFetcher::default());
        let loader = DeferredAssetLoader::new(dom.clone(), fetcher.clone(), Duration::from_millis(100));

        let handle = loader.schedule(asset.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(loader.state("code-4"), Some(LoadState::Pending));
        assert!(dom.has_class(&asset.loader_id, "hidden"));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(loader.state("code-4"), Some(LoadState::Loading));
        assert!(!dom.has_class(&asset.loader_id, "hidden"));
        assert_eq!(dom.text_content("code-4").as_deref(), Some("Loading..."));

        fetcher.release.notify_one();
        assert_eq!(handle.await.unwrap(), LoadState::Errored);
        assert!(dom.has_class(&asset.loader_id, "hidden"));
        assert!(dom.text_content("code-4").unwrap().contains("HTTP 404: Not Found"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_targets_are_forgotten() {
        let assets: Vec<DeferredCodeAsset> = (0..100)
            .map(|i| DeferredCodeAsset::new(&format!("/src/f{}.js", i), format!("code-f{}", i)))
            .collect();
        let markup: String = assets.iter().map(code_block).collect();
        let dom = Arc::new(MemoryDom::from_body_html("http://localhost/", &markup));
        let loader = DeferredAssetLoader::new(dom.clone(), Arc::new(SlowFetcher), Duration::from_millis(100));

        let handles = loader.schedule_all(assets);
        assert_eq!(loader.in_flight(), 100);
        for handle in handles {
            assert_eq!(handle.await.unwrap(), LoadState::Loaded);
        }
        assert_eq!(loader.in_flight(), 0);
        assert_eq!(dom.text_content("code-f7").as_deref(), Some("body of /src/f7.js"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_shows_placeholder() {
        let asset = DeferredCodeAsset::new("lib/missing.rs", "code-2");
        let dom = Arc::new(MemoryDom::from_body_html("http://localhost/", &code_block(&asset)));
        let loader = DeferredAssetLoader::new(
            dom.clone(),
            Arc::new(StaticFetcher::new()),
            Duration::from_millis(100),
        );

        assert_eq!(loader.load(asset).await, LoadState::Errored);
        assert_eq!(
            dom.text_content("code-2").as_deref(),
            Some("// Error: Could not load file missing.rs\n// HTTP 404: Not Found")
        );
        assert_eq!(loader.state("code-2"), None);
        assert_eq!(loader.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_completion_is_discarded() {
        let slow = DeferredCodeAsset::new("/slow.js", "code-3");
        let fast = DeferredCodeAsset::new("/fast.js", "code-3");
        let dom = Arc::new(MemoryDom::from_body_html("http://localhost/", &code_block(&slow)));
        let loader = DeferredAssetLoader::new(dom.clone(), Arc::new(SlowFetcher), Duration::ZERO);

        let first = loader.schedule(slow);
        tokio::time::sleep(Duration::from_millis(1)).await;
        let second = loader.schedule(fast);

        assert_eq!(second.await.unwrap(), LoadState::Loaded);
        assert_eq!(first.await.unwrap(), LoadState::Discarded);
        assert_eq!(dom.text_content("code-3").as_deref(), Some("body of /fast.js"));
        assert_eq!(loader.in_flight(), 0);
    }
}
