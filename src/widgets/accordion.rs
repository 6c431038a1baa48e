//! Accordion expand/collapse.
//!
//! An item is expanded when its panel lacks the `hidden` class. Expanding
//! animates `max-height` from 0 to the measured content height; collapsing
//! animates back to 0 and hides the panel once the transition window ends.
//! Each toggle takes a new generation for the item, so the end-of-transition
//! step of an older toggle never touches a panel that was toggled again. While
//! a transition runs, the item counts as being in its target state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::components::renderers::accordion::{chevron_id, items_container_id};
use crate::dom::DomEffects;

const HIDDEN: &str = "hidden";
const PANEL_CLASS: &str = "accordion-content";
const CHEVRON_OPEN: &str = "rotate-180";

/// A rendered accordion read back from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionGroup {
    pub id: String,
    pub allow_multiple: bool,
    /// Panel ids in document order.
    pub items: Vec<String>,
}

impl AccordionGroup {
    pub fn from_dom(dom: &dyn DomEffects, accordion_id: &str) -> Option<Self> {
        if !dom.exists(accordion_id) {
            return None;
        }
        let allow_multiple = dom
            .attribute(&items_container_id(accordion_id), "data-multiple")
            .map(|v| v == "true")
            .unwrap_or(false);
        Some(Self {
            id: accordion_id.to_string(),
            allow_multiple,
            items: dom.descendant_ids_with_class(accordion_id, PANEL_CLASS),
        })
    }
}

/// Running transitions: generation and target state per item. Generations
/// are unique across items, so a settled item never matches a stale finish.
#[derive(Default)]
struct Transitions {
    next: u64,
    items: FxHashMap<String, (u64, bool)>,
}

#[derive(Clone)]
pub struct AccordionController {
    dom: Arc<dyn DomEffects>,
    transition: Duration,
    transitions: Arc<Mutex<Transitions>>,
}

impl AccordionController {
    pub fn new(dom: Arc<dyn DomEffects>, transition: Duration) -> Self {
        Self {
            dom,
            transition,
            transitions: Arc::new(Mutex::new(Transitions::default())),
        }
    }

    /// Toggle one item of a group. With `allow_multiple == false` every other
    /// expanded item of the group is collapsed first. Returns whether the item
    /// ends up expanded; a missing item is a no-op returning false.
    ///
    /// Must be called inside a tokio runtime.
    pub fn toggle(&self, item_id: &str, group_id: &str, allow_multiple: bool) -> bool {
        if !self.dom.exists(item_id) {
            tracing::warn!("Accordion item {} not found", item_id);
            return false;
        }

        if !allow_multiple {
            for other in self.dom.descendant_ids_with_class(group_id, PANEL_CLASS) {
                if other != item_id && !self.dom.has_class(&other, HIDDEN) {
                    self.collapse_now(&other);
                }
            }
        }

        let expanded = self
            .pending_target(item_id)
            .unwrap_or_else(|| !self.dom.has_class(item_id, HIDDEN));
        if expanded {
            self.collapse(item_id);
            false
        } else {
            self.expand(item_id);
            true
        }
    }

    pub fn is_expanded(&self, item_id: &str) -> bool {
        self.dom.exists(item_id) && !self.dom.has_class(item_id, HIDDEN)
    }

    /// Expanded panels of a group, in document order.
    pub fn expanded_items(&self, group_id: &str) -> Vec<String> {
        self.dom
            .descendant_ids_with_class(group_id, PANEL_CLASS)
            .into_iter()
            .filter(|id| !self.dom.has_class(id, HIDDEN))
            .collect()
    }

    fn expand(&self, item_id: &str) {
        let generation = self.next_generation(item_id, Some(true));
        self.dom.remove_class(item_id, HIDDEN);
        self.begin_transition(item_id, "0px");
        let height = self.dom.scroll_height(item_id).unwrap_or(0.0);
        self.dom
            .set_style(item_id, "max-height", Some(&format!("{}px", height)));
        self.dom.add_class(&chevron_id(item_id), CHEVRON_OPEN);

        self.after_transition(item_id, generation, |dom, id| clear_transition(dom, id));
    }

    fn collapse(&self, item_id: &str) {
        let generation = self.next_generation(item_id, Some(false));
        let height = self.dom.scroll_height(item_id).unwrap_or(0.0);
        self.begin_transition(item_id, &format!("{}px", height));
        self.dom.set_style(item_id, "max-height", Some("0px"));
        self.dom.remove_class(&chevron_id(item_id), CHEVRON_OPEN);

        self.after_transition(item_id, generation, |dom, id| {
            dom.add_class(id, HIDDEN);
            clear_transition(dom, id);
        });
    }

    /// Sibling collapse: immediate, no transition.
    fn collapse_now(&self, item_id: &str) {
        self.next_generation(item_id, None);
        self.dom.add_class(item_id, HIDDEN);
        clear_transition(self.dom.as_ref(), item_id);
        self.dom.remove_class(&chevron_id(item_id), CHEVRON_OPEN);
    }

    fn begin_transition(&self, item_id: &str, max_height: &str) {
        self.dom.set_style(item_id, "max-height", Some(max_height));
        self.dom.set_style(item_id, "overflow", Some("hidden"));
        self.dom.set_style(
            item_id,
            "transition",
            Some(&format!("max-height {}s ease-out", self.transition.as_secs_f64())),
        );
    }

    fn after_transition<G>(&self, item_id: &str, generation: u64, finish: G)
    where
        G: FnOnce(&dyn DomEffects, &str) + Send + 'static,
    {
        let controller = self.clone();
        let item_id = item_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(controller.transition).await;
            if controller.settle(&item_id, generation) {
                finish(controller.dom.as_ref(), &item_id);
            } else {
                tracing::debug!("Accordion {} toggled again; skipping stale finish", item_id);
            }
        });
    }

    fn transitions(&self) -> MutexGuard<'_, Transitions> {
        self.transitions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a transition towards `target`, or with `None` cancel the running
    /// one so its finish is skipped.
    fn next_generation(&self, item_id: &str, target: Option<bool>) -> u64 {
        let mut transitions = self.transitions();
        transitions.next += 1;
        let generation = transitions.next;
        match target {
            Some(target) => {
                transitions
                    .items
                    .insert(item_id.to_string(), (generation, target));
            }
            None => {
                transitions.items.remove(item_id);
            }
        }
        generation
    }

    fn pending_target(&self, item_id: &str) -> Option<bool> {
        self.transitions().items.get(item_id).map(|(_, target)| *target)
    }

    /// End the transition if `generation` is still the latest for the item.
    fn settle(&self, item_id: &str, generation: u64) -> bool {
        let mut transitions = self.transitions();
        let latest = transitions.items.get(item_id).map(|(latest, _)| *latest);
        if latest != Some(generation) {
            return false;
        }
        transitions.items.remove(item_id);
        true
    }

    /// Number of items with a transition still running.
    pub fn running_transitions(&self) -> usize {
        self.transitions().items.len()
    }
}

fn clear_transition(dom: &dyn DomEffects, item_id: &str) {
    dom.set_style(item_id, "max-height", None);
    dom.set_style(item_id, "overflow", None);
    dom.set_style(item_id, "transition", None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    const GROUP: &str = r#"<section id="acc"><div id="acc-items" data-accordion="acc" data-multiple="false">
        <div id="acc-item-0" class="accordion-content hidden">A</div><i id="acc-item-0-chevron"></i>
        <div id="acc-item-1" class="accordion-content hidden">B</div><i id="acc-item-1-chevron"></i>
        <div id="acc-item-2" class="accordion-content hidden">C</div><i id="acc-item-2-chevron"></i>
    </div></section>"#;

    fn controller() -> (Arc<MemoryDom>, AccordionController) {
        let dom = Arc::new(MemoryDom::from_body_html("http://localhost/", GROUP));
        dom.set_element_layout("acc-item-0", 0.0, 120.0);
        let controller = AccordionController::new(dom.clone(), Duration::from_millis(300));
        (dom, controller)
    }

    #[test]
    fn test_group_from_dom() {
        let (dom, _) = controller();
        let group = AccordionGroup::from_dom(dom.as_ref(), "acc").unwrap();
        assert!(!group.allow_multiple);
        assert_eq!(group.items, vec!["acc-item-0", "acc-item-1", "acc-item-2"]);
        assert!(AccordionGroup::from_dom(dom.as_ref(), "nope").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expand_animates_then_settles() {
        let (dom, acc) = controller();
        assert!(acc.toggle("acc-item-0", "acc", false));
        assert_eq!(dom.style("acc-item-0", "max-height").as_deref(), Some("120px"));
        assert!(dom.has_class("acc-item-0-chevron", CHEVRON_OPEN));

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(dom.style("acc-item-0", "max-height"), None);
        assert!(acc.is_expanded("acc-item-0"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_mode_keeps_one_open() {
        let (_dom, acc) = controller();
        acc.toggle("acc-item-0", "acc", false);
        acc.toggle("acc-item-2", "acc", false);
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(acc.expanded_items("acc"), vec!["acc-item-2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_multiple_mode_keeps_others() {
        let (_dom, acc) = controller();
        acc.toggle("acc-item-0", "acc", true);
        acc.toggle("acc-item-1", "acc", true);
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(acc.expanded_items("acc"), vec!["acc-item-0", "acc-item-1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_during_collapse_stays_open() {
        let (_dom, acc) = controller();
        acc.toggle("acc-item-0", "acc", false);
        tokio::time::sleep(Duration::from_millis(350)).await;

        assert!(!acc.toggle("acc-item-0", "acc", false));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(acc.toggle("acc-item-0", "acc", false));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(acc.expanded_items("acc"), vec!["acc-item-0"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_transitions_are_forgotten() {
        let (_dom, acc) = controller();
        acc.toggle("acc-item-0", "acc", false);
        acc.toggle("acc-item-1", "acc", false);
        assert_eq!(acc.running_transitions(), 1);

        for round in 0..30 {
            let item = format!("acc-item-{}", round % 3);
            acc.toggle(&item, "acc", false);
            tokio::time::sleep(Duration::from_millis(350)).await;
        }
        assert_eq!(acc.running_transitions(), 0);
        assert!(acc.expanded_items("acc").len() <= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_item_is_noop() {
        let (_dom, acc) = controller();
        assert!(!acc.toggle("ghost", "acc", false));
        assert!(acc.expanded_items("acc").is_empty());
    }
}
