//! In-memory Document
//!
//! A flat map of identified elements, each with classes, text, an input
//! value and one kind of generated content. Child elements exist only so
//! that scoped writes (`.kpi-value`) have somewhere to land.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::dashboard::charts::{ChartRegion, Placeholder};
use crate::dashboard::plot::PlotSpec;
use crate::page::{ids, Page};

/// Generated content of an element
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    Empty,
    Plot(PlotSpec),
    Placeholder(Placeholder),
    Options(Vec<String>),
    Items(Vec<String>),
}

/// A page element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub classes: BTreeSet<String>,
    pub text: Option<String>,
    pub value: String,
    pub disabled: bool,
    pub content: Content,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// First descendant matching a class selector (`.name`)
    ///
    /// Only class selectors are understood; anything else matches nothing.
    fn select_mut(&mut self, selector: &str) -> Option<&mut Element> {
        let class = selector.strip_prefix('.')?;
        for child in &mut self.children {
            if child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.select_mut(selector) {
                return Some(found);
            }
        }
        None
    }

    fn select(&self, selector: &str) -> Option<&Element> {
        let class = selector.strip_prefix('.')?;
        self.children.iter().find_map(|child| {
            if child.has_class(class) {
                Some(child)
            } else {
                child.select(selector)
            }
        })
    }

    /// Text replaces every kind of generated content, as `textContent` does
    fn replace_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.content = Content::Empty;
        self.children.clear();
    }
}

/// The page as a set of identified elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's structural elements, before any component has run
    pub fn dashboard() -> Self {
        let mut doc = Self::new();

        for id in [
            ids::TOTAL_REQUESTS,
            ids::COMPLETION_RATE,
            ids::TOP_WARD,
            ids::TOP_SERVICE_TYPE,
        ] {
            doc.insert(
                id,
                Element::new()
                    .class("kpi-card")
                    .child(Element::new().class("kpi-value").text("--")),
            );
        }

        for id in [
            ids::ML_ACCURACY,
            ids::ML_PRECISION,
            ids::ML_RECALL,
            ids::ML_F1_SCORE,
            ids::BEST_SERVICE_TYPE,
            ids::BEST_WARD,
            ids::BEST_DIVISION,
        ] {
            doc.insert(id, Element::new().text("--"));
        }

        doc.insert(ids::DATA_STATUS, Element::new().text("Loading..."));
        doc.insert(ids::LAST_UPDATED, Element::new());
        doc.insert(ids::LOADING_OVERLAY, Element::new().class("loading-overlay"));

        for region in ChartRegion::ALL {
            doc.insert(region.element_id(), Element::new().class("chart"));
        }

        for id in [ids::SERVICE_TYPE_LIST, ids::WARD_LIST, ids::DIVISION_LIST] {
            doc.insert(id, Element::new());
        }

        for id in [
            ids::SERVICE_TYPE_INPUT,
            ids::WARD_INPUT,
            ids::DIVISION_INPUT,
            ids::POSTAL_CODE_INPUT,
            ids::TIME_OF_DAY_INPUT,
            ids::DAY_OF_WEEK_INPUT,
        ] {
            doc.insert(id, Element::new());
        }
        doc.insert(
            ids::PREDICT_BUTTON,
            Element::new().text(crate::prediction::PREDICT_LABEL),
        );

        doc.insert(ids::PREDICTION_PLACEHOLDER, Element::new());
        doc.insert(
            ids::PREDICTION_RESULTS,
            Element::new().class(ids::HIDDEN_CLASS),
        );
        for id in [
            ids::PROBABILITY_PERCENT,
            ids::OUTCOME_VALUE,
            ids::CONFIDENCE_VALUE,
            ids::INFLUENCING_FACTORS,
        ] {
            doc.insert(id, Element::new());
        }

        doc.insert(ids::ERROR_MODAL, Element::new().class(ids::HIDDEN_CLASS));
        doc.insert(ids::ERROR_MESSAGE, Element::new());
        doc.insert(ids::CLOSE_ERROR, Element::new().text("Close"));

        doc
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Own text of an element
    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id)?.text.as_deref()
    }

    /// Text of the first descendant matching a class selector
    pub fn selected_text(&self, id: &str, selector: &str) -> Option<&str> {
        self.element(id)?.select(selector)?.text.as_deref()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn content(&self, id: &str) -> Option<&Content> {
        self.element(id).map(|e| &e.content)
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.element(id).is_some_and(|e| e.disabled)
    }
}

impl Page for Document {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_text(&mut self, id: &str, selector: Option<&str>, text: &str) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };

        let target = match selector {
            Some(selector) => match element.select_mut(selector) {
                Some(target) => target,
                None => return false,
            },
            None => element,
        };

        target.replace_text(text);
        true
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.remove(class);
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.value = value.to_string();
        }
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.disabled = disabled;
        }
    }

    fn replace_options(&mut self, id: &str, options: &[String]) {
        self.set_content(id, Content::Options(options.to_vec()));
    }

    fn replace_items(&mut self, id: &str, items: &[String]) {
        self.set_content(id, Content::Items(items.to_vec()));
    }

    fn plot(&mut self, id: &str, spec: &PlotSpec) {
        self.set_content(id, Content::Plot(spec.clone()));
    }

    fn show_placeholder(&mut self, id: &str, placeholder: &Placeholder) {
        self.set_content(id, Content::Placeholder(placeholder.clone()));
    }

    fn batch(&mut self, writes: &mut dyn FnMut(&mut dyn Page)) {
        writes(self)
    }
}

impl Document {
    fn set_content(&mut self, id: &str, content: Content) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = None;
            element.children.clear();
            element.content = content;
        }
    }
}

/// A document shared between concurrent flows.
///
/// The lock is taken per page operation only, so a flow suspended on the
/// network never blocks readers or other flows.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument {
    inner: Arc<Mutex<Document>>,
}

impl SharedDocument {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(document)),
        }
    }

    /// Lock the document for inspection or direct edits
    pub fn lock(&self) -> MutexGuard<'_, Document> {
        // A panic mid-write leaves the document usable; carry on with it
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current document
    pub fn snapshot(&self) -> Document {
        self.lock().clone()
    }
}

impl Page for SharedDocument {
    fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    fn set_text(&mut self, id: &str, selector: Option<&str>, text: &str) -> bool {
        self.lock().set_text(id, selector, text)
    }

    fn add_class(&mut self, id: &str, class: &str) {
        self.lock().add_class(id, class)
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        self.lock().remove_class(id, class)
    }

    fn value(&self, id: &str) -> Option<String> {
        self.lock().value(id)
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.lock().set_value(id, value)
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        self.lock().set_disabled(id, disabled)
    }

    fn replace_options(&mut self, id: &str, options: &[String]) {
        self.lock().replace_options(id, options)
    }

    fn replace_items(&mut self, id: &str, items: &[String]) {
        self.lock().replace_items(id, items)
    }

    fn plot(&mut self, id: &str, spec: &PlotSpec) {
        self.lock().plot(id, spec)
    }

    fn show_placeholder(&mut self, id: &str, placeholder: &Placeholder) {
        self.lock().show_placeholder(id, placeholder)
    }

    fn batch(&mut self, writes: &mut dyn FnMut(&mut dyn Page)) {
        let mut document = self.lock();
        writes(&mut *document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_text_lands_in_child() {
        let mut doc = Document::dashboard();
        assert!(doc.set_text(ids::TOTAL_REQUESTS, Some(".kpi-value"), "202,600"));
        assert_eq!(
            doc.selected_text(ids::TOTAL_REQUESTS, ".kpi-value"),
            Some("202,600")
        );
        assert_eq!(doc.text(ids::TOTAL_REQUESTS), None);
    }

    #[test]
    fn test_missing_targets_are_noops() {
        let mut doc = Document::new();
        assert!(!doc.set_text("nope", None, "x"));
        doc.add_class("nope", "hidden");
        doc.plot("nope", &dummy_spec());
        assert_eq!(doc, Document::new());

        let mut doc = Document::dashboard();
        assert!(!doc.set_text(ids::ML_ACCURACY, Some(".kpi-value"), "84%"));
        assert!(!doc.set_text(ids::TOTAL_REQUESTS, Some("#not-a-class"), "x"));
        assert_eq!(doc.text(ids::ML_ACCURACY), Some("--"));
    }

    fn dummy_spec() -> PlotSpec {
        use crate::dashboard::plot::{Layout, Margin, PlotConfig};
        PlotSpec {
            data: vec![],
            layout: Layout::dark(12, Margin::new(0, 0, 0, 0)),
            config: PlotConfig::default(),
        }
    }

    #[test]
    fn test_content_replaces_text_and_vice_versa() {
        let mut doc = Document::dashboard();
        doc.show_placeholder(ids::WARD_CHART, &Placeholder::BACKEND_UNAVAILABLE);
        assert!(matches!(
            doc.content(ids::WARD_CHART),
            Some(Content::Placeholder(_))
        ));

        doc.plot(ids::WARD_CHART, &dummy_spec());
        assert!(matches!(doc.content(ids::WARD_CHART), Some(Content::Plot(_))));

        doc.set_text(ids::WARD_CHART, None, "cleared");
        assert_eq!(doc.content(ids::WARD_CHART), Some(&Content::Empty));
    }

    #[test]
    fn test_class_toggling() {
        let mut doc = Document::dashboard();
        assert!(doc.has_class(ids::ERROR_MODAL, ids::HIDDEN_CLASS));

        doc.show_error("boom");
        assert!(!doc.has_class(ids::ERROR_MODAL, ids::HIDDEN_CLASS));
        assert_eq!(doc.text(ids::ERROR_MESSAGE), Some("boom"));

        doc.hide_error();
        assert!(doc.has_class(ids::ERROR_MODAL, ids::HIDDEN_CLASS));
    }

    #[test]
    fn test_shared_batch_holds_lock_throughout() {
        let shared = SharedDocument::new(Document::dashboard());
        let observer = shared.clone();
        let mut handle = shared.clone();

        let mut locked_midway = false;
        handle.batch(&mut |page| {
            page.set_text(ids::DATA_STATUS, None, "first");
            locked_midway = observer.inner.try_lock().is_err();
            page.set_text(ids::LAST_UPDATED, None, "second");
        });

        assert!(locked_midway);
        let doc = shared.snapshot();
        assert_eq!(doc.text(ids::DATA_STATUS), Some("first"));
        assert_eq!(doc.text(ids::LAST_UPDATED), Some("second"));
    }

    #[test]
    fn test_shared_document_writes_through() {
        let shared = SharedDocument::new(Document::dashboard());
        let mut handle = shared.clone();
        handle.set_disabled(ids::PREDICT_BUTTON, true);
        handle.replace_items(ids::INFLUENCING_FACTORS, &["a".to_string()]);

        let doc = shared.snapshot();
        assert!(doc.is_disabled(ids::PREDICT_BUTTON));
        assert_eq!(
            doc.content(ids::INFLUENCING_FACTORS),
            Some(&Content::Items(vec!["a".to_string()]))
        );
    }
}
