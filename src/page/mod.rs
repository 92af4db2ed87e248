//! Page Model
//!
//! The dashboard components never touch markup directly. They address
//! elements by identifier through the [`Page`] trait, which is implemented by
//! the in-memory [`Document`] and rendered to HTML by [`html::render_page`].

pub mod document;
pub mod html;
pub mod ids;

pub use document::{Content, Document, Element, SharedDocument};

use crate::dashboard::charts::Placeholder;
use crate::dashboard::plot::PlotSpec;

/// Operations the dashboard components perform on the page.
///
/// Every write addressed to a missing element is a no-op.
pub trait Page {
    /// Whether an element with this id exists
    fn contains(&self, id: &str) -> bool;

    /// Replace the text of an element, or of its first descendant matching a
    /// class selector such as `.kpi-value`. Returns whether a node was written.
    fn set_text(&mut self, id: &str, selector: Option<&str>, text: &str) -> bool;

    fn add_class(&mut self, id: &str, class: &str);

    fn remove_class(&mut self, id: &str, class: &str);

    /// Current value of an input element
    fn value(&self, id: &str) -> Option<String>;

    /// Set an input's value, as typing into it would
    fn set_value(&mut self, id: &str, value: &str);

    fn set_disabled(&mut self, id: &str, disabled: bool);

    /// Replace the options of a suggestion list
    fn replace_options(&mut self, id: &str, options: &[String]);

    /// Replace the items of a bulleted list
    fn replace_items(&mut self, id: &str, items: &[String]);

    /// Draw a chart into a container
    fn plot(&mut self, id: &str, spec: &PlotSpec);

    /// Replace a container's content with a placeholder
    fn show_placeholder(&mut self, id: &str, placeholder: &Placeholder);

    /// Apply several writes as one unit; no reader sees the page halfway
    /// through `writes`
    fn batch(&mut self, writes: &mut dyn FnMut(&mut dyn Page));

    /// Show the error dialog with a message
    fn show_error(&mut self, message: &str) {
        if self.contains(ids::ERROR_MODAL) && self.contains(ids::ERROR_MESSAGE) {
            self.set_text(ids::ERROR_MESSAGE, None, message);
            self.remove_class(ids::ERROR_MODAL, ids::HIDDEN_CLASS);
        }
    }

    /// Dismiss the error dialog
    fn hide_error(&mut self) {
        self.add_class(ids::ERROR_MODAL, ids::HIDDEN_CLASS);
    }
}
