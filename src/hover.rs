//! Hover translation from chart events to track indices.
//!
//! The chart reports the items nearest to the pointer each time its tooltip is
//! about to be shown. The translator picks the first reported item and hands
//! its data index to the application callback. Profile samples are built one
//! per track point in track order, so that index needs no further mapping.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use log::debug;

/// Callback receiving the index of the hovered track point.
pub type HoverCallback = Rc<dyn Fn(usize)>;

/// A chart element under the pointer, as reported by the chart's interaction
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipItem {
    /// Series the element belongs to (always 0 for the profile chart)
    pub dataset_index: usize,
    /// Position of the element within its series
    pub data_index: usize,
}

impl TooltipItem {
    pub fn new(dataset_index: usize, data_index: usize) -> Self {
        Self { dataset_index, data_index }
    }
}

/// Forwards chart hover events to the registered callback.
///
/// The callback can be swapped at any time; a chart already holding this
/// translator reports to the new callback from its next event on.
pub struct HoverTranslator {
    on_hover: RefCell<Option<HoverCallback>>,
    series_len: Cell<usize>,
}

impl HoverTranslator {
    pub fn new(on_hover: Option<HoverCallback>) -> Self {
        Self { on_hover: RefCell::new(on_hover), series_len: Cell::new(0) }
    }

    /// Replace the callback, or remove it with `None`.
    pub fn set_callback(&self, on_hover: Option<HoverCallback>) {
        *self.on_hover.borrow_mut() = on_hover;
    }

    /// Record the length of the series currently displayed.
    ///
    /// Indices at or past this length belong to a superseded series and are
    /// dropped.
    pub fn set_series_len(&self, len: usize) {
        self.series_len.set(len);
    }

    pub fn series_len(&self) -> usize {
        self.series_len.get()
    }

    pub fn has_callback(&self) -> bool {
        self.on_hover.borrow().is_some()
    }

    /// Track index for a hover event: the first item's data index, if it lies
    /// within the current series.
    pub fn translate(&self, items: &[TooltipItem]) -> Option<usize> {
        let first = items.first()?;
        if first.data_index >= self.series_len.get() {
            debug!(
                "[HoverTranslator] Dropping index {} outside series of {}",
                first.data_index,
                self.series_len.get()
            );
            return None;
        }
        Some(first.data_index)
    }

    /// Handle one hover event, invoking the callback at most once.
    ///
    /// # Arguments
    ///
    /// * `items` - Elements nearest to the pointer, in the order the chart
    ///   reports them
    ///
    /// # Returns
    ///
    /// The track index passed to the callback, or `None` when no callback is
    /// registered, `items` is empty or the first index lies outside the
    /// current series.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use track_profile::{HoverTranslator, TooltipItem};
    ///
    /// let hovered = Rc::new(Cell::new(None));
    /// let sink = hovered.clone();
    /// let translator = HoverTranslator::new(Some(Rc::new(move |i: usize| sink.set(Some(i)))));
    /// translator.set_series_len(10);
    ///
    /// assert_eq!(translator.handle(&[TooltipItem::new(0, 4), TooltipItem::new(0, 5)]), Some(4));
    /// assert_eq!(hovered.get(), Some(4));
    /// ```
    pub fn handle(&self, items: &[TooltipItem]) -> Option<usize> {
        // Cloned out so the callback may replace itself
        let on_hover = self.on_hover.borrow().clone()?;
        let index = self.translate(items)?;
        on_hover(index);
        Some(index)
    }
}

impl fmt::Debug for HoverTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverTranslator")
            .field("has_callback", &self.has_callback())
            .field("series_len", &self.series_len.get())
            .finish()
    }
}
