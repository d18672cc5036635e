//! Optional id → view-handle registry for imperative highlighting.
//!
//! Lets hover highlighting of nearest cells be applied to live view handles
//! without re-rendering the whole grid. Only materialized cells have
//! handles, so every lookup tolerates a missing id.

use std::collections::{HashMap, HashSet};

use crate::types::CellId;

/// A rendered cell that can be toggled between normal and highlighted.
pub trait HighlightTarget {
    fn set_highlighted(&mut self, highlighted: bool);
}

/// Registry of live cell handles.
pub struct HighlightRegistry<H> {
    handles: HashMap<CellId, H>,
    highlighted: HashSet<CellId>,
}

impl<H> Default for HighlightRegistry<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
            highlighted: HashSet::new(),
        }
    }
}

impl<H: HighlightTarget> HighlightRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handle when a cell's view is created.
    ///
    /// A cell that is currently highlighted is highlighted on arrival.
    pub fn register(&mut self, id: CellId, mut handle: H) {
        if self.highlighted.contains(&id) {
            handle.set_highlighted(true);
        }
        self.handles.insert(id, handle);
    }

    /// Drop a handle when a cell's view is destroyed.
    pub fn unregister(&mut self, id: CellId) -> Option<H> {
        self.handles.remove(&id)
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn is_highlighted(&self, id: CellId) -> bool {
        self.highlighted.contains(&id)
    }

    /// Highlight exactly `ids`, un-highlighting whatever was lit before.
    ///
    /// Ids without a registered handle are remembered so their handle lights
    /// up if it is registered later.
    pub fn apply(&mut self, ids: &[CellId]) {
        let next: HashSet<CellId> = ids.iter().copied().collect();
        for id in self.highlighted.difference(&next) {
            if let Some(handle) = self.handles.get_mut(id) {
                handle.set_highlighted(false);
            }
        }
        for id in next.difference(&self.highlighted) {
            if let Some(handle) = self.handles.get_mut(id) {
                handle.set_highlighted(true);
            }
        }
        self.highlighted = next;
    }

    /// Remove every highlight.
    pub fn clear_highlight(&mut self) {
        self.apply(&[]);
    }
}

#[cfg(target_arch = "wasm32")]
impl HighlightTarget for web_sys::Element {
    fn set_highlighted(&mut self, highlighted: bool) {
        if let Err(e) = self
            .class_list()
            .toggle_with_force("highlighted", highlighted)
        {
            tracing::warn!(?e, "failed to toggle highlight class");
        }
    }
}
