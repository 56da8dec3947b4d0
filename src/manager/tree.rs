//! The store as the UI sees it: a depth-1 tree of views, each with its
//! editable parameters beneath it, supporting drag-and-drop reordering and
//! drag-in of new views.

use super::ViewManager;
use crate::controller::{Property, PropertyValue};
use crate::error::VistaError;
use crate::events::ViewEvent;
use crate::store::ViewHandle;

/// Drag-and-drop category token. Payloads with any other class are not
/// accepted as drops on the view list.
pub const VIEW_CONTROLLER_DRAG_CLASS: &str = "view-controller";

/// One row of the view list, with its parameters as children.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    /// Identity of the view.
    pub handle: ViewHandle,
    /// User-visible name.
    pub name: String,
    /// Type identifier.
    pub class_name: &'static str,
    /// Short type name.
    pub type_name: &'static str,
    /// Whether this row is the current view.
    pub is_current: bool,
    /// Editable parameters.
    pub properties: Vec<Property>,
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragContent {
    /// Existing rows, in the order they were picked up.
    Views(Vec<ViewHandle>),
    /// A new view of the named type, dragged in from an "add" palette.
    NewView(String),
}

/// Drag-and-drop payload tagged with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    /// Category token; must equal [`VIEW_CONTROLLER_DRAG_CLASS`] to drop.
    pub class: String,
    /// Dragged content.
    pub content: DragContent,
}

impl DragPayload {
    /// Payload for dragging a new view of `type_name` into the list.
    pub fn new_view(type_name: &str) -> Self {
        Self {
            class: VIEW_CONTROLLER_DRAG_CLASS.to_owned(),
            content: DragContent::NewView(type_name.to_owned()),
        }
    }
}

impl ViewManager {
    /// Snapshot of the view list for display.
    #[must_use]
    pub fn view_tree(&self) -> Vec<ViewNode> {
        self.store
            .iter()
            .map(|(handle, view)| ViewNode {
                handle,
                name: view.name().to_owned(),
                class_name: view.class_name(),
                type_name: view.type_name(),
                is_current: self.current == Some(handle),
                properties: view.properties(),
            })
            .collect()
    }

    /// Pick up rows for dragging. Stale handles are left out.
    #[must_use]
    pub fn drag_payload(&self, handles: &[ViewHandle]) -> DragPayload {
        DragPayload {
            class: VIEW_CONTROLLER_DRAG_CLASS.to_owned(),
            content: DragContent::Views(
                handles
                    .iter()
                    .copied()
                    .filter(|h| self.store.contains(*h))
                    .collect(),
            ),
        }
    }

    /// Whether the view list accepts this payload.
    #[must_use]
    pub fn can_drop(&self, payload: &DragPayload) -> bool {
        payload.class == VIEW_CONTROLLER_DRAG_CLASS
    }

    /// Drop a payload before `row` (`None` drops at the end).
    ///
    /// Dragged rows are moved as a block, keeping their relative order;
    /// identity and current-ness are untouched. A new-view payload stores a
    /// fresh controller there without making it current. Returns whether
    /// the list changed.
    pub fn drop_payload(
        &mut self,
        payload: &DragPayload,
        row: Option<usize>,
    ) -> bool {
        if self.state == super::ManagerState::TornDown {
            return false;
        }
        if !self.can_drop(payload) {
            log::warn!("rejecting drop of '{}' onto view list", payload.class);
            return false;
        }
        let changed = match &payload.content {
            DragContent::Views(handles) => self.move_block(handles, row),
            DragContent::NewView(type_name) => {
                self.insert_new(type_name, row).is_some()
            }
        };
        if changed {
            self.events.emit(ViewEvent::ConfigChanged);
        }
        changed
    }

    /// Create a view of the named type at `row` without making it current.
    pub fn add_new_view(
        &mut self,
        type_name: &str,
        row: Option<usize>,
    ) -> Option<ViewHandle> {
        if self.state == super::ManagerState::TornDown {
            return None;
        }
        let handle = self.insert_new(type_name, row)?;
        self.events.emit(ViewEvent::ConfigChanged);
        Some(handle)
    }

    /// Move one view to `row`.
    pub fn move_view(&mut self, handle: ViewHandle, row: usize) -> bool {
        let moved = self.move_block(&[handle], Some(row));
        if moved {
            self.events.emit(ViewEvent::ConfigChanged);
        }
        moved
    }

    /// Delete the view shown at `row`.
    pub fn remove_view_at(&mut self, row: usize) -> bool {
        match self.store.at(row) {
            Some(handle) => self.destroy_view(handle),
            None => false,
        }
    }

    /// Rename a view.
    pub fn set_view_name(&mut self, handle: ViewHandle, name: &str) -> bool {
        let Some(view) = self.store.get_mut(handle) else {
            return false;
        };
        if view.name() != name {
            view.set_name(name.to_owned());
            self.events.emit(ViewEvent::ConfigChanged);
        }
        true
    }

    /// Edit one parameter of a view.
    ///
    /// # Errors
    ///
    /// [`VistaError::InvalidHandle`] for stale handles, otherwise whatever
    /// the controller reports for unknown names or mismatched values.
    pub fn set_view_property(
        &mut self,
        handle: ViewHandle,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), VistaError> {
        let view = self
            .store
            .get_mut(handle)
            .ok_or(VistaError::InvalidHandle)?;
        view.set_property(name, value)?;
        self.events.emit(ViewEvent::ConfigChanged);
        Ok(())
    }

    fn insert_new(
        &mut self,
        type_name: &str,
        row: Option<usize>,
    ) -> Option<ViewHandle> {
        let Some(view) = self.create(type_name) else {
            log::warn!("cannot add view of unknown type '{type_name}'");
            return None;
        };
        Some(self.add(view, row))
    }

    fn move_block(&mut self, handles: &[ViewHandle], row: Option<usize>) -> bool {
        let mut target = row.unwrap_or(self.store.count());
        let mut moved = false;
        for &handle in handles {
            let Some(from) = self.store.index_of(handle) else {
                continue;
            };
            if from < target {
                target -= 1;
            }
            let _ = self.store.move_to(handle, target);
            let to = self.store.index_of(handle).unwrap_or(from);
            moved |= to != from;
            target = to + 1;
        }
        moved
    }
}
