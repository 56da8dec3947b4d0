//! Owned, ordered collection of live view controllers.
//!
//! Storage is a generational arena: every instance gets a [`ViewHandle`]
//! that stays valid across reordering and never aliases a later instance
//! after removal. A separate order vector gives the positional view that the
//! UI tree displays. Reordering touches only that vector, so identity and
//! current-ness survive drag-and-drop untouched.

use crate::controller::ViewController;

/// Stable identity of a stored view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle {
    slot: u32,
    generation: u32,
}

struct Slot {
    generation: u32,
    view: Option<Box<dyn ViewController>>,
}

/// Arena of view controllers plus their display order.
#[derive(Default)]
pub struct ViewStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<ViewHandle>,
}

impl ViewStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `view` and insert it at `index` (clamped to the
    /// end; `None` appends).
    pub fn add(
        &mut self,
        view: Box<dyn ViewController>,
        index: Option<usize>,
    ) -> ViewHandle {
        let handle = if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.view = Some(view);
            ViewHandle {
                slot,
                generation: entry.generation,
            }
        } else {
            let slot = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                view: Some(view),
            });
            ViewHandle {
                slot,
                generation: 0,
            }
        };
        let index = index.map_or(self.order.len(), |i| i.min(self.order.len()));
        self.order.insert(index, handle);
        handle
    }

    /// Remove a view and hand ownership back to the caller.
    pub fn remove(
        &mut self,
        handle: ViewHandle,
    ) -> Option<Box<dyn ViewController>> {
        let entry = self.slot_mut(handle)?;
        let view = entry.view.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.slot);
        self.order.retain(|h| *h != handle);
        Some(view)
    }

    /// Remove the view at a position.
    pub fn remove_at(
        &mut self,
        index: usize,
    ) -> Option<(ViewHandle, Box<dyn ViewController>)> {
        let handle = self.at(index)?;
        self.remove(handle).map(|view| (handle, view))
    }

    /// Handle at a position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<ViewHandle> {
        self.order.get(index).copied()
    }

    /// Position of a view.
    #[must_use]
    pub fn index_of(&self, handle: ViewHandle) -> Option<usize> {
        self.order.iter().position(|h| *h == handle)
    }

    /// Number of stored views.
    #[must_use]
    pub fn count(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `handle` refers to a live view.
    #[must_use]
    pub fn contains(&self, handle: ViewHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Shared access to a view.
    #[must_use]
    pub fn get(&self, handle: ViewHandle) -> Option<&dyn ViewController> {
        let entry = self.slots.get(handle.slot as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        entry.view.as_deref()
    }

    /// Exclusive access to a view.
    pub fn get_mut(
        &mut self,
        handle: ViewHandle,
    ) -> Option<&mut (dyn ViewController + 'static)> {
        self.slot_mut(handle)?.view.as_deref_mut()
    }

    /// Exclusive access to `target` alongside shared access to a different
    /// view `source`.
    pub fn pair_mut(
        &mut self,
        target: ViewHandle,
        source: ViewHandle,
    ) -> Option<(&mut (dyn ViewController + 'static), &dyn ViewController)>
    {
        if target.slot == source.slot
            || !self.contains(target)
            || !self.contains(source)
        {
            return None;
        }
        let (t, s) = (target.slot as usize, source.slot as usize);
        let (target_slot, source_slot) = if t < s {
            let (head, tail) = self.slots.split_at_mut(s);
            (&mut head[t], &tail[0])
        } else {
            let (head, tail) = self.slots.split_at_mut(t);
            (&mut tail[0], &head[s])
        };
        Some((target_slot.view.as_deref_mut()?, source_slot.view.as_deref()?))
    }

    /// Move a view to a new position; identity is unchanged.
    pub fn move_to(&mut self, handle: ViewHandle, index: usize) -> bool {
        let Some(from) = self.index_of(handle) else {
            return false;
        };
        let _ = self.order.remove(from);
        let index = index.min(self.order.len());
        self.order.insert(index, handle);
        true
    }

    /// Handles in display order.
    #[must_use]
    pub fn handles(&self) -> &[ViewHandle] {
        &self.order
    }

    /// Views in display order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (ViewHandle, &dyn ViewController)> + '_ {
        self.order
            .iter()
            .filter_map(|&h| self.get(h).map(|view| (h, view)))
    }

    /// Remove every view, returning them in display order.
    pub fn drain(&mut self) -> Vec<(ViewHandle, Box<dyn ViewController>)> {
        let handles = std::mem::take(&mut self.order);
        handles
            .into_iter()
            .filter_map(|h| self.remove(h).map(|view| (h, view)))
            .collect()
    }

    fn slot_mut(&mut self, handle: ViewHandle) -> Option<&mut Slot> {
        let entry = self.slots.get_mut(handle.slot as usize)?;
        (entry.generation == handle.generation).then_some(entry)
    }
}

impl std::fmt::Debug for ViewStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(_, view)| view.name().to_owned()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::orbit::OrbitViewController;
    use crate::controller::ControllerContext;

    fn view(name: &str) -> Box<dyn ViewController> {
        Box::new(OrbitViewController::new(&ControllerContext::default(), name))
    }

    fn names(store: &ViewStore) -> Vec<String> {
        store.iter().map(|(_, v)| v.name().to_owned()).collect()
    }

    #[test]
    fn add_appends_or_inserts() {
        let mut store = ViewStore::new();
        let a = store.add(view("a"), None);
        let c = store.add(view("c"), None);
        let b = store.add(view("b"), Some(1));
        let _ = store.add(view("z"), Some(99));
        assert_eq!(names(&store), ["a", "b", "c", "z"]);
        assert_eq!(store.index_of(a), Some(0));
        assert_eq!(store.index_of(b), Some(1));
        assert_eq!(store.index_of(c), Some(2));
        assert_eq!(store.at(3).and_then(|h| store.get(h)).unwrap().name(), "z");
    }

    #[test]
    fn removed_handles_go_stale() {
        let mut store = ViewStore::new();
        let a = store.add(view("a"), None);
        let removed = store.remove(a).unwrap();
        assert_eq!(removed.name(), "a");
        assert!(!store.contains(a));
        assert!(store.remove(a).is_none());

        // Slot reuse must not resurrect the old handle.
        let b = store.add(view("b"), None);
        assert_ne!(a, b);
        assert!(store.get(a).is_none());
        assert_eq!(store.get(b).unwrap().name(), "b");
    }

    #[test]
    fn remove_at_returns_ownership() {
        let mut store = ViewStore::new();
        let _ = store.add(view("a"), None);
        let b = store.add(view("b"), None);
        let (handle, removed) = store.remove_at(1).unwrap();
        assert_eq!(handle, b);
        assert_eq!(removed.name(), "b");
        assert_eq!(store.count(), 1);
        assert!(store.remove_at(5).is_none());
    }

    #[test]
    fn move_keeps_identity() {
        let mut store = ViewStore::new();
        let a = store.add(view("a"), None);
        let _ = store.add(view("b"), None);
        let _ = store.add(view("c"), None);
        assert!(store.move_to(a, 2));
        assert_eq!(names(&store), ["b", "c", "a"]);
        assert_eq!(store.get(a).unwrap().name(), "a");
    }

    #[test]
    fn pair_mut_rejects_same_handle() {
        let mut store = ViewStore::new();
        let a = store.add(view("a"), None);
        let b = store.add(view("b"), None);
        assert!(store.pair_mut(a, a).is_none());
        let (target, source) = store.pair_mut(b, a).unwrap();
        target.set_name(format!("from {}", source.name()));
        assert_eq!(store.get(b).unwrap().name(), "from a");
        let (target, source) = store.pair_mut(a, b).unwrap();
        target.set_name(source.name().to_owned());
        assert_eq!(store.get(a).unwrap().name(), "from a");
    }

    #[test]
    fn drain_empties_in_order() {
        let mut store = ViewStore::new();
        let _ = store.add(view("a"), None);
        let _ = store.add(view("b"), None);
        let drained = store.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].1.name(), "a");
        assert!(store.is_empty());
    }
}
