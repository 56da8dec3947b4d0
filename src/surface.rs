//! Collaborators the manager drives: the render surface that renders
//! through the current controller, and the source of the current target
//! frame.

use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::ViewController;
use crate::store::ViewHandle;

/// Viewport that renders through exactly one controller at a time.
pub trait RenderSurface {
    /// Make `view` the active camera driver before returning.
    ///
    /// `deactivate_previous` is `false` when the previously bound controller
    /// no longer exists, so there is nothing to tear down.
    fn bind_controller(
        &mut self,
        handle: ViewHandle,
        view: &mut dyn ViewController,
        deactivate_previous: bool,
    );
}

/// Supplies the reference frame pushed into every newly current view.
pub trait TargetFrameSource {
    /// Name of the current fixed/target frame.
    fn target_frame(&self) -> String;
}

impl<F: Fn() -> String> TargetFrameSource for F {
    fn target_frame(&self) -> String {
        self()
    }
}

/// A target frame that never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFrame(pub String);

impl TargetFrameSource for FixedFrame {
    fn target_frame(&self) -> String {
        self.0.clone()
    }
}

/// One call to [`RenderSurface::bind_controller`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// View that was bound.
    pub handle: ViewHandle,
    /// Its type identifier.
    pub class_name: &'static str,
    /// Its name at bind time.
    pub name: String,
    /// Whether the surface was asked to tear down the old binding.
    pub deactivate_previous: bool,
}

/// Shared, clonable record of the bindings a [`HeadlessSurface`] received.
#[derive(Debug, Clone, Default)]
pub struct BindLog(Rc<RefCell<Vec<Binding>>>);

impl BindLog {
    /// All bindings so far, oldest first.
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        self.0.borrow().clone()
    }

    /// Most recent binding.
    #[must_use]
    pub fn last(&self) -> Option<Binding> {
        self.0.borrow().last().cloned()
    }

    /// Number of bindings so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing was bound yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Render surface with no GPU behind it; records what it was told to bind.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    log: BindLog,
    bound: Option<ViewHandle>,
}

impl HeadlessSurface {
    /// Surface plus a handle on its binding log.
    #[must_use]
    pub fn new() -> (Self, BindLog) {
        let surface = Self::default();
        let log = surface.log.clone();
        (surface, log)
    }

    /// Handle of the view currently driving this surface.
    #[must_use]
    pub fn bound(&self) -> Option<ViewHandle> {
        self.bound
    }
}

impl RenderSurface for HeadlessSurface {
    fn bind_controller(
        &mut self,
        handle: ViewHandle,
        view: &mut dyn ViewController,
        deactivate_previous: bool,
    ) {
        if deactivate_previous {
            if let Some(previous) = self.bound {
                log::debug!("surface: releasing {previous:?}");
            }
        }
        log::debug!("surface: binding '{}' ({handle:?})", view.name());
        self.bound = Some(handle);
        self.log.0.borrow_mut().push(Binding {
            handle,
            class_name: view.class_name(),
            name: view.name().to_owned(),
            deactivate_previous,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fps::FpsViewController;
    use crate::controller::ControllerContext;
    use crate::store::ViewStore;

    #[test]
    fn headless_surface_records_bindings() {
        let mut store = ViewStore::new();
        let handle = store.add(
            Box::new(FpsViewController::new(&ControllerContext::default(), "FPS")),
            None,
        );
        let (mut surface, log) = HeadlessSurface::new();
        surface.bind_controller(handle, store.get_mut(handle).unwrap(), true);

        assert_eq!(surface.bound(), Some(handle));
        let binding = log.last().unwrap();
        assert_eq!(binding.class_name, FpsViewController::CLASS_NAME);
        assert_eq!(binding.name, "FPS");
        assert!(binding.deactivate_previous);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn closures_and_fixed_frames_supply_targets() {
        let fixed = FixedFrame("map".into());
        assert_eq!(fixed.target_frame(), "map");
        let dynamic = || String::from("base_link");
        assert_eq!(dynamic.target_frame(), "base_link");
    }
}
