//! The current-view state machine.
//!
//! [`ViewManager`] owns the type registry, the controller factory and the
//! instance store, and guarantees that once seeded there is always exactly
//! one current view bound to the render surface, even when the current view
//! is deleted out from under it.
//!
//! Destruction tracking is explicit: the manager keeps a watch set of the
//! handles it wants to hear about. Every path that removes a view from the
//! store goes through one private `detach` step, which consults the watch set
//! and runs the fallback handler before the removed controller is dropped.

mod config;
mod tree;

pub use config::{SavedView, ViewsConfig};
pub use tree::{DragContent, DragPayload, ViewNode, VIEW_CONTROLLER_DRAG_CLASS};

use rustc_hash::FxHashSet;

use crate::controller::{ControllerContext, SceneAnchor, ViewController};
use crate::error::VistaError;
use crate::events::{EventBus, SubscriptionId, ViewEvent};
use crate::factory::{
    builtin_controllers, ControllerFactory, ControllerRegistration,
};
use crate::options::Options;
use crate::registry::{TypeRegistry, ViewTypeInfo};
use crate::store::{ViewHandle, ViewStore};
use crate::surface::{RenderSurface, TargetFrameSource};

/// Lifecycle of a [`ViewManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// No scene anchor yet, no current view.
    Uninitialized,
    /// The first view was created and made current during startup.
    Seeded,
    /// Steady state: exactly one current view.
    Active,
    /// Every view has been destroyed; the manager is inert.
    TornDown,
}

/// Owns all view controllers of one render surface and decides which one
/// drives it.
pub struct ViewManager {
    state: ManagerState,
    options: Options,
    registry: TypeRegistry,
    factory: ControllerFactory,
    context: Option<ControllerContext>,
    store: ViewStore,
    current: Option<ViewHandle>,
    /// Views whose removal should trigger
    /// [`ViewManager::on_instance_destroyed`].
    destroy_watch: FxHashSet<ViewHandle>,
    surface: Box<dyn RenderSurface>,
    frames: Box<dyn TargetFrameSource>,
    events: EventBus,
}

impl ViewManager {
    /// Create an uninitialized manager.
    ///
    /// # Errors
    ///
    /// [`VistaError::UnknownType`] if `options.views.default_type` does not
    /// name a built-in controller; the fallback path relies on it.
    pub fn new(
        surface: Box<dyn RenderSurface>,
        frames: Box<dyn TargetFrameSource>,
        options: Options,
    ) -> Result<Self, VistaError> {
        let factory = ControllerFactory::with_builtins();
        if !factory.knows(&options.views.default_type) {
            return Err(VistaError::UnknownType(
                options.views.default_type.clone(),
            ));
        }
        Ok(Self {
            state: ManagerState::Uninitialized,
            options,
            registry: TypeRegistry::new(),
            factory,
            context: None,
            store: ViewStore::new(),
            current: None,
            destroy_watch: FxHashSet::default(),
            surface,
            frames,
            events: EventBus::new(),
        })
    }

    /// Bind to the render target, register the built-in types and seed the
    /// initial view.
    ///
    /// # Errors
    ///
    /// [`VistaError::AlreadyInitialized`] on a second call.
    pub fn initialize(&mut self, anchor: SceneAnchor) -> Result<(), VistaError> {
        if self.context.is_some() || self.state != ManagerState::Uninitialized
        {
            return Err(VistaError::AlreadyInitialized);
        }
        log::info!("initializing view manager on scene node '{}'", anchor.name);
        self.context = Some(ControllerContext {
            anchor,
            camera: self.options.camera.clone(),
        });
        for registration in builtin_controllers() {
            self.add_view_controller_type(
                registration.class_name,
                registration.type_name,
            );
        }
        let initial = self.options.views.initial_type.clone();
        if self.set_current_view_controller_type(&initial) {
            Ok(())
        } else {
            Err(VistaError::UnknownType(initial))
        }
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Options the manager was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    // -- Type registry --

    /// Append a type to the registry and announce it. Duplicates are kept.
    pub fn add_view_controller_type(
        &mut self,
        class_name: &str,
        display_name: &str,
    ) {
        let info = self.registry.register(class_name, display_name);
        log::debug!(
            "registered view controller type '{}' ({})",
            info.display_name,
            info.class_name
        );
        self.events.emit(ViewEvent::TypeRegistered {
            class_name: info.class_name.clone(),
            display_name: info.display_name.clone(),
        });
    }

    /// Teach the factory an application-defined controller and list it in
    /// the registry.
    pub fn register_controller(&mut self, registration: ControllerRegistration) {
        self.factory.register(registration);
        self.add_view_controller_type(
            registration.class_name,
            registration.type_name,
        );
    }

    /// Registered types, in registration order.
    #[must_use]
    pub fn types(&self) -> &[ViewTypeInfo] {
        self.registry.types()
    }

    // -- Notifications --

    /// Listen to manager events.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ViewEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Stop listening. Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // -- Factory --

    /// Construct (but do not store) a controller of the named type. `None`
    /// for unknown names, or before [`ViewManager::initialize`].
    #[must_use]
    pub fn create(&self, type_name: &str) -> Option<Box<dyn ViewController>> {
        let context = self.context.as_ref()?;
        self.factory.create(type_name, context)
    }

    // -- Store access --

    /// Handle of the current view.
    #[must_use]
    pub fn current(&self) -> Option<ViewHandle> {
        self.current
    }

    /// The current view.
    #[must_use]
    pub fn current_view(&self) -> Option<&dyn ViewController> {
        self.store.get(self.current?)
    }

    /// The current view, mutably.
    pub fn current_view_mut(
        &mut self,
    ) -> Option<&mut (dyn ViewController + 'static)> {
        self.store.get_mut(self.current?)
    }

    /// Any stored view.
    #[must_use]
    pub fn view(&self, handle: ViewHandle) -> Option<&dyn ViewController> {
        self.store.get(handle)
    }

    /// Handle at a row.
    #[must_use]
    pub fn view_at(&self, index: usize) -> Option<ViewHandle> {
        self.store.at(index)
    }

    /// Row of a view.
    #[must_use]
    pub fn index_of(&self, handle: ViewHandle) -> Option<usize> {
        self.store.index_of(handle)
    }

    /// Number of stored views.
    #[must_use]
    pub fn num_views(&self) -> usize {
        self.store.count()
    }

    /// Views in row order.
    pub fn views(
        &self,
    ) -> impl Iterator<Item = (ViewHandle, &dyn ViewController)> + '_ {
        self.store.iter()
    }

    /// Take ownership of `view` and store it at `index` (`None` appends).
    /// The view does not become current.
    pub fn add(
        &mut self,
        view: Box<dyn ViewController>,
        index: Option<usize>,
    ) -> ViewHandle {
        let name = view.name().to_owned();
        let handle = self.store.add(view, index);
        log::debug!(
            "stored view '{name}' ({handle:?}) at row {:?}",
            self.store.index_of(handle)
        );
        handle
    }

    /// Forward the frame tick to the current view.
    pub fn update(&mut self, wall_dt: f32, sim_dt: f32) {
        if let Some(view) = self.current_view_mut() {
            view.update(wall_dt, sim_dt);
        }
    }

    // -- Switching --

    /// Make a view of the named type current, replacing the old one.
    ///
    /// Cheap no-op (returning `true`) when the current view already has this
    /// type identifier or this name. Unknown types fail and leave everything
    /// untouched, except during bootstrap, where the configured default
    /// type stands in. The new view is stored, initialized from the old
    /// one, bound to the surface, and only then is the old view destroyed.
    pub fn set_current_view_controller_type(&mut self, type_name: &str) -> bool {
        if self.state == ManagerState::TornDown {
            return false;
        }
        if let Some(current) = self.current_view() {
            if current.class_name() == type_name || current.name() == type_name
            {
                return true;
            }
        }

        let mut view = self.create(type_name);
        if view.is_none() && self.current.is_none() {
            log::warn!(
                "unknown view controller type '{type_name}', falling back to \
                 '{}'",
                self.options.views.default_type
            );
            view = self.create(&self.options.views.default_type);
        }
        let Some(view) = view else {
            log::warn!("unknown view controller type '{type_name}'");
            return false;
        };

        self.events.begin_batch();
        let handle = self.add(view, None);
        let previous = self.current;
        if let Some(previous) = previous {
            if let Some((new_view, old_view)) =
                self.store.pair_mut(handle, previous)
            {
                new_view.initialize_from(old_view);
            }
        }
        let _ = self.set_current(handle, true);
        if let Some(previous) = previous {
            drop(self.detach(previous));
        }
        self.events.end_batch();
        true
    }

    /// Make a stored view current.
    ///
    /// With `deactivate_previous` the outgoing view stops being watched for
    /// destruction and the surface may tear down its binding; pass `false`
    /// when the outgoing view is already gone. Returns whether anything
    /// changed.
    pub fn set_current(
        &mut self,
        handle: ViewHandle,
        deactivate_previous: bool,
    ) -> bool {
        if self.state == ManagerState::TornDown || self.current == Some(handle)
        {
            return false;
        }
        if !self.store.contains(handle) {
            log::warn!("cannot make stale view {handle:?} current");
            return false;
        }
        if deactivate_previous {
            if let Some(previous) = self.current {
                let _ = self.destroy_watch.remove(&previous);
            }
        }
        let _ = self.destroy_watch.insert(handle);

        let frame = self.frames.target_frame();
        let Some(view) = self.store.get_mut(handle) else {
            return false;
        };
        self.surface.bind_controller(handle, view, deactivate_previous);
        view.set_target_frame(&frame);
        log::debug!("current view is now '{}' ({handle:?})", view.name());

        self.current = Some(handle);
        self.state = match self.state {
            ManagerState::Uninitialized => ManagerState::Seeded,
            _ => ManagerState::Active,
        };
        self.events.emit(ViewEvent::CurrentChanged { handle });
        self.events.emit(ViewEvent::ConfigChanged);
        true
    }

    /// Duplicate the current view right after itself and make the copy
    /// current.
    ///
    /// # Errors
    ///
    /// [`VistaError::NoCurrentView`] if nothing is current yet, or
    /// [`VistaError::TornDown`] after shutdown.
    pub fn copy_current(&mut self) -> Result<ViewHandle, VistaError> {
        if self.state == ManagerState::TornDown {
            return Err(VistaError::TornDown);
        }
        let current = self.current.ok_or(VistaError::NoCurrentView)?;
        let original =
            self.store.get(current).ok_or(VistaError::NoCurrentView)?;
        let mut copy = original.copy();
        copy.set_name(format!(
            "{}{}",
            self.options.views.copy_prefix,
            original.name()
        ));
        let row = self
            .store
            .index_of(current)
            .map_or(self.store.count(), |i| i + 1);

        self.events.begin_batch();
        let handle = self.add(copy, Some(row));
        let _ = self.set_current(handle, true);
        self.events.end_batch();
        Ok(handle)
    }

    // -- Removal --

    /// Remove a view and hand it to the caller. If it was current, another
    /// view takes over first.
    pub fn take_view(
        &mut self,
        handle: ViewHandle,
    ) -> Option<Box<dyn ViewController>> {
        self.events.begin_batch();
        let view = self.detach(handle);
        if view.is_some() {
            self.events.emit(ViewEvent::ConfigChanged);
        }
        self.events.end_batch();
        view
    }

    /// Delete a view. If it was current, another view takes over before the
    /// controller is dropped.
    pub fn destroy_view(&mut self, handle: ViewHandle) -> bool {
        self.take_view(handle).is_some()
    }

    /// Destroy every view without materializing a replacement. Runs on drop.
    pub fn shutdown(&mut self) {
        if self.state == ManagerState::TornDown {
            return;
        }
        self.destroy_watch.clear();
        self.current = None;
        let views = self.store.drain();
        log::info!(
            "view manager shutting down, destroying {} view(s)",
            views.len()
        );
        drop(views);
        self.state = ManagerState::TornDown;
    }

    /// Pull a view out of the store, notifying the destruction handler if
    /// the view was being watched. The returned controller is still alive.
    fn detach(&mut self, handle: ViewHandle) -> Option<Box<dyn ViewController>> {
        let view = self.store.remove(handle)?;
        log::debug!("removed view '{}' ({handle:?})", view.name());
        if self.destroy_watch.remove(&handle) {
            self.on_instance_destroyed(handle);
        }
        Some(view)
    }

    /// Keep the surface driven after a watched view went away.
    fn on_instance_destroyed(&mut self, handle: ViewHandle) {
        if self.current != Some(handle) {
            return;
        }
        let only_stale =
            self.store.count() == 1 && self.store.at(0) == Some(handle);
        let replacement = if self.store.is_empty() || only_stale {
            let default = self.options.views.default_type.clone();
            let Some(view) = self.create(&default) else {
                log::error!("cannot materialize fallback view '{default}'");
                self.current = None;
                return;
            };
            Some(self.add(view, None))
        } else {
            match self.store.at(0) {
                Some(first) if first == handle => self.store.at(1),
                first => first,
            }
        };
        match replacement {
            Some(replacement) => {
                let _ = self.set_current(replacement, false);
            }
            None => self.current = None,
        }
    }
}

impl Drop for ViewManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
