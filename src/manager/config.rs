//! Saved-view snapshots.
//!
//! A [`ViewsConfig`] is a plain serde value: the caller decides where it
//! lives (a TOML section, a JSON file, a session blob).

use serde::{Deserialize, Serialize};

use super::ViewManager;
use crate::error::VistaError;
use crate::events::ViewEvent;
use crate::store::ViewHandle;

/// One stored view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    /// Type identifier or any alias the factory accepts.
    pub class: String,
    /// User-visible name.
    pub name: String,
    /// Controller-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Every view of a manager, in row order, plus which one is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// Row of the current view.
    #[serde(default)]
    pub current: usize,
    /// Views in row order.
    pub views: Vec<SavedView>,
}

impl ViewManager {
    /// Snapshot every view.
    ///
    /// # Errors
    ///
    /// Propagates controller parameter serialization failures.
    pub fn save_views(&self) -> Result<ViewsConfig, VistaError> {
        let views = self
            .store
            .iter()
            .map(|(_, view)| -> Result<SavedView, VistaError> {
                Ok(SavedView {
                    class: view.class_name().to_owned(),
                    name: view.name().to_owned(),
                    params: view.save()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let current = self
            .current
            .and_then(|h| self.store.index_of(h))
            .unwrap_or(0);
        Ok(ViewsConfig { current, views })
    }

    /// Replace every view with the ones described by `config`.
    ///
    /// All views are built before anything is touched, so a failure leaves
    /// the manager as it was. Entries of unknown type are skipped. The
    /// entry at `config.current` (or the first surviving entry if that one
    /// was skipped) becomes current.
    ///
    /// # Errors
    ///
    /// [`VistaError::TornDown`] after shutdown, [`VistaError::EmptyConfig`]
    /// if no entry could be built (always the case before
    /// [`ViewManager::initialize`]), or a parameter error from a controller.
    pub fn load_views(&mut self, config: &ViewsConfig) -> Result<(), VistaError> {
        if self.state == super::ManagerState::TornDown {
            return Err(VistaError::TornDown);
        }
        let mut built = Vec::with_capacity(config.views.len());
        let mut chosen = 0;
        for (row, saved) in config.views.iter().enumerate() {
            let Some(mut view) = self.create(&saved.class) else {
                log::warn!(
                    "skipping saved view '{}' of unknown type '{}'",
                    saved.name,
                    saved.class
                );
                continue;
            };
            view.set_name(saved.name.clone());
            if !saved.params.is_null() {
                view.load(&saved.params)?;
            }
            if row == config.current {
                chosen = built.len();
            }
            built.push(view);
        }
        if built.is_empty() {
            return Err(VistaError::EmptyConfig);
        }

        let old: Vec<ViewHandle> = self.store.handles().to_vec();
        self.events.begin_batch();
        let handles: Vec<ViewHandle> =
            built.into_iter().map(|view| self.add(view, None)).collect();
        let _ = self.set_current(handles[chosen], true);
        for handle in old {
            drop(self.detach(handle));
        }
        self.events.emit(ViewEvent::ConfigChanged);
        self.events.end_batch();
        log::info!("loaded {} saved view(s)", handles.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::controller::{PropertyValue, SceneAnchor};
    use crate::options::Options;
    use crate::surface::{FixedFrame, HeadlessSurface};

    fn manager() -> ViewManager {
        let (surface, _) = HeadlessSurface::new();
        let mut manager = ViewManager::new(
            Box::new(surface),
            Box::new(FixedFrame("map".into())),
            Options::default(),
        )
        .unwrap();
        manager.initialize(SceneAnchor::default()).unwrap();
        manager
    }

    fn saved(class: &str, name: &str) -> SavedView {
        SavedView {
            class: class.into(),
            name: name.into(),
            params: serde_json::Value::Null,
        }
    }

    #[test]
    fn save_then_load_restores_views() {
        let mut source = manager();
        let orbit = source.current().unwrap();
        source
            .set_view_property(orbit, "Distance", &PropertyValue::Float(4.0))
            .unwrap();
        let _ = source.add_new_view("FPS", None).unwrap();
        let config = source.save_views().unwrap();
        assert_eq!(config.current, 0);
        assert_eq!(config.views.len(), 2);

        let mut target = manager();
        target.load_views(&config).unwrap();

        assert_eq!(target.num_views(), 2);
        assert_eq!(target.index_of(target.current().unwrap()), Some(0));
        assert_eq!(target.save_views().unwrap(), config);
        assert_eq!(target.current_view().unwrap().target_frame(), "map");
    }

    #[test]
    fn unknown_entries_are_skipped() {
        let mut manager = manager();
        let config = ViewsConfig {
            current: 2,
            views: vec![
                saved("rviz::FPSViewController", "walk"),
                saved("rviz::Nope", "ghost"),
                saved("SimpleOrbit", "legacy"),
            ],
        };
        manager.load_views(&config).unwrap();

        assert_eq!(manager.num_views(), 2);
        let current = manager.current_view().unwrap();
        assert_eq!(current.name(), "legacy");
        assert_eq!(current.class_name(), "rviz::XYOrbitViewController");
    }

    #[test]
    fn empty_or_unbuildable_config_is_rejected() {
        let mut manager = manager();
        let before = manager.current();
        let config = ViewsConfig {
            current: 0,
            views: vec![saved("rviz::Nope", "ghost")],
        };
        assert!(matches!(
            manager.load_views(&config),
            Err(VistaError::EmptyConfig)
        ));
        assert_eq!(manager.current(), before);
        assert_eq!(manager.num_views(), 1);
    }

    #[test]
    fn bad_params_leave_manager_untouched() {
        let mut manager = manager();
        let before = manager.current();
        let mut entry = saved("Orbit", "broken");
        entry.params = serde_json::json!({ "distance": "far" });
        let config = ViewsConfig {
            current: 0,
            views: vec![entry],
        };
        assert!(matches!(
            manager.load_views(&config),
            Err(VistaError::Params(_))
        ));
        assert_eq!(manager.current(), before);
    }

    #[test]
    fn load_is_one_atomic_notification_run() {
        let mut manager = manager();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _ = manager.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        let config = ViewsConfig {
            current: 0,
            views: vec![saved("FPS", "walk")],
        };
        manager.load_views(&config).unwrap();

        let handle = manager.current().unwrap();
        assert_eq!(
            *seen.borrow(),
            [
                ViewEvent::CurrentChanged { handle },
                ViewEvent::ConfigChanged,
                ViewEvent::ConfigChanged,
            ]
        );
        assert_eq!(manager.num_views(), 1);
    }

    #[test]
    fn config_survives_json() {
        let manager = manager();
        let config = manager.save_views().unwrap();
        let text = serde_json::to_string(&config).unwrap();
        let parsed: ViewsConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn load_after_shutdown_fails() {
        let mut manager = manager();
        let config = manager.save_views().unwrap();
        manager.shutdown();
        assert!(matches!(
            manager.load_views(&config),
            Err(VistaError::TornDown)
        ));
    }
}
