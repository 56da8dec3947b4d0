//! Maps type identifiers to freshly constructed controllers.
//!
//! Lookup is a two-step affair: an alias table turns short names and legacy
//! class names into a canonical identifier, and the canonical identifier
//! selects a constructor. Unknown names yield `None`; that is an ordinary
//! outcome and callers choose the fallback.

use rustc_hash::FxHashMap;

use crate::controller::fps::FpsViewController;
use crate::controller::orbit::OrbitViewController;
use crate::controller::ortho::FixedOrientationOrthoViewController;
use crate::controller::xy_orbit::XYOrbitViewController;
use crate::controller::{ControllerContext, ViewController};

/// Builds a controller bound to the context, named after its type.
pub type Constructor =
    fn(&ControllerContext, &str) -> Box<dyn ViewController>;

/// Everything the factory needs to know about one controller type.
#[derive(Debug, Clone, Copy)]
pub struct ControllerRegistration {
    /// Canonical identifier.
    pub class_name: &'static str,
    /// Short display name; also accepted as an alias and used as the
    /// default instance name.
    pub type_name: &'static str,
    /// Additional accepted names, e.g. class names from older releases.
    pub aliases: &'static [&'static str],
    /// Constructor.
    pub construct: Constructor,
}

/// The controllers every manager knows about, in menu order.
#[must_use]
pub fn builtin_controllers() -> [ControllerRegistration; 4] {
    [
        ControllerRegistration {
            class_name: XYOrbitViewController::CLASS_NAME,
            type_name: XYOrbitViewController::TYPE_NAME,
            aliases: &["rviz::SimpleOrbitViewController", "SimpleOrbit"],
            construct: |ctx, name| Box::new(XYOrbitViewController::new(ctx, name)),
        },
        ControllerRegistration {
            class_name: OrbitViewController::CLASS_NAME,
            type_name: OrbitViewController::TYPE_NAME,
            aliases: &[],
            construct: |ctx, name| Box::new(OrbitViewController::new(ctx, name)),
        },
        ControllerRegistration {
            class_name: FpsViewController::CLASS_NAME,
            type_name: FpsViewController::TYPE_NAME,
            aliases: &[],
            construct: |ctx, name| Box::new(FpsViewController::new(ctx, name)),
        },
        ControllerRegistration {
            class_name: FixedOrientationOrthoViewController::CLASS_NAME,
            type_name: FixedOrientationOrthoViewController::TYPE_NAME,
            aliases: &["Top-down Orthographic"],
            construct: |ctx, name| {
                Box::new(FixedOrientationOrthoViewController::new(ctx, name))
            },
        },
    ]
}

/// Canonical-identifier constructor table plus alias resolution.
#[derive(Debug, Clone, Default)]
pub struct ControllerFactory {
    entries: FxHashMap<&'static str, ControllerRegistration>,
    aliases: FxHashMap<&'static str, &'static str>,
}

impl ControllerFactory {
    /// Factory with no known types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory pre-loaded with [`builtin_controllers`].
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        for registration in builtin_controllers() {
            factory.register(registration);
        }
        factory
    }

    /// Add (or replace) a controller type. The short type name and every
    /// alias resolve to `registration.class_name`.
    pub fn register(&mut self, registration: ControllerRegistration) {
        let class_name = registration.class_name;
        if self.entries.insert(class_name, registration).is_some() {
            log::debug!("replacing view controller type '{class_name}'");
        }
        let _ = self.aliases.insert(registration.type_name, class_name);
        for &alias in registration.aliases {
            let _ = self.aliases.insert(alias, class_name);
        }
    }

    /// Canonical identifier for a canonical name, short name or alias.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        if let Some(entry) = self.entries.get(name) {
            return Some(entry.class_name);
        }
        self.aliases.get(name).copied()
    }

    /// Registration for any accepted name.
    #[must_use]
    pub fn registration(&self, name: &str) -> Option<&ControllerRegistration> {
        self.entries.get(self.resolve(name)?)
    }

    /// Whether `name` resolves to a known type.
    #[must_use]
    pub fn knows(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Construct a controller of the named type, bound to `context`.
    #[must_use]
    pub fn create(
        &self,
        name: &str,
        context: &ControllerContext,
    ) -> Option<Box<dyn ViewController>> {
        let registration = self.registration(name)?;
        Some((registration.construct)(context, registration.type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> Option<Box<dyn ViewController>> {
        ControllerFactory::with_builtins()
            .create(name, &ControllerContext::default())
    }

    #[test]
    fn canonical_and_short_names_build_the_same_type() {
        for (canonical, short) in [
            ("rviz::OrbitViewController", "Orbit"),
            ("rviz::XYOrbitViewController", "XYOrbit"),
            ("rviz::FPSViewController", "FPS"),
            ("rviz::FixedOrientationOrthoViewController", "TopDownOrtho"),
        ] {
            let a = create(canonical).unwrap();
            let b = create(short).unwrap();
            assert_eq!(a.class_name(), canonical);
            assert_eq!(b.class_name(), canonical);
            assert_eq!(a.name(), short);
        }
    }

    #[test]
    fn legacy_aliases_resolve() {
        for alias in ["rviz::SimpleOrbitViewController", "SimpleOrbit"] {
            let view = create(alias).unwrap();
            assert_eq!(view.class_name(), XYOrbitViewController::CLASS_NAME);
            assert_eq!(view.name(), "XYOrbit");
        }
        let ortho = create("Top-down Orthographic").unwrap();
        assert_eq!(ortho.type_name(), "TopDownOrtho");
    }

    #[test]
    fn unknown_name_yields_none() {
        assert!(create("rviz::ThirdPersonFollower").is_none());
        assert!(create("").is_none());
    }

    #[test]
    fn new_instances_bind_to_the_context_anchor() {
        let mut ctx = ControllerContext::default();
        ctx.anchor.name = "map".into();
        let view = ControllerFactory::with_builtins()
            .create("FPS", &ctx)
            .unwrap();
        assert_eq!(view.base().anchor.name, "map");
    }

    #[test]
    fn custom_registration_adds_aliases() {
        let mut factory = ControllerFactory::new();
        factory.register(ControllerRegistration {
            class_name: "app::Follow",
            type_name: "Follow",
            aliases: &["Chase"],
            construct: |ctx, name| Box::new(OrbitViewController::new(ctx, name)),
        });
        assert_eq!(factory.resolve("Chase"), Some("app::Follow"));
        let view = factory
            .create("Chase", &ControllerContext::default())
            .unwrap();
        assert_eq!(view.name(), "Follow");
        assert!(!factory.knows("Orbit"));
    }
}
