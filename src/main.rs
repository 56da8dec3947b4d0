//! Headless demo binary for the vista view manager.

use std::path::Path;

use vista::controller::{PropertyValue, SceneAnchor};
use vista::options::Options;
use vista::surface::{FixedFrame, HeadlessSurface};
use vista::{ViewManager, VistaError};

fn load_options(arg: Option<String>) -> Result<Options, VistaError> {
    match arg {
        Some(path) => {
            log::info!("Loading options from {path}");
            Options::load(Path::new(&path))
        }
        None => Ok(Options::default()),
    }
}

fn log_views(manager: &ViewManager) {
    for node in manager.view_tree() {
        let marker = if node.is_current { "*" } else { " " };
        log::info!("{marker} {} [{}]", node.name, node.class_name);
    }
}

/// Scripted session against a surface with no GPU behind it.
fn run(options: Options) -> Result<(), VistaError> {
    let (surface, binds) = HeadlessSurface::new();
    let mut manager = ViewManager::new(
        Box::new(surface),
        Box::new(FixedFrame("map".into())),
        options,
    )?;
    let _ = manager.subscribe(|event| log::debug!("event: {event:?}"));
    manager.initialize(SceneAnchor::default())?;

    let types: Vec<_> = manager
        .types()
        .iter()
        .map(|t| t.display_name.as_str())
        .collect();
    log::info!("Available view types: {}", types.join(", "));

    let current = manager.current().ok_or(VistaError::NoCurrentView)?;
    manager.set_view_property(current, "Distance", &PropertyValue::Float(6.0))?;
    let _ = manager.set_current_view_controller_type("FPS");
    let _ = manager.copy_current()?;
    let _ = manager.add_new_view("TopDownOrtho", Some(0));
    log_views(&manager);

    if let Some(current) = manager.current() {
        let _ = manager.destroy_view(current);
    }
    manager.update(1.0 / 60.0, 1.0 / 60.0);
    log_views(&manager);

    let saved = manager.save_views()?;
    log::info!("Saved views: {}", serde_json::to_string(&saved)?);
    manager.shutdown();
    log::info!("Surface received {} binding(s)", binds.len());
    Ok(())
}

fn main() {
    env_logger::init();

    let options = match load_options(std::env::args().nth(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
