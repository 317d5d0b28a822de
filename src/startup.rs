use crate::config::NARROW_VIEWPORT_WIDTH;
use crate::state::AppState;
use log::info;
use slint::ComponentHandle;
use std::ffi::OsString;
use std::path::PathBuf;
use std::rc::Rc;

/// Options taken from the command line.
#[derive(Debug, Default, PartialEq)]
pub struct StartupOptions {
    pub manifest: Option<PathBuf>,
    pub force_static: bool,
}

/// Parses `[--static] [MANIFEST]`. Unknown flags are ignored.
pub fn parse_args<I>(args: I) -> StartupOptions
where
    I: IntoIterator<Item = OsString>,
{
    let mut options = StartupOptions::default();
    for arg in args {
        let arg_str = arg.to_string_lossy();
        if arg_str == "--static" {
            options.force_static = true;
        } else if !arg_str.starts_with('-') && options.manifest.is_none() {
            options.manifest = Some(PathBuf::from(arg));
        }
    }
    options
}

/// Narrow windows get static thumbnails only. A zero width means "not known yet".
pub fn animations_enabled(logical_width: f32, force_static: bool) -> bool {
    if force_static {
        return false;
    }
    !(logical_width > 0.0 && logical_width <= NARROW_VIEWPORT_WIDTH)
}

/// Decides whether previews animate and opens the manifest given on the command line.
pub fn configure_startup(app: &crate::AppWindow, app_state: &Rc<AppState>) {
    let options = parse_args(std::env::args_os().skip(1));

    let window = app.window();
    let width = window.size().to_logical(window.scale_factor()).width;
    let enabled = animations_enabled(width, options.force_static);
    if !enabled {
        info!(
            "Static mode (width {}px, --static {}), skipping animated thumbnails",
            width, options.force_static
        );
    }
    app_state.animations_enabled.set(enabled);

    match options.manifest {
        Some(path) => crate::ui::handlers::open_gallery(app.as_weak(), app_state.clone(), path),
        None => crate::ui::set_status(app, "Open a gallery manifest to begin"),
    }
}
