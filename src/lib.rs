pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod state;
pub mod viewport;
pub use editor::{EditorSettings, RectangleEditor};
pub use error::{AppError, AppResult};

use geometry::{ContentSize, SurfaceSize};

/// Entrypoint for hosts: logging, user settings, and an editor already
/// mapped onto the given content and surface.
pub fn start_editor(content: ContentSize, surface: SurfaceSize) -> AppResult<RectangleEditor> {
    logging::init();
    let config = config::load_app_config();
    tracing::info!(?config, "starting framecut editor");

    let mut editor = RectangleEditor::with_settings(config.editor_settings());
    editor.on_content_changed(content.width, content.height)?;
    editor.on_surface_resized(surface.width, surface.height)?;

    tracing::info!(mode = ?editor.mode(), constraint = ?editor.constraint(), "editor ready");
    Ok(editor)
}
