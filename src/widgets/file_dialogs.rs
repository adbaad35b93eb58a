//! Shared file dialog helpers for widget UI.

use crate::entities::photo::PHOTO_EXTS;

/// Create configured file dialog for photo selection, opened in the
/// pictures folder where camera apps usually save.
pub fn create_photo_dialog(title: &str) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new()
        .add_filter("Images", PHOTO_EXTS)
        .set_title(title);
    match dirs_next::picture_dir() {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}
