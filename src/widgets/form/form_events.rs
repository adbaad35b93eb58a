//! Entry form events.

use std::path::PathBuf;

use crate::entities::EntryDraft;

/// Visitor pressed a submit button.
///
/// `photo` is the picked image file, still encoded; `None` is the
/// "register without photo" path.
#[derive(Clone, Debug)]
pub struct SubmitEntryEvent {
    pub draft: EntryDraft,
    pub photo: Option<PathBuf>,
}

impl SubmitEntryEvent {
    pub fn without_photo(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            draft: EntryDraft::new(name, message),
            photo: None,
        }
    }

    pub fn with_photo(draft: EntryDraft, photo: PathBuf) -> Self {
        Self {
            draft,
            photo: Some(photo),
        }
    }
}
