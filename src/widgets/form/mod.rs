pub mod form;
pub mod form_events;

pub use form::EntryForm;
pub use form_events::SubmitEntryEvent;
