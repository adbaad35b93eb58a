//! Card interaction events.

use crate::entities::EntryId;

/// Visitor tapped a card.
#[derive(Clone, Debug)]
pub struct EnlargeEntryEvent(pub EntryId);
