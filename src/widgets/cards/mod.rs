pub mod cards;
pub mod cards_events;

pub use cards::CardsView;
pub use cards_events::EnlargeEntryEvent;
