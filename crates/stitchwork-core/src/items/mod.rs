//! Items in the room - catalog, layout and speech bubble text

pub mod item;
pub mod obscure;
pub mod registry;

pub use item::{Item, ItemId, ItemKind, ItemState};
pub use obscure::{obscure, DEFAULT_OBSCURE_PROBABILITY, FILLER};
pub use registry::ItemRegistry;
