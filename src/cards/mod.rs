//! Card system: templates, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardTemplateId`: Which card (one enum variant per card in the game)
//! - `CardDefinition`: Static card data (cost, category, effects, passive)
//! - `CardInstance`: One copy in the deck, with its own `EntityId`
//! - `CardRegistry`: Definition lookup, built once from an exhaustive table
//!
//! ## Hand Passives
//!
//! Some cards grant a `HandPassive` just by being held: a flat damage
//! boost while in hand, or heal/block when the player turn ends.

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardCategory, CardDefinition, CardTemplateId, CardTheme, HandPassive};
pub use instance::CardInstance;
pub use registry::{card_definition, CardRegistry};
