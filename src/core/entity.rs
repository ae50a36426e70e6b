//! Entity identification system.
//!
//! Every runtime object the engine hands out (card instances, enemies,
//! skills) gets a unique `EntityId` from the session's `EntityAllocator`.
//! Template identifiers (what a card *is*) live in `cards::CardTemplateId`;
//! an `EntityId` names one specific copy.
//!
//! The player is not an entity: there is exactly one per session, so
//! combat code addresses it through `Combatant::Player`.
//!
//! ```
//! use deck_descent::core::{Combatant, EntityAllocator};
//!
//! let mut ids = EntityAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//! assert_ne!(first, second);
//!
//! let target = Combatant::Enemy(second);
//! assert_eq!(target.enemy_id(), Some(second));
//! assert!(!target.is_player());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any runtime entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic allocator for entity IDs.
///
/// IDs are never reused within a session, so a stale ID held by the UI
/// can never alias a newer card or enemy.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

/// One side of a fight: the player or a specific enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combatant {
    Player,
    Enemy(EntityId),
}

impl Combatant {
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Combatant::Player)
    }

    /// The enemy ID, if this names an enemy.
    #[must_use]
    pub const fn enemy_id(self) -> Option<EntityId> {
        match self {
            Combatant::Player => None,
            Combatant::Enemy(id) => Some(id),
        }
    }
}

impl std::fmt::Display for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combatant::Player => write!(f, "Player"),
            Combatant::Enemy(id) => write!(f, "Enemy({})", id.0),
        }
    }
}
