pub mod bridge;
pub mod entity;
pub mod interaction;

pub use bridge::{bridge_opportunities, find_path, help_matches, shared_context};
pub use entity::{canonical_id, EdgeType, EntityGraph, NodeType};
pub use interaction::{InteractionGraph, RelationshipEdge, RelationshipLabel};
