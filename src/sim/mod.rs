//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - One seeded RNG, drawn from in a fixed order
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod corridor;
pub mod entities;
pub mod geom;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod view;

pub use autopilot::autopilot_input;
pub use collision::{ShipContacts, ShotHit, Wall, resolve_player_shots, resolve_ship};
pub use corridor::{Corridor, CorridorColumn, Drift};
pub use entities::{EntityId, EntityKind, Populations};
pub use geom::Rect;
pub use level::{Difficulty, level_for_score, level_text};
pub use spawn::{SpawnKind, SpawnScheduler};
pub use state::{GameState, Player, RunPhase};
pub use tick::{TickInput, tick};
pub use view::{Banner, EntityView, FrameView, PlayerView};
