//! Deterministic game simulation: entities, collision detection, and the
//! screen state machine. Nothing in here touches the terminal; the
//! presentation layer drives one `tick` per frame and renders a read-only
//! view of the session.

pub mod collision;
pub mod entity;
pub mod kinematics;
pub mod state;
pub mod tick;

pub use state::{GameEvent, GameSession, Screen, World};
pub use tick::{tick, Rotation, TickInput};
