//! Participant state: archers, teams, and their identifiers.
//!
//! Fields are private. State changes only through the documented operations,
//! which the match engine drives round by round.
mod archer;
mod common;
mod team;

pub use archer::{Archer, ArcherProfile};
pub use common::{ArcherId, Gender, Shot, TeamId, TeamSlot};
pub use team::{BonusShot, Roster, Team, first_max_by};
