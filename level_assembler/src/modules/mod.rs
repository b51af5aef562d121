//! Feature sub-builders.
//!
//! Each sub-builder owns one optional subsystem of a level:
//! - **waves**: wave manager cadence and enemy waves
//! - **seed_selection**: seed bank, conveyor belt or vasebreaker preset
//! - **challenges**: star challenges and their parameter objects
//! - **minigames**: Last Stand, boss battle, sun bombs and side minigames
//!
//! Sub-builders validate first and only then append to the document, so a
//! failed call leaves it unchanged.

mod challenges;
mod minigames;
mod seed_selection;
mod waves;

pub use challenges::*;
pub use minigames::*;
pub use seed_selection::*;
pub use waves::*;
