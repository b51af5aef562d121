//! # Level Assembler
//!
//! Turns a level plan into a level document: decides which modules a level
//! needs, builds their configuration objects and wires every cross-reference.
//!
//! ## Core Components
//!
//! - **assembler**: module composition, level fields and the editing session
//! - **modules**: one sub-builder per optional subsystem
//! - **grid**: column selection for vasebreaker layouts
//!
//! ## Design Philosophy
//!
//! - **All-or-nothing**: a failed call leaves the document as it was
//! - **Resolved by construction**: a module reference is only added together
//!   with the object it points at
//! - **Derived, not mirrored**: wave and vase counts are computed from their lists

pub mod assembler;
pub mod grid;
pub mod modules;

pub use assembler::*;
pub use grid::*;
pub use modules::*;
