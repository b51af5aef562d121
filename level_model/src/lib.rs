//! # Level Model
//!
//! The document model for level files: objects, aliases, `RTID` references and
//! the validation rules every builder shares. This crate knows nothing about
//! which objects a level needs; that decision lives in `level_assembler`.

pub mod catalog;
pub mod document;
pub mod error;
pub mod naming;
pub mod reference;

pub use catalog::*;
pub use document::*;
pub use error::*;
pub use naming::*;
pub use reference::*;
