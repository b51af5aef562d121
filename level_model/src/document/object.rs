//! Objects - the typed nodes of a level document.

use serde::Serialize;

use super::{Fields, Value};
use crate::reference::{Alias, Rtid};

/// One node of the level graph.
///
/// `objclass` names the engine schema that `objdata` must satisfy. Aliases are
/// optional; objects without one can only be found by class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Object {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<Alias>,
    pub objclass: String,
    pub objdata: Fields,
}

impl Object {
    /// Create an object of the given class with no aliases and empty data.
    pub fn new(objclass: impl Into<String>) -> Self {
        Self {
            aliases: Vec::new(),
            objclass: objclass.into(),
            objdata: Fields::new(),
        }
    }

    /// Attach an alias.
    pub fn with_alias(mut self, alias: impl Into<Alias>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set a data field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.objdata.insert(key, value);
        self
    }

    /// Replace the whole data block.
    pub fn with_data(mut self, objdata: Fields) -> Self {
        self.objdata = objdata;
        self
    }

    /// First alias, which is the one other objects normally point at.
    pub fn primary_alias(&self) -> Option<&Alias> {
        self.aliases.first()
    }

    /// Check whether the object answers to `alias`.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.as_str() == alias)
    }

    /// A local reference to this object, if it has an alias.
    pub fn local_reference(&self) -> Option<Rtid> {
        self.primary_alias().cloned().map(Rtid::local)
    }

    /// Every reference held in the object's data.
    pub fn references(&self) -> Vec<&Rtid> {
        let mut out = Vec::new();
        self.objdata.collect_references(&mut out);
        out
    }
}
