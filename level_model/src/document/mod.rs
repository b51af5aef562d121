//! The level document - the root container of a level file.
//!
//! A document is an ordered list of [`Object`]s:
//! - The first object is always the `LevelDefinition`, which has no alias
//! - Every other object may carry aliases, unique across the document
//! - Objects are only ever appended; the document never shrinks

mod object;
mod value;

pub use object::*;
pub use value::*;

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Result, ValidationError};
use crate::reference::{Alias, Rtid};

/// Object class of the level definition.
pub const LEVEL_DEFINITION_CLASS: &str = "LevelDefinition";

/// Comment written at the top of generated files unless configured otherwise.
pub const DEFAULT_COMMENT: &str = "Level generated by Lawnsmith";

/// File format version understood by the engine.
pub const FORMAT_VERSION: u32 = 1;

/// A complete level file.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(rename = "#comment")]
    comment: String,

    objects: Vec<Object>,

    version: u32,

    /// Alias -> position in `objects`.
    #[serde(skip)]
    alias_index: HashMap<Alias, usize>,
}

impl Document {
    /// Create a document holding only the level definition.
    pub fn new(level_data: Fields) -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
            objects: vec![Object::new(LEVEL_DEFINITION_CLASS).with_data(level_data)],
            version: FORMAT_VERSION,
            alias_index: HashMap::new(),
        }
    }

    /// Override the header comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Override the format version.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Append an object.
    ///
    /// Fails without touching the document if any of its aliases is taken.
    pub fn push(&mut self, object: Object) -> Result<()> {
        self.check_aliases(std::slice::from_ref(&object))?;
        self.insert_unchecked(object);
        Ok(())
    }

    /// Append several objects as one step: either all are added or none.
    pub fn extend(&mut self, objects: Vec<Object>) -> Result<()> {
        self.check_aliases(&objects)?;
        for object in objects {
            self.insert_unchecked(object);
        }
        Ok(())
    }

    fn check_aliases(&self, incoming: &[Object]) -> Result<()> {
        let mut seen: Vec<&Alias> = Vec::new();
        for alias in incoming.iter().flat_map(|o| o.aliases.iter()) {
            if self.alias_index.contains_key(alias) || seen.contains(&alias) {
                return Err(ValidationError::DuplicateAlias(alias.clone()));
            }
            seen.push(alias);
        }
        Ok(())
    }

    fn insert_unchecked(&mut self, object: Object) {
        let index = self.objects.len();
        for alias in &object.aliases {
            self.alias_index.insert(alias.clone(), index);
        }
        self.objects.push(object);
    }

    /// The level definition.
    pub fn level(&self) -> &Object {
        &self.objects[0]
    }

    /// Mutable access to the level definition's fields.
    pub fn level_data_mut(&mut self) -> &mut Fields {
        &mut self.objects[0].objdata
    }

    /// Look an object up by alias.
    pub fn get(&self, alias: &str) -> Option<&Object> {
        self.alias_index
            .get(&Alias::from(alias))
            .and_then(|index| self.objects.get(*index))
    }

    /// Mutable access to an object's data by alias.
    ///
    /// Aliases cannot be changed through this handle.
    pub fn data_mut(&mut self, alias: &str) -> Option<&mut Fields> {
        let index = *self.alias_index.get(&Alias::from(alias))?;
        self.objects.get_mut(index).map(|o| &mut o.objdata)
    }

    /// Check if an alias is defined.
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.alias_index.contains_key(&Alias::from(alias))
    }

    /// First object of the given class.
    pub fn find_by_class(&self, objclass: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.objclass == objclass)
    }

    /// All objects of the given class, in document order.
    pub fn objects_of_class<'a>(&'a self, objclass: &'a str) -> impl Iterator<Item = &'a Object> {
        self.objects.iter().filter(move |o| o.objclass == objclass)
    }

    /// All objects in document order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always false; a document holds at least the level definition.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Document-scoped references whose alias is not defined here.
    pub fn unresolved_references(&self) -> Vec<Rtid> {
        self.objects
            .iter()
            .flat_map(|o| o.references())
            .filter(|r| r.is_document_scoped() && !self.alias_index.contains_key(&r.alias))
            .cloned()
            .collect()
    }

    /// Render the document as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document::new(
            Fields::new()
                .with("Name", "Test")
                .with("Modules", vec![Rtid::local("NewWaves")]),
        )
    }

    #[test]
    fn test_level_is_first() {
        let doc = sample_document();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.level().objclass, LEVEL_DEFINITION_CLASS);
        assert!(doc.level().aliases.is_empty());
    }

    #[test]
    fn test_push_and_lookup() {
        let mut doc = sample_document();
        doc.push(Object::new("WaveManagerModuleProperties").with_alias("NewWaves"))
            .unwrap();

        assert!(doc.contains_alias("NewWaves"));
        assert_eq!(
            doc.get("NewWaves").map(|o| o.objclass.as_str()),
            Some("WaveManagerModuleProperties")
        );
        assert!(doc.find_by_class("WaveManagerModuleProperties").is_some());
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut doc = sample_document();
        doc.push(Object::new("A").with_alias("Same")).unwrap();

        let err = doc.push(Object::new("B").with_alias("Same")).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateAlias(Alias::from("Same")));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut doc = sample_document();
        doc.push(Object::new("A").with_alias("Taken")).unwrap();

        let result = doc.extend(vec![
            Object::new("B").with_alias("Fresh"),
            Object::new("C").with_alias("Taken"),
        ]);

        assert!(result.is_err());
        assert!(!doc.contains_alias("Fresh"));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_extend_rejects_duplicates_within_batch() {
        let mut doc = sample_document();
        let result = doc.extend(vec![
            Object::new("A").with_alias("Twice"),
            Object::new("B").with_alias("Twice"),
        ]);
        assert!(result.is_err());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_unresolved_references() {
        let mut doc = sample_document();
        assert_eq!(doc.unresolved_references(), vec![Rtid::local("NewWaves")]);

        doc.push(Object::new("WaveManagerModuleProperties").with_alias("NewWaves"))
            .unwrap();
        assert!(doc.unresolved_references().is_empty());
    }

    #[test]
    fn test_registry_references_are_not_checked() {
        let doc = Document::new(Fields::new().with("Loot", Rtid::level_module("NoLoot")));
        assert!(doc.unresolved_references().is_empty());
    }

    #[test]
    fn test_data_mut() {
        let mut doc = sample_document();
        doc.push(Object::new("WaveManagerProperties").with_alias("WaveManagerProps"))
            .unwrap();

        doc.data_mut("WaveManagerProps").unwrap().insert("WaveCount", 2u32);
        assert_eq!(
            doc.get("WaveManagerProps")
                .and_then(|o| o.objdata.get("WaveCount"))
                .and_then(Value::as_int),
            Some(2)
        );
        assert!(doc.data_mut("Missing").is_none());
    }

    #[test]
    fn test_json_layout() {
        let doc = sample_document().with_comment("hello");
        let json: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["#comment"], "hello");
        assert_eq!(json["version"], 1);
        assert_eq!(json["objects"][0]["objclass"], "LevelDefinition");
        assert_eq!(json["objects"][0]["objdata"]["Modules"][0], "RTID(NewWaves@.)");
        assert!(json["objects"][0].get("aliases").is_none());
    }
}
