//! Symbolic names and typed cross-references between level objects.
//!
//! Objects never point at each other directly. An object carries one or more
//! [`Alias`]es and other objects refer to it with an [`Rtid`], which pairs the
//! alias with the [`Scope`] it should be looked up in.

use serde::{Serialize, Serializer};

/// Unique symbolic name attached to an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    /// Create an alias from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the alias text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Alias {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Alias {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Where the target of a reference lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Defined in this document (`.`).
    Local,
    /// Defined by the current level file at load time.
    CurrentLevel,
    /// Shared engine module catalogue.
    LevelModules,
    /// Zombie type catalogue.
    ZombieTypes,
}

impl Scope {
    /// Text used between `@` and `)` in the rendered reference.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Local => ".",
            Scope::CurrentLevel => "CurrentLevel",
            Scope::LevelModules => "LevelModules",
            Scope::ZombieTypes => "ZombieTypes",
        }
    }

    /// Whether the target must be an alias inside the document being built.
    pub fn resolves_in_document(&self) -> bool {
        matches!(self, Scope::Local | Scope::CurrentLevel)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed symbolic pointer, rendered as `RTID(<alias>@<scope>)`.
///
/// The target does not have to exist when the reference is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rtid {
    pub alias: Alias,
    pub scope: Scope,
}

impl Rtid {
    /// Create a reference with an explicit scope.
    pub fn new(alias: impl Into<Alias>, scope: Scope) -> Self {
        Self {
            alias: alias.into(),
            scope,
        }
    }

    /// Reference to an object in this document.
    pub fn local(alias: impl Into<Alias>) -> Self {
        Self::new(alias, Scope::Local)
    }

    /// Reference to an object of the level currently being played.
    pub fn current_level(alias: impl Into<Alias>) -> Self {
        Self::new(alias, Scope::CurrentLevel)
    }

    /// Reference into the shared module catalogue.
    pub fn level_module(alias: impl Into<Alias>) -> Self {
        Self::new(alias, Scope::LevelModules)
    }

    /// Reference into the zombie type catalogue.
    pub fn zombie_type(alias: impl Into<Alias>) -> Self {
        Self::new(alias, Scope::ZombieTypes)
    }

    /// Whether this reference has to be satisfied by the document itself.
    pub fn is_document_scoped(&self) -> bool {
        self.scope.resolves_in_document()
    }
}

impl std::fmt::Display for Rtid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RTID({}@{})", self.alias, self.scope)
    }
}

impl Serialize for Rtid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtid_rendering() {
        assert_eq!(Rtid::local("NewWaves").to_string(), "RTID(NewWaves@.)");
        assert_eq!(
            Rtid::level_module("ZombiesDeadWinCon").to_string(),
            "RTID(ZombiesDeadWinCon@LevelModules)"
        );
        assert_eq!(
            Rtid::zombie_type("tutorial").to_string(),
            "RTID(tutorial@ZombieTypes)"
        );
        assert_eq!(
            Rtid::current_level("SunBombs").to_string(),
            "RTID(SunBombs@CurrentLevel)"
        );
    }

    #[test]
    fn test_document_scoped() {
        assert!(Rtid::local("SeedBank").is_document_scoped());
        assert!(Rtid::current_level("LevelTimer").is_document_scoped());
        assert!(!Rtid::level_module("SaveMowers").is_document_scoped());
        assert!(!Rtid::zombie_type("tutorial").is_document_scoped());
    }

    #[test]
    fn test_rtid_serializes_as_string() {
        let json = serde_json::to_string(&Rtid::local("ConveyorBelt")).unwrap();
        assert_eq!(json, "\"RTID(ConveyorBelt@.)\"");
    }

    #[test]
    fn test_alias_equality() {
        assert_eq!(Alias::from("w0zombies"), Alias::new("w0zombies".to_string()));
        assert_ne!(Alias::from("SeedBank"), Alias::from("seedbank"));
    }
}
