//! Dependency specification types.
//!
//! A manifest keeps its dependencies in two sections. A package lives in at
//! most one of them at a time.

use std::fmt;

/// A single manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub constraint: String,
    pub kind: DependencyKind,
}

/// Manifest section a dependency is recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyKind {
    /// `dependencies`
    Runtime,
    /// `devDependencies`
    Dev,
}

impl Dependency {
    /// Create a runtime dependency
    pub fn runtime(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: constraint.into(),
            kind: DependencyKind::Runtime,
        }
    }

    /// Create a development dependency
    pub fn dev(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: constraint.into(),
            kind: DependencyKind::Dev,
        }
    }
}

impl DependencyKind {
    /// Top-level key of this section in package.json
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Dev => "devDependencies",
        }
    }

    /// The section a package must leave when it is placed in this one
    pub fn opposite(&self) -> DependencyKind {
        match self {
            DependencyKind::Runtime => DependencyKind::Dev,
            DependencyKind::Dev => DependencyKind::Runtime,
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Runtime => write!(f, "dependency"),
            DependencyKind::Dev => write!(f, "dev dependency"),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.constraint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_creation() {
        let dep = Dependency::runtime("@angular/material", "^16.2.7");

        assert_eq!(dep.name, "@angular/material");
        assert_eq!(dep.constraint, "^16.2.7");
        assert_eq!(dep.kind, DependencyKind::Runtime);
        assert_eq!(dep.to_string(), "@angular/material@^16.2.7");
    }

    #[test]
    fn test_dev_dependency() {
        let dep = Dependency::dev("tailwindcss", "^3.3.3");

        assert_eq!(dep.kind, DependencyKind::Dev);
        assert_eq!(dep.kind.manifest_key(), "devDependencies");
    }

    #[test]
    fn test_opposite_sections() {
        assert_eq!(DependencyKind::Runtime.opposite(), DependencyKind::Dev);
        assert_eq!(DependencyKind::Dev.opposite(), DependencyKind::Runtime);
        assert_eq!(DependencyKind::Runtime.manifest_key(), "dependencies");
    }
}
