//! Declarative dependency merging.
//!
//! A merge sets every requested package to the requested constraint in the
//! requested section. The last write wins: there is no semver comparison and a
//! downgrade is not an error. A package is only ever kept in one section, so
//! placing it in one removes it from the other. Packages that are not part of
//! the request are left alone.

use std::collections::BTreeMap;
use mtw_core::types::{Dependency, DependencyKind};
use tracing::debug;

/// Dependency sections of a package manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// `dependencies`
    pub dependencies: BTreeMap<String, String>,

    /// `devDependencies`
    pub dev_dependencies: BTreeMap<String, String>,
}

/// Packages to record, per section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionRequest {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

/// What a merge did to one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Not present before
    Added,
    /// Present in the same section with another constraint
    Updated { from: String },
    /// Present in the other section, moved over
    Moved { from: DependencyKind, constraint: String },
    /// Already present with the same constraint
    Unchanged,
}

/// Per-package outcome of a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub entries: Vec<(Dependency, MergeAction)>,
    changed: bool,
}

/// Applies addition requests to manifests
pub struct DependencyMerger;

impl Manifest {
    /// Borrow one section
    pub fn section(&self, kind: DependencyKind) -> &BTreeMap<String, String> {
        match kind {
            DependencyKind::Runtime => &self.dependencies,
            DependencyKind::Dev => &self.dev_dependencies,
        }
    }

    /// Mutably borrow one section
    pub fn section_mut(&mut self, kind: DependencyKind) -> &mut BTreeMap<String, String> {
        match kind {
            DependencyKind::Runtime => &mut self.dependencies,
            DependencyKind::Dev => &mut self.dev_dependencies,
        }
    }

    /// Look a package up in either section
    pub fn get(&self, name: &str) -> Option<Dependency> {
        [DependencyKind::Runtime, DependencyKind::Dev]
            .into_iter()
            .find_map(|kind| {
                self.section(kind).get(name).map(|constraint| Dependency {
                    name: name.to_string(),
                    constraint: constraint.clone(),
                    kind,
                })
            })
    }

    /// Total number of entries across both sections
    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AdditionRequest {
    /// Angular Material plus the Tailwind CSS toolchain
    pub fn material_tailwind() -> Self {
        Self {
            dependencies: BTreeMap::from([
                ("@angular/material".to_string(), "^16.2.7".to_string()),
            ]),
            dev_dependencies: BTreeMap::from([
                ("tailwindcss".to_string(), "^3.3.3".to_string()),
                ("autoprefixer".to_string(), "^10.4.16".to_string()),
                ("postcss".to_string(), "^8.4.31".to_string()),
            ]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    /// Requested entries in application order: runtime first, then dev
    pub fn iter(&self) -> impl Iterator<Item = Dependency> + '_ {
        let runtime = self.dependencies.iter().map(|(name, c)| Dependency::runtime(name, c));
        let dev = self.dev_dependencies.iter().map(|(name, c)| Dependency::dev(name, c));
        runtime.chain(dev)
    }
}

impl MergeReport {
    /// Whether the manifest differs from before the merge
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Entries that actually modified the manifest
    pub fn modified(&self) -> impl Iterator<Item = &(Dependency, MergeAction)> {
        self.entries.iter().filter(|(_, action)| *action != MergeAction::Unchanged)
    }
}

impl DependencyMerger {
    /// Apply `additions` to `manifest` in place
    pub fn apply(manifest: &mut Manifest, additions: &AdditionRequest) -> MergeReport {
        let before = manifest.clone();
        let mut entries = Vec::new();

        for dependency in additions.iter() {
            let action = Self::place(manifest, &dependency);
            debug!("{} {}: {:?}", dependency.kind, dependency, action);
            entries.push((dependency, action));
        }

        MergeReport {
            changed: *manifest != before,
            entries,
        }
    }

    fn place(manifest: &mut Manifest, dependency: &Dependency) -> MergeAction {
        let other = dependency.kind.opposite();
        let moved = manifest.section_mut(other).remove(&dependency.name);
        let previous = manifest
            .section_mut(dependency.kind)
            .insert(dependency.name.clone(), dependency.constraint.clone());

        match (moved, previous) {
            (Some(constraint), _) => MergeAction::Moved { from: other, constraint },
            (None, None) => MergeAction::Added,
            (None, Some(prev)) if prev == dependency.constraint => MergeAction::Unchanged,
            (None, Some(prev)) => MergeAction::Updated { from: prev },
        }
    }
}

/// Return `manifest` with `additions` applied
pub fn merge(mut manifest: Manifest, additions: &AdditionRequest) -> Manifest {
    DependencyMerger::apply(&mut manifest, additions);
    manifest
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_section() -> impl Strategy<Value = BTreeMap<String, String>> {
        prop::collection::btree_map("[a-e]", "\\^[0-9]\\.[0-9]\\.[0-9]", 0..4)
    }

    prop_compose! {
        fn arb_manifest()(runtime in arb_section(), dev in arb_section()) -> Manifest {
            // Keep the single-section invariant on generated input
            let dev = dev.into_iter().filter(|(k, _)| !runtime.contains_key(k)).collect();
            Manifest { dependencies: runtime, dev_dependencies: dev }
        }
    }

    prop_compose! {
        fn arb_additions()(runtime in arb_section(), dev in arb_section()) -> AdditionRequest {
            AdditionRequest { dependencies: runtime, dev_dependencies: dev }
        }
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(m in arb_manifest(), a in arb_additions()) {
            let once = merge(m, &a);
            let twice = merge(once.clone(), &a);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn unrelated_packages_are_untouched(m in arb_manifest(), a in arb_additions()) {
            let merged = merge(m.clone(), &a);
            for kind in [DependencyKind::Runtime, DependencyKind::Dev] {
                for (name, constraint) in m.section(kind) {
                    if !a.dependencies.contains_key(name) && !a.dev_dependencies.contains_key(name) {
                        prop_assert_eq!(merged.section(kind).get(name), Some(constraint));
                    }
                }
            }
            for name in merged.dependencies.keys().chain(merged.dev_dependencies.keys()) {
                let requested = a.dependencies.contains_key(name) || a.dev_dependencies.contains_key(name);
                prop_assert!(requested || m.get(name).is_some());
            }
        }

        #[test]
        fn requested_constraint_wins(m in arb_manifest(), a in arb_additions()) {
            let merged = merge(m, &a);
            for (name, constraint) in &a.dependencies {
                if !a.dev_dependencies.contains_key(name) {
                    prop_assert_eq!(merged.dependencies.get(name), Some(constraint));
                }
            }
            for (name, constraint) in &a.dev_dependencies {
                prop_assert_eq!(merged.dev_dependencies.get(name), Some(constraint));
            }
        }

        #[test]
        fn package_lives_in_one_section(m in arb_manifest(), a in arb_additions()) {
            let merged = merge(m, &a);
            for name in merged.dependencies.keys() {
                prop_assert!(!merged.dev_dependencies.contains_key(name));
            }
        }
    }
}
