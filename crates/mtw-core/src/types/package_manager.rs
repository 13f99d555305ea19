//! Package manager detection.
//!
//! The install task after a generator run uses whichever package manager the
//! workspace already has a lockfile for.

use std::fmt;

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Lockfiles in detection order
    const LOCKFILES: [(&'static str, PackageManager); 5] = [
        ("bun.lockb", PackageManager::Bun),
        ("bun.lock", PackageManager::Bun),
        ("pnpm-lock.yaml", PackageManager::Pnpm),
        ("yarn.lock", PackageManager::Yarn),
        ("package-lock.json", PackageManager::Npm),
    ];

    /// Pick the package manager from the lockfiles present, defaulting to npm
    pub fn detect(has_file: impl Fn(&str) -> bool) -> Self {
        Self::LOCKFILES
            .iter()
            .find(|(lockfile, _)| has_file(lockfile))
            .map(|(_, pm)| *pm)
            .unwrap_or(PackageManager::Npm)
    }

    /// Executable name
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments for a plain install
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_defaults_to_npm() {
        assert_eq!(PackageManager::detect(|_| false), PackageManager::Npm);
    }

    #[test]
    fn test_detect_from_lockfile() {
        assert_eq!(PackageManager::detect(|f| f == "pnpm-lock.yaml"), PackageManager::Pnpm);
        assert_eq!(PackageManager::detect(|f| f == "yarn.lock"), PackageManager::Yarn);
        assert_eq!(PackageManager::detect(|f| f == "bun.lockb"), PackageManager::Bun);
        assert_eq!(PackageManager::detect(|f| f == "package-lock.json"), PackageManager::Npm);
    }

    #[test]
    fn test_install_command() {
        assert_eq!(PackageManager::Pnpm.command(), "pnpm");
        assert_eq!(PackageManager::Yarn.install_args(), &["install"]);
        assert_eq!(PackageManager::Bun.to_string(), "bun");
    }
}
