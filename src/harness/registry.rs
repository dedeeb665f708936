//! Target architecture registry
//!
//! A fixed table mapping each supported target architecture to the launch
//! script that boots it under emulation, the extra argument string that
//! script expects, and the wall-clock budget for one boot self-test.
//! Supporting a new architecture means adding a table entry.

use std::time::Duration;

/// How to boot one target architecture.
#[derive(Debug, Clone, Copy)]
pub struct ArchDescriptor {
    /// Target name used on the command line and in the summary.
    pub name: &'static str,
    /// Launch script name, resolved under `<root>/scripts/`.
    pub script: &'static str,
    /// Extra argument passed to the script verbatim as a single token.
    pub extra_args: Option<&'static str>,
    /// Wall-clock budget for the whole boot self-test.
    pub timeout: Duration,
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const BUILTIN: &[ArchDescriptor] = &[
    ArchDescriptor {
        name: "arm",
        script: "do-qemuarm",
        extra_args: None,
        timeout: DEFAULT_TIMEOUT,
    },
    ArchDescriptor {
        name: "arm64",
        script: "do-qemuarm",
        extra_args: Some("-6s4"),
        timeout: DEFAULT_TIMEOUT,
    },
    ArchDescriptor {
        name: "m68k",
        script: "do-qemum68k",
        extra_args: None,
        timeout: DEFAULT_TIMEOUT,
    },
    ArchDescriptor {
        name: "riscv32",
        script: "do-qemuriscv",
        extra_args: None,
        timeout: DEFAULT_TIMEOUT,
    },
    ArchDescriptor {
        name: "riscv64",
        script: "do-qemuriscv",
        extra_args: Some("-6Ss4"),
        timeout: DEFAULT_TIMEOUT,
    },
    ArchDescriptor {
        name: "x86",
        script: "do-qemux86",
        extra_args: Some("-s4"),
        timeout: DEFAULT_TIMEOUT,
    },
    ArchDescriptor {
        name: "x86-64",
        script: "do-qemux86",
        extra_args: Some("-6s4"),
        timeout: DEFAULT_TIMEOUT,
    },
];

/// Immutable lookup table of supported targets.
#[derive(Debug, Clone)]
pub struct ArchRegistry {
    entries: &'static [ArchDescriptor],
}

impl Default for ArchRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ArchRegistry {
    /// The builtin table of supported architectures.
    pub fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// A registry over a custom table (for seeding tests).
    pub fn with_entries(entries: &'static [ArchDescriptor]) -> Self {
        Self { entries }
    }

    /// Find a target by name.
    pub fn lookup(&self, name: &str) -> Option<&ArchDescriptor> {
        self.entries.iter().find(|d| d.name == name)
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ArchDescriptor> {
        self.entries.iter()
    }

    /// Registered target names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|d| d.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_targets() {
        let registry = ArchRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["arm", "arm64", "m68k", "riscv32", "riscv64", "x86", "x86-64"]
        );
    }

    #[test]
    fn test_lookup_known_target() {
        let registry = ArchRegistry::builtin();
        let arm64 = registry.lookup("arm64").unwrap();
        assert_eq!(arm64.script, "do-qemuarm");
        assert_eq!(arm64.extra_args, Some("-6s4"));
        assert_eq!(arm64.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_lookup_unknown_target() {
        let registry = ArchRegistry::builtin();
        assert!(registry.lookup("sparc").is_none());
        assert!(registry.lookup("ARM").is_none());
    }

    #[test]
    fn test_custom_entries() {
        static ENTRIES: &[ArchDescriptor] = &[ArchDescriptor {
            name: "fake",
            script: "do-fake",
            extra_args: None,
            timeout: Duration::from_secs(5),
        }];
        let registry = ArchRegistry::with_entries(ENTRIES);
        assert!(registry.lookup("fake").is_some());
        assert!(registry.lookup("arm").is_none());
    }
}
