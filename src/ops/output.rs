//! Snippet sinks: write to a file or print to a stream.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::dependency_set::DependencyHost;
use crate::core::registry::MachineRegistry;
use crate::ops::snippet::generate;
use crate::util::fs::write_atomic;

/// Generate the snippet and write it to `destination`, replacing any
/// previous contents. Returns the generated text.
pub fn write_snippet<H>(registry: &MachineRegistry<H>, destination: &Path) -> Result<String>
where
    H: DependencyHost,
{
    let text = generate(&registry.snapshot()?);

    write_atomic(destination, text.as_bytes())
        .with_context(|| format!("failed to write snippet to {}", destination.display()))?;

    tracing::info!("wrote {} bytes to {}", text.len(), destination.display());
    Ok(text)
}

/// Generate the snippet and write it to `out`.
pub fn print_snippet<H, W>(registry: &MachineRegistry<H>, out: &mut W) -> Result<()>
where
    H: DependencyHost,
    W: Write + ?Sized,
{
    let text = generate(&registry.snapshot()?);

    if text.is_empty() {
        tracing::info!("no machine-specific dependencies declared");
    }

    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .context("failed to print snippet")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency_set::{Coordinate, DependencySets};
    use crate::core::machine::Machine;
    use tempfile::TempDir;

    fn setup() -> MachineRegistry {
        let mut registry = MachineRegistry::new(Machine::LINUX_AMD64, DependencySets::new());
        registry.register_all_machines().unwrap();

        let linux = registry.bucket(Machine::LINUX_AMD64).unwrap();
        registry.add(linux, Coordinate::new("acme:foo:1.0").unwrap()).unwrap();
        let musl = registry.bucket(Machine::LINUX_AARCH64_MUSLC).unwrap();
        registry.add(musl, Coordinate::new("acme:bar:2.0").unwrap()).unwrap();

        registry
    }

    #[test]
    fn test_write_matches_generate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("generated.berth.conf");
        let registry = setup();

        write_snippet(&registry, &path).unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, generate(&registry.snapshot().unwrap()));
    }

    #[test]
    fn test_write_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("generated.berth.conf");
        std::fs::write(&path, "stale contents that are much longer than the snippet\n".repeat(10))
            .unwrap();
        let registry = setup();

        let text = write_snippet(&registry, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_write_empty_snippet() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("generated.berth.conf");
        let mut registry = MachineRegistry::new(Machine::WINDOWS_AMD64, DependencySets::new());
        registry.register_all_machines().unwrap();

        write_snippet(&registry, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_write_reports_destination() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no-such-dir").join("out.conf");
        let registry = setup();

        let err = write_snippet(&registry, &path).unwrap_err();
        assert!(err.to_string().contains("out.conf"));
    }

    #[test]
    fn test_print_snippet() {
        let registry = setup();
        let mut out = Vec::new();

        print_snippet(&registry, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[linux-amd64]\nacme:foo:1.0\n\n[linux-aarch64-musl]\nacme:bar:2.0\n"
        );
    }
}
