//! Machine taxonomy.
//!
//! A [`Machine`] identifies a target platform: operating system, CPU
//! architecture and, for Linux only, the C library the platform links
//! against. The set of supported machines is closed; [`Machine::ALL`]
//! lists all eight in taxonomy order.

use std::fmt;

use thiserror::Error;

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Os {
    Linux,
    Windows,
    MacOs,
}

impl Os {
    /// Identifier used in bucket names and section headers.
    pub fn identifier(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Windows => "windows",
            Os::MacOs => "macos",
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cpu {
    Amd64,
    Aarch64,
}

impl Cpu {
    pub fn identifier(&self) -> &'static str {
        match self {
            Cpu::Amd64 => "amd64",
            Cpu::Aarch64 => "aarch64",
        }
    }
}

/// C library a Linux machine links against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CLibrary {
    #[default]
    Glibc,
    MuslC,
}

impl CLibrary {
    /// Identifier used when building bucket names.
    pub fn identifier(&self) -> &'static str {
        match self {
            CLibrary::Glibc => "glibc",
            CLibrary::MuslC => "muslC",
        }
    }

    /// Suffix appended to section identifiers (`None` for the default).
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            CLibrary::Glibc => None,
            CLibrary::MuslC => Some("musl"),
        }
    }
}

/// A target machine.
///
/// Variant and field order determine the derived `Ord`, which is the
/// taxonomy order: Linux (amd64 then aarch64, glibc before musl), then
/// Windows, then macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Machine {
    Linux { cpu: Cpu, libc: CLibrary },
    Windows { cpu: Cpu },
    MacOs { cpu: Cpu },
}

/// The running machine is not one of the supported machines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported host machine: os `{os}`, architecture `{arch}`{}", env_suffix(.env))]
pub struct UnsupportedMachine {
    pub os: String,
    pub arch: String,
    pub env: String,
}

fn env_suffix(env: &str) -> String {
    if env.is_empty() {
        String::new()
    } else {
        format!(", environment `{}`", env)
    }
}

impl Machine {
    pub const LINUX_AMD64: Machine = Machine::Linux {
        cpu: Cpu::Amd64,
        libc: CLibrary::Glibc,
    };
    pub const LINUX_AMD64_MUSLC: Machine = Machine::Linux {
        cpu: Cpu::Amd64,
        libc: CLibrary::MuslC,
    };
    pub const LINUX_AARCH64: Machine = Machine::Linux {
        cpu: Cpu::Aarch64,
        libc: CLibrary::Glibc,
    };
    pub const LINUX_AARCH64_MUSLC: Machine = Machine::Linux {
        cpu: Cpu::Aarch64,
        libc: CLibrary::MuslC,
    };
    pub const WINDOWS_AMD64: Machine = Machine::Windows { cpu: Cpu::Amd64 };
    pub const WINDOWS_AARCH64: Machine = Machine::Windows { cpu: Cpu::Aarch64 };
    pub const MACOS_AMD64: Machine = Machine::MacOs { cpu: Cpu::Amd64 };
    pub const MACOS_AARCH64: Machine = Machine::MacOs { cpu: Cpu::Aarch64 };

    /// Every supported machine, in taxonomy order.
    pub const ALL: [Machine; 8] = [
        Machine::LINUX_AMD64,
        Machine::LINUX_AMD64_MUSLC,
        Machine::LINUX_AARCH64,
        Machine::LINUX_AARCH64_MUSLC,
        Machine::WINDOWS_AMD64,
        Machine::WINDOWS_AARCH64,
        Machine::MACOS_AMD64,
        Machine::MACOS_AARCH64,
    ];

    /// Iterate over every supported machine in taxonomy order.
    pub fn all() -> impl Iterator<Item = Machine> {
        Self::ALL.into_iter()
    }

    pub fn os(&self) -> Os {
        match self {
            Machine::Linux { .. } => Os::Linux,
            Machine::Windows { .. } => Os::Windows,
            Machine::MacOs { .. } => Os::MacOs,
        }
    }

    pub fn cpu(&self) -> Cpu {
        match *self {
            Machine::Linux { cpu, .. } | Machine::Windows { cpu } | Machine::MacOs { cpu } => cpu,
        }
    }

    /// The C library, for Linux machines only.
    pub fn c_library(&self) -> Option<CLibrary> {
        match *self {
            Machine::Linux { libc, .. } => Some(libc),
            _ => None,
        }
    }

    /// Name of the dependency bucket for this machine.
    ///
    /// OS identifier, then the capitalized CPU identifier, then the
    /// capitalized C library identifier when it is not the default
    /// (`linuxAmd64`, `linuxAarch64MuslC`, `windowsAmd64`).
    pub fn bucket_name(&self) -> String {
        let mut name = format!(
            "{}{}",
            self.os().identifier(),
            capitalize(self.cpu().identifier())
        );
        if let Some(libc) = self.c_library() {
            if libc != CLibrary::default() {
                name.push_str(&capitalize(libc.identifier()));
            }
        }
        name
    }

    /// Canonical identifier used as a snippet section header
    /// (`linux-amd64`, `linux-aarch64-musl`, `macos-aarch64`).
    pub fn identifier(&self) -> String {
        let mut id = format!("{}-{}", self.os().identifier(), self.cpu().identifier());
        if let Some(suffix) = self.c_library().and_then(|libc| libc.suffix()) {
            id.push('-');
            id.push_str(suffix);
        }
        id
    }

    /// Detect the machine this process is running on.
    pub fn host() -> Result<Machine, UnsupportedMachine> {
        let env = if cfg!(target_env = "musl") { "musl" } else { "" };
        Self::detect(std::env::consts::OS, std::env::consts::ARCH, env)
    }

    /// Map Rust-style `os`/`arch`/`env` names onto a supported machine.
    pub fn detect(os: &str, arch: &str, env: &str) -> Result<Machine, UnsupportedMachine> {
        let unsupported = || UnsupportedMachine {
            os: os.to_string(),
            arch: arch.to_string(),
            env: env.to_string(),
        };

        let cpu = match arch {
            "x86_64" | "amd64" => Cpu::Amd64,
            "aarch64" | "arm64" => Cpu::Aarch64,
            _ => return Err(unsupported()),
        };

        match os {
            "linux" => {
                let libc = match env {
                    "musl" => CLibrary::MuslC,
                    "" | "gnu" => CLibrary::Glibc,
                    _ => return Err(unsupported()),
                };
                Ok(Machine::Linux { cpu, libc })
            }
            "windows" => Ok(Machine::Windows { cpu }),
            "macos" => Ok(Machine::MacOs { cpu }),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bucket_names() {
        assert_eq!(Machine::LINUX_AMD64.bucket_name(), "linuxAmd64");
        assert_eq!(Machine::LINUX_AARCH64_MUSLC.bucket_name(), "linuxAarch64MuslC");
        assert_eq!(Machine::LINUX_AMD64_MUSLC.bucket_name(), "linuxAmd64MuslC");
        assert_eq!(Machine::WINDOWS_AARCH64.bucket_name(), "windowsAarch64");
        assert_eq!(Machine::MACOS_AMD64.bucket_name(), "macosAmd64");
    }

    #[test]
    fn test_bucket_names_are_unique() {
        let names: HashSet<String> = Machine::all().map(|m| m.bucket_name()).collect();
        assert_eq!(names.len(), Machine::ALL.len());

        let ids: HashSet<String> = Machine::all().map(|m| m.identifier()).collect();
        assert_eq!(ids.len(), Machine::ALL.len());
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(Machine::LINUX_AMD64.to_string(), "linux-amd64");
        assert_eq!(Machine::LINUX_AARCH64_MUSLC.to_string(), "linux-aarch64-musl");
        assert_eq!(Machine::WINDOWS_AMD64.to_string(), "windows-amd64");
        assert_eq!(Machine::MACOS_AARCH64.to_string(), "macos-aarch64");
    }

    #[test]
    fn test_ord_is_taxonomy_order() {
        let mut sorted = Machine::ALL;
        sorted.reverse();
        sorted.sort();
        let ids: Vec<String> = sorted.iter().map(|m| m.identifier()).collect();
        assert_eq!(
            ids,
            vec![
                "linux-amd64",
                "linux-amd64-musl",
                "linux-aarch64",
                "linux-aarch64-musl",
                "windows-amd64",
                "windows-aarch64",
                "macos-amd64",
                "macos-aarch64",
            ]
        );
        assert_eq!(sorted, Machine::ALL);
    }

    #[test]
    fn test_detect() {
        assert_eq!(
            Machine::detect("linux", "x86_64", "gnu").unwrap(),
            Machine::LINUX_AMD64
        );
        assert_eq!(
            Machine::detect("linux", "aarch64", "musl").unwrap(),
            Machine::LINUX_AARCH64_MUSLC
        );
        assert_eq!(
            Machine::detect("macos", "aarch64", "").unwrap(),
            Machine::MACOS_AARCH64
        );
        assert_eq!(
            Machine::detect("windows", "x86_64", "msvc").unwrap(),
            Machine::WINDOWS_AMD64
        );
    }

    #[test]
    fn test_detect_unsupported() {
        let err = Machine::detect("freebsd", "x86_64", "").unwrap_err();
        assert_eq!(err.os, "freebsd");
        assert!(err.to_string().contains("freebsd"));
        assert!(err.to_string().contains("x86_64"));

        let err = Machine::detect("linux", "riscv64", "gnu").unwrap_err();
        assert!(err.to_string().contains("riscv64"));
    }
}
