use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// Windows, including Git Bash / Cygwin environments.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
///
/// Passed explicitly into the catalog, the filters that branch on platform,
/// and the installer; there is no ambient platform state. Windows is the
/// platform for which the platform-conditional filter branches (credential
/// helper retention, `#w` marker stripping) are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// The operating system this run targets.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: if cfg!(target_os = "windows") {
                Os::Windows
            } else {
                // Anything Unix-like is treated as Linux
                Os::Linux
            },
        }
    }

    /// Create a platform with an explicit value.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is a Linux (or other Unix-like) run.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    /// Whether this is a Windows run.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_returns_valid() {
        let p = Platform::detect();
        // On any system this should succeed
        assert!(p.is_linux() || p.is_windows());
    }

    #[test]
    fn platform_new_linux() {
        let p = Platform::new(Os::Linux);
        assert!(p.is_linux());
        assert!(!p.is_windows());
    }

    #[test]
    fn platform_new_windows() {
        let p = Platform::new(Os::Windows);
        assert!(p.is_windows());
        assert!(!p.is_linux());
    }

    #[test]
    fn os_display() {
        assert_eq!(Os::Linux.to_string(), "linux");
        assert_eq!(Os::Windows.to_string(), "windows");
    }
}
