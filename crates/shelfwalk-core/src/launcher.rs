use std::path::Path;
#[cfg(feature = "host-tools")]
use std::process::{Command, Stdio};
#[cfg(feature = "host-tools")]
use std::thread;

#[cfg(feature = "host-tools")]
use tracing::{info, warn};

pub const SHELFWALK_HOST_TOOLS_ENV: &str = "SHELFWALK_HOST_TOOLS";

/// Whether `open` may start the host's file browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostToolsMode {
    #[default]
    Enabled,
    Disabled,
}

impl HostToolsMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    /// Reads `SHELFWALK_HOST_TOOLS`; unset or unrecognised values keep opening enabled.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(SHELFWALK_HOST_TOOLS_ENV)
            .ok()
            .and_then(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" | "enabled" => Some(Self::Enabled),
            "0" | "false" | "no" | "off" | "disabled" | "none" => Some(Self::Disabled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Spawned,
    Blocked { reason: String },
    SpawnError { error: String },
}

/// Asks the host to show a directory in its file browser.
pub trait Launcher {
    fn open(&self, path: &Path) -> LaunchOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemLauncher {
    program: &'static str,
    mode: HostToolsMode,
}

impl SystemLauncher {
    /// Picks the opener for the running platform and the mode from the environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::with_mode(HostToolsMode::from_env())
    }

    #[must_use]
    pub fn with_mode(mode: HostToolsMode) -> Self {
        Self::with_program(opener_program_for(std::env::consts::OS), mode)
    }

    #[must_use]
    pub const fn with_program(program: &'static str, mode: HostToolsMode) -> Self {
        Self { program, mode }
    }

    #[must_use]
    pub const fn program(&self) -> &'static str {
        self.program
    }

    #[must_use]
    pub const fn mode(&self) -> HostToolsMode {
        self.mode
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, path: &Path) -> LaunchOutcome {
        if self.mode == HostToolsMode::Disabled {
            return LaunchOutcome::Blocked {
                reason: format!("{SHELFWALK_HOST_TOOLS_ENV} is off; set it to on to open directories"),
            };
        }

        #[cfg(feature = "host-tools")]
        {
            let spawned = Command::new(self.program)
                .arg(path)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            match spawned {
                Ok(mut child) => {
                    info!(program = self.program, path = %path.display(), "opened directory");
                    // the opener outlives this call; reap it off the console thread
                    let reaper = thread::Builder::new()
                        .name("shelfwalk-opener".to_string())
                        .spawn(move || child.wait());
                    if let Err(err) = reaper {
                        warn!(error = %err, "could not start opener reaper thread");
                    }
                    LaunchOutcome::Spawned
                }
                Err(err) => {
                    warn!(program = self.program, path = %path.display(), error = %err, "open failed");
                    LaunchOutcome::SpawnError {
                        error: err.to_string(),
                    }
                }
            }
        }

        #[cfg(not(feature = "host-tools"))]
        {
            LaunchOutcome::Blocked {
                reason: format!(
                    "shelfwalk was built without the host-tools feature; cannot open {}",
                    path.display()
                ),
            }
        }
    }
}

#[must_use]
pub fn opener_program_for(os: &str) -> &'static str {
    match os {
        "windows" => "explorer",
        "macos" => "open",
        _ => "xdg-open",
    }
}
