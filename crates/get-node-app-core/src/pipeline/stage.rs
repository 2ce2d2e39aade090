//! Pipeline stages and their user-facing labels

use std::fmt;

/// Pipeline states in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Init,
    Probing,
    Listing,
    Selecting,
    Downloading,
    CreatingDir,
    Copying,
    SettingUp,
    Finalizing,
    Done,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Init,
        Stage::Probing,
        Stage::Listing,
        Stage::Selecting,
        Stage::Downloading,
        Stage::CreatingDir,
        Stage::Copying,
        Stage::SettingUp,
        Stage::Finalizing,
        Stage::Done,
    ];

    /// The stage that follows this one, `None` for `Done`
    pub fn next(self) -> Option<Stage> {
        let idx = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Init => "Init",
            Stage::Probing => "Probing",
            Stage::Listing => "Listing",
            Stage::Selecting => "Selecting",
            Stage::Downloading => "Downloading",
            Stage::CreatingDir => "CreatingDir",
            Stage::Copying => "Copying",
            Stage::SettingUp => "SettingUp",
            Stage::Finalizing => "Finalizing",
            Stage::Done => "Done",
        }
    }

    /// Spinner text while the stage runs; interactive stages have none
    pub fn progress_label(&self) -> Option<&'static str> {
        match self {
            Stage::Probing => Some("Performing checks"),
            Stage::Listing => Some("Fetching templates"),
            Stage::Downloading => Some("Downloading template"),
            Stage::CreatingDir => Some("Creating project directory"),
            Stage::Copying => Some("Copying template"),
            Stage::SettingUp => Some("Setting up project"),
            Stage::Init | Stage::Selecting | Stage::Finalizing | Stage::Done => None,
        }
    }

    /// Short message shown when the stage fails
    pub fn failure_label(&self) -> &'static str {
        match self {
            Stage::Init => "Failed to prepare app data",
            Stage::Probing => "Checks failed",
            Stage::Listing => "Failed to fetch template list",
            Stage::Selecting => "Selection aborted",
            Stage::Downloading => "Failed to download template",
            Stage::CreatingDir => "Failed to create project",
            Stage::Copying => "Failed to copy template",
            Stage::SettingUp => "Failed to setup project",
            Stage::Finalizing => "Failed to clean up session log",
            Stage::Done => "Done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_advance_in_order() {
        let mut stage = Stage::Init;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited, Stage::ALL.to_vec());
    }

    #[test]
    fn test_done_is_terminal() {
        assert_eq!(Stage::Done.next(), None);
    }

    #[test]
    fn test_download_precedes_directory_creation() {
        assert!(Stage::Downloading < Stage::CreatingDir);
        assert!(Stage::CreatingDir < Stage::Copying);
    }
}
