use crate::error::Error;
use std::path::Path;
use std::process::{Command, Stdio};

/// Project-local override for the derived version label.
const TAG_HELPER: &str = "docker/tag_helper.sh";

/// An (application, version label) pair as given on the command line.
/// A missing version is filled in later, either from git or not at all
/// for read-only actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub app: String,
    pub version: Option<String>,
}

impl Target {
    /// Split an `app[:version]` token. More than one colon is ambiguous
    /// and rejected outright, as are empty halves.
    pub fn parse(token: &str) -> Result<Target, Error> {
        let parts: Vec<&str> = token.split(':').collect();
        match parts.as_slice() {
            [app] if !app.is_empty() => Ok(Target {
                app: app.to_string(),
                version: None,
            }),
            [app, version] if !app.is_empty() && !version.is_empty() => Ok(Target {
                app: app.to_string(),
                version: Some(version.to_string()),
            }),
            _ => Err(Error::Argument(format!(
                "malformed app:version token: '{token}'"
            ))),
        }
    }
}

fn in_git_repository() -> bool {
    Command::new("git")
        .args(["status", "-s", "--porcelain"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Derive a version label for the current working directory: the tag
/// helper script wins if it exists and succeeds, otherwise `git describe`.
pub fn resolve_version() -> Result<String, Error> {
    if !in_git_repository() {
        return Err(Error::Version(
            "not a git repository, cannot derive a version label".to_string(),
        ));
    }

    if Path::new(TAG_HELPER).is_file() {
        if let Ok(out) = Command::new(TAG_HELPER).stderr(Stdio::null()).output() {
            if out.status.success() {
                let tag = String::from_utf8_lossy(&out.stdout).trim().to_string();
                if !tag.is_empty() {
                    return Ok(tag);
                }
            }
        }
    }

    let out = Command::new("git")
        .args(["describe", "--tags"])
        .stderr(Stdio::null())
        .output()
        .map_err(|e| Error::Version(format!("failed to run git describe: {e}")))?;

    if !out.status.success() {
        return Err(Error::Version(
            "no tag available for the current revision".to_string(),
        ));
    }

    let tag = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if tag.is_empty() {
        return Err(Error::Version(
            "no tag available for the current revision".to_string(),
        ));
    }
    Ok(tag)
}
