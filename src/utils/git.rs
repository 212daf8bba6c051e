use crate::error::PatchError;
use anyhow::{anyhow, Result};
use log::{debug, warn};
use std::path::Path;
use std::process::Command;
use std::string::FromUtf8Error;

pub fn is_git_installed() -> Result<()> {
    Command::new("git").arg("--version").output()?;
    Ok(())
}

/*
resolve HEAD to its abbreviated hash. `repo` is the directory git runs in,
None means the current directory.
*/
pub fn get_short_head(repo: Option<&Path>) -> Result<String> {
    is_git_installed()?;
    short_head_from(Command::new("git"), repo)
}

fn short_head_from(mut command: Command, repo: Option<&Path>) -> Result<String> {
    command.args(["rev-parse", "--verify", "HEAD", "--short"]);
    if let Some(repo) = repo {
        command.current_dir(repo);
    }

    let output = command.output()?;
    if !output.status.success() {
        return Err(anyhow!(
            "git rev-parse exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let hash = String::from_utf8(output.stdout)?.trim().to_string();
    debug!("resolved HEAD to {}", hash);
    Ok(hash)
}

/// Like [`get_short_head`], but a missing git or a failed lookup degrades to an empty hash.
/// Output that is not valid UTF-8 is still an error.
pub fn short_head_or_empty(repo: Option<&Path>) -> crate::error::Result<String> {
    degrade(get_short_head(repo))
}

fn degrade(lookup: Result<String>) -> crate::error::Result<String> {
    match lookup {
        Ok(hash) => Ok(hash),
        Err(e) => match e.downcast::<FromUtf8Error>() {
            Ok(decode) => Err(PatchError::GitOutput(decode)),
            Err(e) => {
                warn!("could not resolve git commit, version label will carry an empty hash: {}", e);
                Ok(String::new())
            }
        },
    }
}
