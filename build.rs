use std::process::Command;
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let in_git_repo = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    // Outside a git checkout only the build timestamp is emitted; the crate
    // falls back to "unknown" for the commit.
    if in_git_repo {
        EmitBuilder::builder().build_timestamp().git_sha(true).emit()?;
    } else {
        EmitBuilder::builder().build_timestamp().emit()?;
    }

    Ok(())
}
