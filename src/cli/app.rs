//! Main CLI application structure

use clap::{Parser, Subcommand};
use anyhow::{Context, Result};

use std::fs;
use std::path::PathBuf;

use super::output::{Output, OutputFormat};
use super::check;

#[derive(Parser)]
#[command(name = "refcheck")]
#[command(author, version, about = "Enforce issue references in git commit messages")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a commit message file (what the installed hook invokes)
    Check {
        /// Path to the file holding the proposed commit message
        file: PathBuf,
    },

    /// Install the commit-msg hook into the current repository
    Install {
        /// Overwrite a commit-msg hook not written by refcheck
        #[arg(long)]
        force: bool,
    },

    /// Remove the commit-msg hook installed by refcheck
    Uninstall,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Check { file } => {
            // This is called by git, return the exit code directly
            let exit_code = check::run_check(&file, &output)?;
            std::process::exit(exit_code);
        }

        Commands::Install { force } => install_hook(&output, force)?,

        Commands::Uninstall => uninstall_hook(&output)?,
    }

    Ok(())
}

/// Marker identifying a hook written by this tool
const HOOK_MARKER: &str = "# refcheck commit-msg hook";

/// Shell shim written to .git/hooks/commit-msg
const HOOK_SCRIPT: &str = "#!/bin/sh\n# refcheck commit-msg hook\nexec refcheck check \"$1\"\n";

/// Installs the commit-msg hook for the current repository
fn install_hook(output: &Output, force: bool) -> Result<()> {
    let hook_path = commit_msg_hook_path()?;

    if let Some(hooks_dir) = hook_path.parent() {
        fs::create_dir_all(hooks_dir).with_context(|| {
            format!("Failed to create hooks directory: {}", hooks_dir.display())
        })?;
    }

    if hook_path.exists() && !force {
        let existing = fs::read_to_string(&hook_path).unwrap_or_default();
        if existing.contains(HOOK_MARKER) {
            output.verbose("commit-msg hook already installed");
        } else {
            anyhow::bail!(
                "A commit-msg hook already exists at {}. Re-run with --force to overwrite it.",
                hook_path.display()
            );
        }
    }

    fs::write(&hook_path, HOOK_SCRIPT)
        .with_context(|| format!("Failed to write hook: {}", hook_path.display()))?;

    // Git only runs executable hooks
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    output.success(&format!(
        "Installed commit-msg hook at {}",
        hook_path.display()
    ));

    if output.is_json() {
        output.data(&serde_json::json!({
            "installed": true,
            "hook": hook_path.display().to_string(),
        }));
    } else {
        println!();
        println!("Commit messages must now reference an issue, e.g.");
        println!("    git commit -m \"improve parser, fixes #42\"");
    }

    Ok(())
}

/// Removes the commit-msg hook if it was written by this tool
fn uninstall_hook(output: &Output) -> Result<()> {
    let hook_path = commit_msg_hook_path()?;

    if !hook_path.exists() {
        output.success("No commit-msg hook installed");
        return Ok(());
    }

    let existing = fs::read_to_string(&hook_path)
        .with_context(|| format!("Failed to read hook: {}", hook_path.display()))?;

    if !existing.contains(HOOK_MARKER) {
        anyhow::bail!(
            "The commit-msg hook at {} was not written by refcheck, leaving it in place",
            hook_path.display()
        );
    }

    fs::remove_file(&hook_path)
        .with_context(|| format!("Failed to remove hook: {}", hook_path.display()))?;

    output.success(&format!(
        "Removed commit-msg hook at {}",
        hook_path.display()
    ));

    Ok(())
}

/// Resolves the commit-msg hook path for the current repository
fn commit_msg_hook_path() -> Result<PathBuf> {
    use std::process::Command;

    let git_dir = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .context("Failed to run git")?;

    if !git_dir.status.success() {
        anyhow::bail!("Not in a git repository");
    }

    let git_dir = String::from_utf8(git_dir.stdout).context("git returned a non-UTF-8 path")?;

    Ok(PathBuf::from(git_dir.trim()).join("hooks").join("commit-msg"))
}
