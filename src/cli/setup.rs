//! Shell completion setup instructions.
//!
//! Completions are generated dynamically by the binary itself through
//! `clap_complete::CompleteEnv`, so setup is a single line in the shell rc.

use std::path::Path;

/// Shells with dynamic completion support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    /// Detect the shell from a `$SHELL` value.
    pub fn from_shell_path(shell: &str) -> Option<Self> {
        match Path::new(shell).file_name()?.to_str()? {
            "bash" => Some(Shell::Bash),
            "zsh" => Some(Shell::Zsh),
            "fish" => Some(Shell::Fish),
            _ => None,
        }
    }

    fn rc_file(self) -> &'static str {
        match self {
            Shell::Bash => "~/.bashrc",
            Shell::Zsh => "~/.zshrc",
            Shell::Fish => "~/.config/fish/config.fish",
        }
    }

    /// Line to add to the shell rc file.
    pub fn setup_line(self, bin: &str) -> String {
        match self {
            Shell::Bash => format!("source <(COMPLETE=bash {bin})"),
            Shell::Zsh => format!("source <(COMPLETE=zsh {bin})"),
            Shell::Fish => format!("COMPLETE=fish {bin} | source"),
        }
    }
}

/// Print setup instructions for the detected shell, or for all shells.
pub fn print_completion_instructions(bin: &str) {
    let detected = std::env::var("SHELL")
        .ok()
        .and_then(|s| Shell::from_shell_path(&s));

    match detected {
        Some(shell) => {
            println!("Add this line to {}:\n", shell.rc_file());
            println!("    {}", shell.setup_line(bin));
        }
        None => {
            println!("Add the line for your shell to its rc file:\n");
            for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
                println!("    {:<28} {}", shell.rc_file(), shell.setup_line(bin));
            }
        }
    }
    println!("\nCompletions offer directories and .conf files.");
}
