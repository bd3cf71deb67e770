use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[cfg(feature = "unstable-dynamic")]
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate, ValueCompleter};

#[derive(Parser, Debug)]
#[command(name = "fgtree")]
#[command(version)]
#[command(about = "A FortiGate configuration navigator with hierarchical section extraction")]
#[command(
    long_about = "fgtree - Extract, search and export sections of FortiGate configuration backups.\n\n\
    Every `config ... end` block is indexed under its full path (e.g. \"system interface\",\n\
    \"vpn ipsec phase1-interface\", \"a > b\" for nested blocks). Interfaces inside\n\
    `config system interface` are indexed by name.\n\n\
    Examples:\n  \
    fgtree fw.conf                           # List section paths\n  \
    fgtree --tree fw.conf                    # Show section hierarchy\n  \
    fgtree -s \"system dns\" fw.conf           # Print a section\n  \
    fgtree -i port1 fw.conf                  # Print an interface\n  \
    fgtree -f \"system *\" fw.conf             # Search paths and bodies\n  \
    fgtree -f \"firewall*\" -e out/ fw.conf    # Export matching sections\n  \
    cat fw.conf | fgtree --interfaces        # Read from stdin"
)]
pub struct Cli {
    /// Configuration file to read (.conf), or '-' for stdin
    ///
    /// If no file is specified and stdin is piped, input is read from stdin.
    /// The extension is not enforced.
    #[arg(add = config_file_completer())]
    pub file: Option<PathBuf>,

    /// List section paths (default when no other mode is given)
    ///
    /// Paths are listed in the order sections close, so nested sections
    /// appear before their parents.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// List interface names from `config system interface`
    #[arg(long = "interfaces")]
    pub interfaces: bool,

    /// Show section hierarchy with box-drawing characters
    #[arg(long = "tree")]
    pub tree: bool,

    /// Print the body of the section at PATH
    ///
    /// Use the full path as listed, e.g. "system interface" or
    /// "vpn ipsec phase1-interface".
    #[arg(short = 's', long = "section", value_name = "PATH")]
    pub section: Option<String>,

    /// Print the body of the interface NAME
    #[arg(short = 'i', long = "interface", value_name = "NAME")]
    pub interface: Option<String>,

    /// Restrict results to sections matching QUERY (case-insensitive)
    ///
    /// QUERY is literal text where `*` matches any characters. A section
    /// matches when its path starts with QUERY or its body contains it.
    ///
    /// Example: --search "system *" matches "system interface"
    #[arg(short = 'f', long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// Count sections and interfaces
    #[arg(long = "count")]
    pub count: bool,

    /// Write the selected section, or every search result, into DIR
    ///
    /// Files are named after the section path with " > " replaced by "_"
    /// and a .txt extension.
    #[arg(short = 'e', long = "export", value_name = "DIR", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Output format for listings
    ///
    ///   plain - Human-readable text (default)
    ///   json  - JSON document with bodies and line positions
    ///   tree  - Box-drawing tree structure
    #[arg(short = 'o', long = "output")]
    pub output: Option<OutputFormat>,

    /// Hide line ranges in plain listings
    #[arg(long = "no-lines")]
    pub no_lines: bool,

    /// Verbose logging to stderr
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long = "init-config")]
    pub init_config: bool,

    /// Print shell completion setup instructions
    #[arg(long = "setup-completions")]
    pub setup_completions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
    /// Tree format with box-drawing
    Tree,
}

impl OutputFormat {
    /// Parse a format name from the config file.
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

#[cfg(feature = "unstable-dynamic")]
fn config_file_completer() -> ArgValueCompleter {
    use std::ffi::OsStr;
    use std::path::Path;

    struct ConfigFileCompleter;

    impl ValueCompleter for ConfigFileCompleter {
        fn complete(&self, current: &OsStr) -> Vec<CompletionCandidate> {
            let input_str = current.to_string_lossy();
            let input_path = Path::new(input_str.as_ref());

            let (search_dir, prefix) = if input_str.is_empty() {
                (Path::new("."), String::new())
            } else if input_str.ends_with('/') || input_str.ends_with('\\') {
                (input_path, String::new())
            } else {
                // parent() is Some("") for bare filenames
                let parent = input_path.parent().unwrap_or(Path::new("."));
                let dir = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                let prefix = input_path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                (dir, prefix)
            };

            let Ok(entries) = std::fs::read_dir(search_dir) else {
                return vec![];
            };

            entries
                .filter_map(Result::ok)
                .filter_map(|entry| {
                    let path = entry.path();
                    let file_name = path.file_name()?.to_string_lossy().to_string();

                    if !prefix.is_empty()
                        && !file_name.to_lowercase().starts_with(&prefix.to_lowercase())
                    {
                        return None;
                    }

                    let value = if search_dir == Path::new(".") {
                        file_name
                    } else {
                        search_dir.join(&file_name).to_string_lossy().to_string()
                    };

                    if path.is_dir() {
                        let mut dir_value = value;
                        if !dir_value.ends_with('/') {
                            dir_value.push('/');
                        }
                        Some(CompletionCandidate::new(dir_value).help(Some("directory".into())))
                    } else if fgtree::input::has_config_extension(&path) {
                        Some(CompletionCandidate::new(value))
                    } else {
                        None
                    }
                })
                .collect()
        }
    }

    ArgValueCompleter::new(ConfigFileCompleter)
}

#[cfg(not(feature = "unstable-dynamic"))]
fn config_file_completer() -> clap::builder::ValueHint {
    clap::ValueHint::FilePath
}
