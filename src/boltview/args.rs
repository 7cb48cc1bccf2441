use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "boltview", bin_name = "boltview", version = get_version())]
#[command(about = "Browse and edit an embedded key-value store as text lines", long_about = None)]
pub struct Cli {
    /// Store file to open
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json
    #[arg(long, global = true, env = "BOLTVIEW_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every bucket and entry as buffer lines
    #[command(alias = "ls")]
    List {
        /// Print the listing as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Create an empty bucket
    #[command(alias = "cb")]
    CreateBucket { name: String },

    /// Create an entry, creating its bucket if needed
    #[command(alias = "ce")]
    CreateEntry {
        bucket: String,
        key: String,
        value: String,

        /// Overwrite the key if it already holds a value
        #[arg(long)]
        anyway: bool,
    },

    /// Delete an entry
    #[command(alias = "de")]
    DeleteEntry { bucket: String, key: String },

    /// Delete a bucket (it must be empty)
    DeleteBucket { name: String },

    /// Edit the store as text in $EDITOR and write the changes back
    #[command(alias = "e")]
    Edit,

    /// Write an edited listing back to the store ("-" reads stdin)
    Apply { file: PathBuf },

    /// Invoke a host function by name, e.g. BoltviewerCreateEntry b k v
    Call {
        function: String,

        #[arg(num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (indent, filetype, create-if-missing)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
