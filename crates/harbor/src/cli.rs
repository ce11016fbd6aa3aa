use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use harbor_core::{LabelScope, DEFAULT_COLOR, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "harbor", version, about = "CLI for the Harbor registry label API")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long = "color-mode", id = "color_mode", value_enum, global = true,
          default_value_t = ColorChoice::Auto)]
    pub color_mode: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML config file
    #[arg(long, env = "HARBOR_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Registry base URL, e.g. https://harbor.example.com (overrides config file)
    #[arg(long, env = "HARBOR_URL", global = true)]
    pub url: Option<String>,

    /// File holding the saved session cookie (default: ./.cookie.yaml)
    #[arg(long, env = "HARBOR_SESSION_FILE", global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Labels(LabelCommands),
    /// Inspect the resolved configuration
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completions and write to stdout
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "harbor", &mut std::io::stdout());
    }
}

#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// List labels according to the query strings.
    ///
    /// Filters labels by name, scope and project_id.
    #[command(name = "labels_list")]
    List {
        /// The label name as filter
        #[arg(short = 'n', long, default_value = "")]
        name: String,
        /// The label scope: 'g' for global labels, 'p' for project labels
        #[arg(short = 's', long)]
        scope: LabelScope,
        /// Relevant project ID, required when scope is 'p'
        #[arg(short = 'i', long = "project_id", default_value_t = 0)]
        project_id: u64,
        /// The page number
        #[arg(short = 'p', long, default_value_t = DEFAULT_PAGE,
              value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// The size of each page, maximum is 100
        #[arg(short = 'z', long = "page_size", default_value_t = DEFAULT_PAGE_SIZE,
              value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64))]
        page_size: u32,
    },
    /// Create a label
    #[command(name = "label_create")]
    Create {
        /// The ID of the label, generated by the registry when 0
        #[arg(short = 'i', long, default_value_t = 0)]
        id: u64,
        /// The name of the label
        #[arg(short = 'n', long)]
        name: String,
        /// The description of the label
        #[arg(short = 'd', long)]
        description: String,
        /// The color code of the label (e.g. #A9B6BE)
        #[arg(short = 'c', long, default_value = DEFAULT_COLOR)]
        color: String,
        /// The scope of the label: 'g' for global, 'p' for project
        #[arg(short = 's', long, default_value = "g")]
        scope: LabelScope,
        /// The project ID if the label is a project label
        #[arg(short = 'p', long = "project_id", default_value_t = 0)]
        project_id: u64,
        /// The creation time of the label (default: now)
        #[arg(long = "creation_time")]
        creation_time: Option<String>,
        /// The update time of the label (default: now)
        #[arg(long = "update_time")]
        update_time: Option<String>,
        /// Mark the label as deleted
        #[arg(long)]
        deleted: bool,
    },
    /// Delete the label specified by ID
    #[command(name = "label_del_by_id")]
    Delete {
        /// Label ID
        #[arg(short = 'i', long)]
        id: u64,
    },
    /// Get the label specified by ID
    #[command(name = "label_get_by_id")]
    Get {
        /// Label ID
        #[arg(short = 'i', long)]
        id: u64,
    },
    /// Update the label properties
    #[command(name = "label_update")]
    Update {
        /// Label ID
        #[arg(short = 'i', long)]
        id: u64,
        /// The name of the label
        #[arg(short = 'n', long)]
        name: String,
        /// The description of the label
        #[arg(short = 'd', long)]
        description: String,
        /// The color code of the label (e.g. #A9B6BE)
        #[arg(short = 'c', long, default_value = DEFAULT_COLOR)]
        color: String,
        /// The scope of the label: 'g' for global, 'p' for project
        #[arg(short = 's', long, default_value = "g")]
        scope: LabelScope,
        /// The project ID if the label is a project label
        #[arg(short = 'p', long = "project_id", default_value_t = 0)]
        project_id: u64,
        /// Mark the label as deleted
        #[arg(long)]
        deleted: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Show the config file search paths
    Path,
}
