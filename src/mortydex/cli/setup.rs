use clap::{Parser, Subcommand, ValueEnum};
use mortydex::api::{ResetTarget, SortOrder};
use mortydex::filter::{GenderFilter, MembershipScope, SpeciesFilter, StatusFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mortydex", bin_name = "mortydex", version)]
#[command(
    about = "Browse the Rick and Morty character catalog: favorites, soft deletes, filters and comments",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding favorites, deletions, comments, filters and config
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List characters (the default command)
    #[command(alias = "ls")]
    List {
        /// Only names containing this text (overrides the stored search)
        #[arg(short, long)]
        search: Option<String>,

        /// Name order: asc or desc
        #[arg(long, default_value = "asc")]
        sort: SortOrder,

        /// Show the deleted characters instead
        #[arg(long)]
        deleted: bool,
    },

    /// Show one character's details and comments
    #[command(alias = "v")]
    View {
        /// Character id
        id: u32,
    },

    /// Toggle favorite on one or more characters
    #[command(alias = "star")]
    Fav {
        /// Character ids (e.g. 1 2 3)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u32>,
    },

    /// Toggle soft delete on one or more characters (run again to restore)
    #[command(alias = "rm")]
    Delete {
        /// Character ids (e.g. 1 2 3)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u32>,
    },

    /// Add, remove or list comments on a character
    #[command(alias = "c")]
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },

    /// Inspect or change the list filters
    #[command(alias = "f")]
    Filter {
        #[command(subcommand)]
        action: Option<FilterCommands>,
    },

    /// Wipe stored state
    Reset {
        /// What to wipe
        #[arg(value_enum)]
        target: ResetArg,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (endpoint, timeout-secs, retries, catalog-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// Add a comment (1-500 characters)
    Add {
        /// Character id
        id: u32,

        /// Comment text
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        text: Vec<String>,
    },

    /// Delete a comment by id (or unambiguous id prefix)
    #[command(alias = "rm")]
    Delete {
        /// Character id
        id: u32,

        /// Comment id
        comment_id: String,
    },

    /// List a character's comments, newest first
    #[command(alias = "ls")]
    List {
        /// Character id
        id: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum FilterCommands {
    /// Show pending and applied filters
    Show,

    /// Change pending filters (use `apply` to make them take effect)
    Set {
        /// all, starred or others
        #[arg(long = "character")]
        scope: Option<MembershipScope>,

        /// all, Human or Alien
        #[arg(long)]
        species: Option<SpeciesFilter>,

        /// all, Alive, Dead or unknown
        #[arg(long)]
        status: Option<StatusFilter>,

        /// all, Male, Female, Genderless or unknown
        #[arg(long)]
        gender: Option<GenderFilter>,
    },

    /// Apply the pending filters to the list
    Apply,

    /// Reset all filters and the search text
    Clear,

    /// Set the search text (takes effect immediately; no text clears it)
    Search {
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ResetArg {
    Favorites,
    Deleted,
    Comments,
    Filters,
    All,
}

impl From<ResetArg> for ResetTarget {
    fn from(arg: ResetArg) -> Self {
        match arg {
            ResetArg::Favorites => ResetTarget::Favorites,
            ResetArg::Deleted => ResetTarget::Deleted,
            ResetArg::Comments => ResetTarget::Comments,
            ResetArg::Filters => ResetTarget::Filters,
            ResetArg::All => ResetTarget::All,
        }
    }
}
