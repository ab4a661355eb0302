use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pathmark", bin_name = "pathmark", version)]
#[command(about = "Organize paths and bookmarks in a tree of named groups", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $PATHMARK_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the node tree
    #[command(alias = "ls")]
    Tree,

    /// Create, rename, remove and arrange nodes
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },

    /// Add, edit, remove and arrange items
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// Find items whose name, path or comment contains the term
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Check the document and repair what is broken
    Doctor {
        /// Only report, change nothing
        #[arg(long)]
        check: bool,
    },

    /// Create the starter categories in an empty store
    Init,

    /// Show or set configuration values
    Config {
        /// Config key (data-file, indent, auto-repair)
        key: Option<String>,
        /// New value; omit to show the current one
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NodeCommands {
    /// Create a node
    Add {
        name: String,
        /// Parent node (path like `General/Files`, or an id)
        #[arg(short, long, default_value = "/")]
        parent: String,
    },

    /// Rename a node
    Rename { node: String, name: String },

    /// Remove a node with everything below it
    #[command(alias = "rm")]
    Remove { node: String },

    /// Move a node among its siblings (negative counts from the end)
    Order {
        node: String,
        #[arg(allow_negative_numbers = true)]
        index: isize,
    },

    /// Move a node under another parent
    #[command(alias = "mv")]
    Move {
        node: String,
        parent: String,
        /// Position among the new siblings (default: last)
        #[arg(long, allow_negative_numbers = true)]
        index: Option<isize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Add an item to a node
    Add {
        node: String,
        name: String,
        #[arg(short, long)]
        path: Option<String>,
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Add one item per path, named after the file or folder
    Drop {
        node: String,
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },

    /// List the items of a node
    #[command(alias = "ls")]
    List {
        #[arg(default_value = "/")]
        node: String,
    },

    /// Show one item (`Node/Path#n` or an id)
    Show { item: String },

    /// Set fields: name=..., path=..., comment=... (empty value clears)
    Set {
        item: String,
        #[arg(required = true, num_args = 1..)]
        fields: Vec<String>,
    },

    /// Remove an item
    #[command(alias = "rm")]
    Remove { item: String },

    /// Move an item within its node (negative counts from the end)
    Order {
        item: String,
        #[arg(allow_negative_numbers = true)]
        index: isize,
    },

    /// Move an item to another node
    #[command(alias = "mv")]
    Move {
        item: String,
        node: String,
        /// Position in the target node (default: last)
        #[arg(long, allow_negative_numbers = true)]
        index: Option<isize>,
    },
}
