use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Personal contact book")]
pub struct Cli {
    /// Storage choice (mem, file) are available
    #[arg(long, global = true, env = "STORAGE_CHOICE", default_value_t = String::from("file"))]
    pub storage_choice: String,

    /// Storage file used with the `file` storage choice
    #[arg(long, global = true, env = "STORAGE_PATH")]
    pub storage_path: Option<String>,

    /// Name of the slot holding the contact list
    #[arg(long, global = true, env = "STORAGE_KEY")]
    pub storage_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact phone number: 01 followed by 9 digits
        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Contact group (family, work, friends)
        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Mark as favorite
        #[arg(long)]
        favorite: bool,

        /// Mark as emergency contact
        #[arg(long)]
        emergency: bool,

        /// Image file to use as the contact photo
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// List contacts
    List {
        /// List only favorites
        #[arg(long)]
        favorites: bool,

        /// List only emergency contacts
        #[arg(long)]
        emergency: bool,

        /// List only one group
        #[arg(long)]
        group: Option<String>,

        /// Sort ordering (default is the order contacts were added)
        #[arg(long)]
        sort: Option<SortKey>,

        /// Reverse order
        #[arg(short, long)]
        reverse: bool,
    },
    /// Edit an existing contact.
    /// Fields that are not given keep their current value
    Edit {
        /// Id of the contact to edit
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// New email, an empty value removes it
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        favorite: Option<bool>,

        #[arg(long)]
        emergency: Option<bool>,

        /// Replace the photo with this image file
        #[arg(long, conflicts_with = "clear_photo")]
        photo: Option<PathBuf>,

        /// Remove the photo
        #[arg(long)]
        clear_photo: bool,
    },
    /// Delete a contact by id
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Add or remove a contact from favorites
    Favorite {
        #[arg(long)]
        id: i64,
    },
    /// Add or remove a contact from emergency contacts
    Emergency {
        #[arg(long)]
        id: i64,
    },
    /// Search name, phone and email, ignoring case
    Search {
        query: String,
    },
    /// Show total, favorite and emergency counts
    Stats,

    /// Import contacts from .csv file
    Import {
        /// File path to the source .csv file
        #[arg(short, long)]
        src: Option<PathBuf>,
    },

    /// Export contacts to a .csv file
    Export {
        /// File path to the destination location for export file
        #[arg(short, long)]
        des: Option<PathBuf>,
    },
}

/// Supported sort keys
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortKey {
    Name,
    Phone,
}
