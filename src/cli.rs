use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imagevault")]
#[command(author, version, about = "Image storage service with a blob store and a metadata store")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize an image file and store it, printing its new id
    Upload {
        /// Image file to upload
        #[arg(required = true)]
        file: PathBuf,

        /// Original filename to record (defaults to the file's name)
        #[arg(long)]
        name: Option<String>,

        /// Declared content type (guessed from the extension if omitted)
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Retrieve a stored image by id
    Get {
        /// Id printed by a previous upload
        #[arg(required = true)]
        id: String,

        /// Write the payload to this file instead of the recorded name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a stored image by id
    Delete {
        /// Id printed by a previous upload
        #[arg(required = true)]
        id: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
