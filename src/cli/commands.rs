//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "formsite")]
#[command(about = "Page metadata and form definitions for a form-builder website", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Site name, used as the home page title
        #[arg(short, long, default_value = "Formly")]
        name: String,

        /// Public base URL of the site
        #[arg(short, long, default_value = "https://example.com")]
        base_url: String,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// List configured pages
    Pages,

    /// Print the document head with a page's metadata applied
    Head {
        /// Page slug (e.g., home, pricing)
        slug: String,

        /// Verify the head is restored exactly after deactivation
        #[arg(long)]
        check: bool,
    },

    /// Validate and list all forms
    Forms,

    /// Show a single form
    Form {
        /// Form id
        id: String,
    },
}
