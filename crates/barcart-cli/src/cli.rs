//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

/// Browse cocktails and manage favourites on a barcart server.
#[derive(Parser, Debug)]
#[command(name = "barcart")]
#[command(author, version, about)]
pub struct Args {
    /// Server base URL (overrides the config file)
    #[arg(long, env = "BARCART_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the most liked drinks with their details
    MostLiked,

    /// List every cocktail on the server
    Cocktails,

    /// Create an account
    Register {
        username: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Show the signed-in user's profile
    Profile,

    /// Add a drink to favourites
    AddFave { id: String },

    /// Remove a drink from favourites
    RemoveFave { id: String },

    /// Store a bearer token for later requests
    Login { token: String },

    /// Forget the stored token
    Logout,

    /// Show server and sign-in status
    Status,
}
