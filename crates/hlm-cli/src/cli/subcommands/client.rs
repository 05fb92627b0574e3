use clap::Subcommand;

/// Client commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClientCommands {
    /// Create a client.
    Create {
        /// Business code, e.g. CLT-001.
        #[arg(long)]
        code: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        pic: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        package: Option<String>,
        /// Contract value in rupiah.
        #[arg(long)]
        value: Option<i64>,
        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update a client.
    Update {
        id: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        pic: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        package: Option<String>,
        #[arg(long)]
        value: Option<i64>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List clients.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a client by ID.
    Get { id: String },
    /// Delete a client.
    Delete { id: String },
}
