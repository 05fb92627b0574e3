use clap::Subcommand;

/// Service catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ServiceCommands {
    /// Add a catalog entry.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        tier: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        /// Cost of goods sold.
        #[arg(long)]
        hpp: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "feature")]
        features: Vec<String>,
    },
    /// Update a catalog entry.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tier: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        hpp: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        /// Replaces the whole feature list.
        #[arg(long = "feature")]
        features: Vec<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// List the catalog.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a catalog entry by ID.
    Get { id: String },
    /// Delete a catalog entry.
    Delete { id: String },
}
