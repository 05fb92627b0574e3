use clap::Subcommand;

/// Finance commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FinanceCommands {
    /// Record a transaction.
    Create {
        #[arg(long = "no")]
        number: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value_t = 0)]
        income: i64,
        #[arg(long, default_value_t = 0)]
        expense: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        project: Option<String>,
    },
    /// Update a transaction.
    Update {
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        income: Option<i64>,
        #[arg(long)]
        expense: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions.
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a transaction by ID.
    Get { id: String },
    /// Delete a transaction.
    Delete { id: String },
    /// Totals and per-category split.
    Summary {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}
