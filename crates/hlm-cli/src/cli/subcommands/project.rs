use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        /// Business code, e.g. PRJ-001.
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        /// Client row ID.
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        service_type: Option<String>,
        #[arg(long)]
        package: Option<String>,
        #[arg(long)]
        lead: Option<String>,
        #[arg(long)]
        editor: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update a project.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        lead: Option<String>,
        #[arg(long)]
        editor: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// 0 to 100.
        #[arg(long)]
        progress: Option<i64>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List projects.
    List {
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a project by ID.
    Get { id: String },
    /// Delete a project.
    Delete { id: String },
}
