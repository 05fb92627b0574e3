use clap::Subcommand;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task in draft.
    Create {
        /// Project row ID.
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        brief: Option<String>,
        #[arg(long)]
        pillar: Option<String>,
        #[arg(long)]
        medium: Option<String>,
        #[arg(long)]
        pl: Option<String>,
        #[arg(long)]
        copywriter: Option<String>,
        #[arg(long)]
        editor: Option<String>,
        #[arg(long)]
        videographer: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Update a task. Changing --approval requires admin or above.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        caption: Option<String>,
        #[arg(long)]
        script: Option<String>,
        #[arg(long)]
        medium: Option<String>,
        #[arg(long)]
        asset: Option<String>,
        #[arg(long)]
        editor: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        done: Option<String>,
        /// Production status.
        #[arg(long)]
        status: Option<String>,
        /// Approval status (record correction).
        #[arg(long)]
        approval: Option<String>,
    },
    /// List tasks with their project names.
    List {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        approval: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a task by ID.
    Get { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Move a task one approval step forward.
    Advance { id: String },
}
