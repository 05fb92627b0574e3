use clap::Subcommand;

/// Team commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TeamCommands {
    /// List members with their roles.
    List,
    /// Get a member by user ID.
    Get { user_id: String },
    /// Update a member's profile.
    Update {
        user_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        employee_id: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        join_date: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Change a member's role.
    SetRole { user_id: String, role: String },
}
