use clap::Subcommand;

/// Notification commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NotificationCommands {
    /// List your notifications.
    List {
        #[arg(long)]
        unread: bool,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Mark one notification as read.
    Read { id: String },
    /// Mark all your notifications as read.
    ReadAll,
    /// Send a notification to a user.
    Send {
        #[arg(long = "to")]
        user_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        link: Option<String>,
        /// info, approval, reminder, system
        #[arg(long)]
        kind: Option<String>,
    },
}
