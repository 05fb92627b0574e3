use clap::Subcommand;

/// Attendance commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AttendanceCommands {
    /// Check in for today. Repeating it returns the existing record.
    CheckIn {
        /// present, wfh, sick, leave, excused, absent
        #[arg(long, default_value = "present")]
        status: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Check out for today.
    CheckOut,
    /// Everyone's attendance today.
    Today,
    /// Recent attendance.
    List {
        /// Only this user.
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}
