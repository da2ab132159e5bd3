use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for fieldtrack
/// CLI dashboard for technicians, projects, tasks and location pings
#[derive(Parser)]
#[command(
    name = "fieldtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Field operations dashboard: technicians' locations, projects, tasks and assignments",
    long_about = None
)]
pub struct Cli {
    /// Use a local SQLite database at this path (overrides the configured backend)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the reverse geocoding endpoint
    #[arg(global = true, long = "geocoder-url", value_name = "URL")]
    pub geocoder_url: Option<String>,

    /// Run in test mode (ignore and never write the config file)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Verbose logging on stderr
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Register and list technicians
    Technician {
        #[command(subcommand)]
        action: TechnicianAction,
    },

    /// Register, list and staff projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Register, list, update and staff tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage controlled zones used to name locations
    Zone {
        #[command(subcommand)]
        action: ZoneAction,
    },

    /// Record and list technicians' location pings
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },
}

/// `<ENTITY_ID> <TECHNICIAN_ID>`
#[derive(Args, Debug, Clone, Copy)]
pub struct AssignmentArgs {
    /// Project or task id
    pub id: i64,

    /// Technician id
    pub technician: i64,
}

#[derive(Subcommand)]
pub enum TechnicianAction {
    /// Add a technician
    Add { name: String },

    /// List technicians
    List,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project
    Add {
        name: String,

        #[arg(long, help = "Duration label, e.g. \"30 days\"")]
        duration: Option<String>,

        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        start: String,

        #[arg(long, help = "End date (YYYY-MM-DD)")]
        end: Option<String>,
    },

    /// List projects with their assigned technicians
    List,

    /// Assign a technician (refused when already assigned)
    Assign(AssignmentArgs),

    /// Remove a technician from a project
    Unassign(AssignmentArgs),

    /// Assign when absent, remove when present
    Toggle(AssignmentArgs),
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a project
    Add {
        name: String,

        #[arg(long, help = "Owning project id")]
        project: i64,

        #[arg(long, help = "Duration label, e.g. \"7 days\"")]
        duration: Option<String>,

        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        start: String,

        #[arg(long, help = "End date (YYYY-MM-DD)")]
        end: Option<String>,

        #[arg(long, default_value = "pending", help = "pending | complete")]
        state: String,

        #[arg(long, help = "Free-text note")]
        note: Option<String>,

        #[arg(long = "tech", value_name = "TECHNICIAN_ID", help = "Assign a technician (repeatable)")]
        technicians: Vec<i64>,
    },

    /// List tasks ordered by start date
    List {
        #[arg(long, help = "Only tasks of this project")]
        project: Option<i64>,
    },

    /// Switch a task between pending and complete
    ToggleState { id: i64 },

    /// Replace a task's note
    Note { id: i64, text: String },

    /// Assign a technician (refused when already assigned)
    Assign(AssignmentArgs),

    /// Remove a technician from a task
    Unassign(AssignmentArgs),

    /// Assign when absent, remove when present
    Toggle(AssignmentArgs),
}

#[derive(Subcommand)]
pub enum ZoneAction {
    /// Register a controlled zone in the store
    Add {
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, help = "Per-axis tolerance in degrees")]
        tolerance: f64,
    },

    /// List the zones used for matching, in match order
    List,

    /// Show the place name a coordinate resolves to
    Resolve {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[derive(Subcommand)]
pub enum LocationAction {
    /// Record a location ping
    Add {
        #[arg(long, help = "Technician id")]
        technician: i64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, help = "Timestamp (RFC 3339); defaults to now")]
        at: Option<String>,
    },

    /// List locations, newest first, with resolved place names
    List,
}
