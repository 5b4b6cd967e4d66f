use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rcheckin
/// CLI application to run event check-ins with SQLite
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event check-in CLI: projects, member rosters, photo + location evidence and attendance exports",
    long_about = None
)]
pub struct Cli {
    /// Override the storage root (useful for tests or a custom location)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the main database
    Init,

    /// Inspect the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Create, list and delete projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage the roster of a project
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Check a member in with a photo and a location
    Checkin {
        /// Project id
        project: i64,

        /// Member name (must be on the roster)
        member: String,

        #[arg(long = "photo", help = "Photo taken at check-in time")]
        photo: String,

        #[arg(long = "lat", requires = "lon", allow_negative_numbers = true, help = "Latitude")]
        lat: Option<f64>,

        #[arg(long = "lon", requires = "lat", allow_negative_numbers = true, help = "Longitude")]
        lon: Option<f64>,

        #[arg(long = "location", help = "Location text (skips address lookup)")]
        location: Option<String>,

        #[arg(long = "at", help = "Check-in time (YYYY-MM-DD HH:MM[:SS]); default now")]
        at: Option<String>,
    },

    /// Browse and correct check-in records
    Records {
        #[command(subcommand)]
        action: RecordsAction,
    },

    /// Export attendance of a project
    Export {
        /// Project id
        project: i64,

        #[arg(long = "password", help = "Project password")]
        password: String,

        #[arg(long = "file", help = "Destination file")]
        file: String,

        #[arg(
            long = "range",
            help = "Period: YYYY, YYYY-MM, YYYY-MM-DD or start:end; default current month"
        )]
        range: Option<String>,

        #[arg(long = "format", value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long = "force", help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "project", help = "Print the log of a project database instead")]
        project: Option<i64>,
    },

    /// Maintain the databases
    Db {
        #[arg(long = "check", help = "Check integrity of every database")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize every database using VACUUM")]
        vacuum: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Add {
        #[arg(long = "name")]
        name: String,

        #[arg(long = "password")]
        password: String,
    },

    /// List active projects, newest first
    List,

    /// Delete a project with all its members, check-ins and photos
    Del {
        id: i64,

        #[arg(long = "password")]
        password: String,
    },

    /// Change the password of a project
    Passwd {
        id: i64,

        #[arg(long = "old")]
        old: String,

        #[arg(long = "new")]
        new: String,
    },
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a name to the roster
    Add {
        project: i64,
        name: String,

        #[arg(long = "password")]
        password: String,
    },

    /// Remove a name from the roster
    Del {
        project: i64,
        name: String,

        #[arg(long = "password")]
        password: String,
    },

    /// Show the roster
    List { project: i64 },
}

#[derive(Subcommand)]
pub enum RecordsAction {
    /// List check-ins, newest first
    List {
        project: i64,

        #[arg(long = "member")]
        member: Option<String>,
    },

    /// Show one check-in
    Show { project: i64, id: i64 },

    /// Change time and/or location of a check-in
    Edit {
        project: i64,
        id: i64,

        #[arg(long = "password")]
        password: String,

        #[arg(long = "at", help = "New time (YYYY-MM-DD HH:MM[:SS])")]
        at: Option<String>,

        #[arg(long = "location", help = "New location text")]
        location: Option<String>,
    },

    /// Delete a check-in
    Del {
        project: i64,
        id: i64,

        #[arg(long = "password")]
        password: String,
    },
}
