//! Clap derive structures for the `aurora` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// aurora -- book Aurora Voyages trips from the command line
#[derive(Debug, Parser)]
#[command(
    name = "aurora",
    version,
    about = "Quote, book and pay for Aurora Voyages trips from the command line",
    long_about = "A CLI for the Aurora Voyages booking service.\n\n\
        Quotes prices offline, looks up packages, destinations and bookings,\n\
        and runs the four-step checkout (details, travelers, payment, confirmation).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "AURORA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Booking service URL (overrides profile)
    #[arg(long, short = 'u', env = "AURORA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session token sent as x-auth-token
    #[arg(long, env = "AURORA_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AURORA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds, at least 1 (default: profile, else 15)
    #[arg(
        long,
        env = "AURORA_TIMEOUT",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a trip offline
    Quote(QuoteArgs),

    /// Look up vacation packages
    #[command(alias = "pkg")]
    Packages(PackagesArgs),

    /// Look up destinations
    #[command(alias = "dest")]
    Destinations(DestinationsArgs),

    /// Look up bookings
    #[command(alias = "bk")]
    Bookings(BookingsArgs),

    /// Submit the one-shot booking form (no payment)
    Book(BookArgs),

    /// Run the interactive checkout wizard
    #[command(alias = "co")]
    Checkout(CheckoutArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetKind {
    /// A vacation package (flat per-person price)
    Package,
    /// A destination (priced per trip length)
    Destination,
}

/// Trip dates and party size.
#[derive(Debug, Args)]
pub struct TripArgs {
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, short = 's')]
    pub start: Option<String>,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long, short = 'e')]
    pub end: Option<String>,

    /// Number of adults
    #[arg(long, short = 'a', default_value = "1")]
    pub adults: u32,

    /// Number of children
    #[arg(long, short = 'c', default_value = "0")]
    pub children: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QUOTE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Checkout pricing: duration tiers and child discounts
    Checkout,
    /// Booking-form pricing: flat daily rate, no child discount
    Form,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    #[command(subcommand)]
    pub command: QuoteCommand,

    /// Pricing policy to apply
    #[arg(long, default_value = "checkout", global = true)]
    pub policy: PolicyArg,
}

#[derive(Debug, Subcommand)]
pub enum QuoteCommand {
    /// Quote a destination trip
    Destination {
        #[command(flatten)]
        trip: TripArgs,
    },

    /// Quote a vacation package
    Package {
        /// Per-person package price (e.g. 800 or 799.99)
        #[arg(long)]
        price: f64,

        #[command(flatten)]
        trip: TripArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATALOG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PackagesArgs {
    #[command(subcommand)]
    pub command: PackagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum PackagesCommand {
    /// Show a vacation package
    #[command(alias = "get")]
    Show {
        /// Package ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct DestinationsArgs {
    #[command(subcommand)]
    pub command: DestinationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DestinationsCommand {
    /// Show a destination
    #[command(alias = "get")]
    Show {
        /// Destination ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// Show a booking
    #[command(alias = "get")]
    Show {
        /// Booking ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// What to book
    pub kind: TargetKind,

    /// Package or destination ID
    pub id: String,

    #[command(flatten)]
    pub trip: TripArgs,

    /// Traveler as "NAME,EMAIL[,PHONE]" (repeatable; defaults to the profile user)
    #[arg(long = "traveler", short = 't')]
    pub travelers: Vec<String>,

    /// Special requests for the booking
    #[arg(long, short = 'r')]
    pub requests: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CHECKOUT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// What to book
    pub kind: TargetKind,

    /// Package or destination ID
    pub id: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a profile value
    Set {
        /// Profile key (api_url, payment_public_key, token_env, timeout, ca_cert,
        /// user.name, user.email, user.id)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a session token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
