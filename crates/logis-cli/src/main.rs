//! Logis command line client
//!
//! Property owners manage their houses and rooms; tenants browse available
//! rooms and rent them; both follow their lease contracts.
//!
//! Usage:
//! ```bash
//! # Point at an API and log in
//! logis --api-url https://rent.example.com/api login --email awa@example.com
//!
//! # Home view for the logged-in role
//! logis dashboard
//!
//! # Owner
//! logis houses add --address "12 rue des Jardins" --latitude 5.35 --longitude -3.99 \
//!   --description "Maison familiale avec cour"
//! logis rooms list --house 3
//!
//! # Tenant
//! logis catalogue
//! logis rent 8 --start 2025-01-01 --end 2025-06-30 --payment-mode virement \
//!   --periodicity mensuel --deposit 90000
//!
//! # Machine readable output
//! logis --json contracts list
//! ```

mod config;
mod views;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use config::CliConfig;
use logis_client::{ApiClient, ApiError};
use logis_core::models::{ContractId, HouseId, ProfileUpdate, RoomId};
use logis_storage::FileTokenStore;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use views::{
    Context, Denied, catalogue, contracts, dashboard, houses, profile, rooms,
    session::{self, RegisterInput},
};

/// Logis - rental housing client
#[derive(Parser)]
#[command(name = "logis")]
#[command(about = "Manage houses, rooms and lease contracts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "LOGIS_CONFIG", global = true)]
    config: Option<String>,

    /// API root, e.g. https://rent.example.com/api
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// File holding the session tokens
    #[arg(long, value_name = "FILE", global = true)]
    session_file: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,

        /// Read from the terminal when omitted
        #[arg(long, env = "LOGIS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Create an account
    Register(RegisterArgs),
    /// Show the stored session
    Whoami,
    /// Open the home view of your role
    Dashboard,
    /// Manage your houses (owners)
    #[command(subcommand)]
    Houses(HouseCommands),
    /// Manage the rooms of your houses (owners)
    #[command(subcommand)]
    Rooms(RoomCommands),
    /// Browse houses with available rooms (tenants)
    Catalogue,
    /// Rent a room (tenants)
    Rent {
        room: RoomId,

        #[command(flatten)]
        form: RentArgs,
    },
    /// Follow your lease contracts
    #[command(subcommand)]
    Contracts(ContractCommands),
    /// Show or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    telephone: Option<String>,
    /// National ID card number
    #[arg(long)]
    cni: Option<String>,
    /// proprietaire or locataire
    #[arg(long)]
    role: Option<String>,
    #[arg(long, env = "LOGIS_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum HouseCommands {
    /// List your houses
    List,
    /// Show a house with its rooms
    Show { id: HouseId },
    /// Add a house
    Add(HouseArgs),
    /// Change a house; fields not given keep their value
    Edit {
        id: HouseId,
        #[command(flatten)]
        fields: HouseArgs,
    },
    /// Delete a house
    Delete {
        id: HouseId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct HouseArgs {
    #[arg(long)]
    address: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl From<HouseArgs> for houses::HouseInput {
    fn from(args: HouseArgs) -> Self {
        Self {
            address: args.address,
            latitude: args.latitude,
            longitude: args.longitude,
            description: args.description,
        }
    }
}

#[derive(Subcommand)]
enum RoomCommands {
    /// List the rooms of a house
    List {
        #[arg(long)]
        house: HouseId,
    },
    /// Show a room
    Show { id: RoomId },
    /// Add a room to a house
    Add {
        #[arg(long)]
        house: HouseId,
        #[command(flatten)]
        fields: RoomArgs,
    },
    /// Change a room; fields not given keep their value
    Edit {
        id: RoomId,
        #[command(flatten)]
        fields: RoomArgs,
    },
    /// Delete a room
    Delete {
        id: RoomId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct RoomArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Surface, e.g. "12" or "12 m2"
    #[arg(long)]
    size: Option<String>,
    /// simple, appartement or maison
    #[arg(long = "type", value_name = "TYPE")]
    kind: Option<String>,
    #[arg(long)]
    furnished: Option<bool>,
    #[arg(long)]
    bathroom: Option<bool>,
    /// Price in FCFA
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    available: Option<bool>,
}

impl From<RoomArgs> for rooms::RoomInput {
    fn from(args: RoomArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            size: args.size,
            kind: args.kind,
            furnished: args.furnished,
            has_bathroom: args.bathroom,
            price: args.price,
            available: args.available,
        }
    }
}

#[derive(Args)]
struct RentArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    start: Option<String>,
    /// Last day, YYYY-MM-DD
    #[arg(long)]
    end: Option<String>,
    /// cash, virement or "mobile money"
    #[arg(long)]
    payment_mode: Option<String>,
    /// journalier, hebdomadaire or mensuel
    #[arg(long)]
    periodicity: Option<String>,
    /// Deposit in FCFA
    #[arg(long)]
    deposit: Option<String>,
}

#[derive(Subcommand)]
enum ContractCommands {
    /// List your contracts
    List,
    /// Cancel a contract in progress
    Cancel {
        id: ContractId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Change dates or payment terms
    Update {
        id: ContractId,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        payment_mode: Option<String>,
        #[arg(long)]
        periodicity: Option<String>,
        #[arg(long)]
        deposit: Option<f64>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show your profile
    Show,
    /// Change profile fields
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        telephone: Option<String>,
        #[arg(long)]
        cni: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if needs_login(&err) {
                eprintln!("Run `logis login` to start a new session.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_file(shellexpand::tilde(path).to_string())?,
        None => CliConfig::default(),
    };

    // Merge environment variables (they override config file)
    config.merge_env();

    // Apply CLI flags (highest precedence)
    config.apply_flags(cli.api_url, cli.session_file);

    init_logging(&config.logging.level)?;

    let session_path = config.session_path()?;
    debug!("Session file: {}", session_path.display());
    let store = Arc::new(FileTokenStore::open(&session_path)?);
    let api = ApiClient::new(config.api_config(), store)?;
    let ctx = Context::new(api, cli.json);

    dispatch(&ctx, cli.command).await
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => session::login(ctx, email, password).await,
        Commands::Logout => session::logout(ctx),
        Commands::Register(args) => {
            let input = RegisterInput {
                email: args.email,
                username: args.username,
                first_name: args.first_name,
                last_name: args.last_name,
                telephone: args.telephone,
                cni: args.cni,
                role: args.role,
                password: args.password,
            };
            session::register(ctx, input).await
        }
        Commands::Whoami => session::whoami(ctx),
        Commands::Dashboard => dashboard::show(ctx).await,
        Commands::Houses(command) => match command {
            HouseCommands::List => houses::list(ctx).await,
            HouseCommands::Show { id } => houses::show(ctx, id).await,
            HouseCommands::Add(fields) => houses::add(ctx, fields.into()).await,
            HouseCommands::Edit { id, fields } => houses::edit(ctx, id, fields.into()).await,
            HouseCommands::Delete { id, yes } => houses::delete(ctx, id, yes).await,
        },
        Commands::Rooms(command) => match command {
            RoomCommands::List { house } => rooms::list(ctx, house).await,
            RoomCommands::Show { id } => rooms::show(ctx, id).await,
            RoomCommands::Add { house, fields } => rooms::add(ctx, house, fields.into()).await,
            RoomCommands::Edit { id, fields } => rooms::edit(ctx, id, fields.into()).await,
            RoomCommands::Delete { id, yes } => rooms::delete(ctx, id, yes).await,
        },
        Commands::Catalogue => catalogue::show(ctx).await,
        Commands::Rent { room, form } => {
            let input = catalogue::RentInput {
                start_date: form.start,
                end_date: form.end,
                payment_mode: form.payment_mode,
                periodicity: form.periodicity,
                deposit: form.deposit,
            };
            catalogue::rent(ctx, room, input).await
        }
        Commands::Contracts(command) => match command {
            ContractCommands::List => contracts::list(ctx).await,
            ContractCommands::Cancel { id, yes } => contracts::cancel(ctx, id, yes).await,
            ContractCommands::Update {
                id,
                start,
                end,
                payment_mode,
                periodicity,
                deposit,
            } => {
                let input = contracts::ContractInput {
                    start_date: start,
                    end_date: end,
                    payment_mode,
                    periodicity,
                    deposit,
                };
                contracts::update(ctx, id, input).await
            }
        },
        Commands::Profile(command) => match command {
            ProfileCommands::Show => profile::show(ctx).await,
            ProfileCommands::Update {
                username,
                first_name,
                last_name,
                telephone,
                cni,
            } => {
                let update = ProfileUpdate {
                    username,
                    first_name,
                    last_name,
                    telephone,
                    cni,
                };
                profile::update(ctx, update).await
            }
        },
    }
}

/// Install the tracing subscriber; logs go to stderr so stdout stays parseable
fn init_logging(level: &str) -> Result<()> {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::new(format!("{}", log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn needs_login(err: &anyhow::Error) -> bool {
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        return api_err.requires_login();
    }
    err.downcast_ref::<Denied>()
        .is_some_and(Denied::requires_login)
}
