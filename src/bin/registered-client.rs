//! Registered OAuth Client CLI Tool
//!
//! Builds and validates OAuth 2.0 client registrations from the command line.
//! Registrations are printed as JSON so they can be handed to whatever
//! persistence layer the authorization server uses.
//!
//! ## Usage Examples
//!
//! ### Register a new client
//! ```bash
//! registered-client register \
//!   --client-id "web-app" \
//!   --generate-secret \
//!   --grant-type authorization_code \
//!   --grant-type refresh_token \
//!   --redirect-uri "https://app.example.com/callback" \
//!   --scope read --scope write
//! ```
//!
//! ### Derive a registration from an existing one
//! ```bash
//! registered-client register --from client.json --client-id "web-app" --scope admin
//! ```
//!
//! ### Validate a stored registration
//! ```bash
//! registered-client validate client.json
//! ```
//!
//! ## Environment Variables
//!
//! Settings defaults come from `CLIENT_DEFAULT_REQUIRE_PROOF_KEY`,
//! `CLIENT_DEFAULT_REQUIRE_USER_CONSENT`, `CLIENT_DEFAULT_ACCESS_TOKEN_TTL`,
//! `CLIENT_DEFAULT_REFRESH_TOKEN_TTL` and `CLIENT_DEFAULT_REUSE_REFRESH_TOKENS`.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error (I/O, JSON, configuration)
//! - 2: Invalid client registration

use clap::{Args, Parser, Subcommand, ValueEnum};
use registered_client::{
    config::Config,
    errors::ClientRegistrationError,
    oauth::{
        AuthorizationGrantType, ClientAuthenticationMethod, ClientSettings, RegisteredClient,
        generate_registration_id, generate_token,
    },
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::prelude::*;

/// Main CLI application structure
#[derive(Parser)]
#[command(
    name = "registered-client",
    about = "Build and validate OAuth 2.0 client registrations",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "json-pretty",
        help = "Output format for registrations"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Build a new client registration
    Register(RegisterArgs),
    /// Validate a stored client registration
    Validate(ValidateArgs),
}

/// Arguments for client registration
#[derive(Args)]
struct RegisterArgs {
    /// Existing registration to start from
    #[arg(long, help = "Seed the registration from a JSON registration file")]
    from: Option<PathBuf>,

    /// Registration identifier
    #[arg(long, help = "Registration identifier (generated when omitted)")]
    id: Option<String>,

    /// OAuth client identifier
    #[arg(long, help = "OAuth client identifier")]
    client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, conflicts_with = "generate_secret", help = "OAuth client secret")]
    client_secret: Option<String>,

    /// Generate a random client secret
    #[arg(long, help = "Generate a random client secret")]
    generate_secret: bool,

    /// Client authentication methods (can be specified multiple times)
    #[arg(
        long = "auth-method",
        help = "Client authentication method: basic, post or none (can be specified multiple times)"
    )]
    auth_methods: Vec<ClientAuthenticationMethod>,

    /// Authorization grant types (can be specified multiple times)
    #[arg(
        long = "grant-type",
        help = "Authorization grant type, e.g. authorization_code (can be specified multiple times)"
    )]
    grant_types: Vec<AuthorizationGrantType>,

    /// Redirect URIs (can be specified multiple times)
    #[arg(
        long = "redirect-uri",
        help = "Redirect URI (can be specified multiple times)"
    )]
    redirect_uris: Vec<String>,

    /// Scopes (can be specified multiple times)
    #[arg(long = "scope", help = "Scope (can be specified multiple times)")]
    scopes: Vec<String>,

    /// Require PKCE
    #[arg(long, help = "Require PKCE for the authorization code grant")]
    require_proof_key: bool,

    /// Require user consent
    #[arg(long, help = "Require user consent for authorization requests")]
    require_user_consent: bool,
}

/// Arguments for registration validation
#[derive(Args)]
struct ValidateArgs {
    /// Registration file
    #[arg(help = "Path to a JSON registration file")]
    file: PathBuf,
}

/// Application errors
#[derive(Debug)]
enum AppError {
    /// File system errors
    Io(std::io::Error),
    /// JSON parsing or serialization errors
    Json(serde_json::Error),
    /// Invalid client registration
    Registration(ClientRegistrationError),
    /// General application errors
    General(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<ClientRegistrationError> for AppError {
    fn from(err: ClientRegistrationError) -> Self {
        AppError::Registration(err)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Json(err) => write!(f, "JSON error: {}", err),
            AppError::Registration(err) => write!(f, "Invalid client registration: {}", err),
            AppError::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Registration(_) => 2,
            _ => 1,
        }
    }
}

/// Main application entry point
fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "registered_client=debug,info"
    } else {
        "registered_client=info,warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Register(args) => register_client(&cli, args),
        Commands::Validate(args) => validate_client(args),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(err.exit_code());
    }
}

/// Build a client registration and print it
fn register_client(cli: &Cli, args: &RegisterArgs) -> Result<(), AppError> {
    let config = Config::new().map_err(|e| AppError::General(e.to_string()))?;
    tracing::debug!(version = %config.version, "loaded configuration");

    let (mut builder, mut client_settings) = match &args.from {
        Some(path) => {
            let existing = load_client(path)?;
            tracing::info!(id = %existing.id(), "seeding registration from existing client");
            let client_settings =
                ClientSettings::from_settings(existing.client_settings().settings());
            (existing.to_builder(), client_settings)
        }
        None => {
            let id = args.id.clone().unwrap_or_else(generate_registration_id);
            let token_settings = config
                .token_settings()
                .map_err(|e| AppError::General(e.to_string()))?;
            let builder = RegisteredClient::with_id(id)?.token_settings(token_settings);
            (builder, config.client_settings())
        }
    };

    if let (Some(id), Some(_)) = (&args.id, &args.from) {
        builder = builder.id(id.clone());
    }
    if let Some(client_id) = &args.client_id {
        builder = builder.client_id(client_id.clone());
    }
    if let Some(client_secret) = &args.client_secret {
        builder = builder.client_secret(client_secret.clone());
    } else if args.generate_secret {
        builder = builder.client_secret(generate_token());
    }
    if args.require_proof_key {
        client_settings = client_settings.with_require_proof_key(true);
    }
    if args.require_user_consent {
        client_settings = client_settings.with_require_user_consent(true);
    }

    let builder = builder
        .client_authentication_methods(|methods| {
            methods.extend(args.auth_methods.iter().copied());
        })
        .authorization_grant_types(|grant_types| {
            grant_types.extend(args.grant_types.iter().copied());
        })
        .redirect_uris(|redirect_uris| {
            redirect_uris.extend(args.redirect_uris.iter().cloned());
        })
        .scopes(|scopes| scopes.extend(args.scopes.iter().cloned()))
        .client_settings(client_settings);

    let registered_client = builder.build()?;
    tracing::info!(
        id = %registered_client.id(),
        client_id = %registered_client.client_id(),
        "client registration built"
    );

    let output = match cli.format {
        OutputFormat::Json => serde_json::to_string(&registered_client)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&registered_client)?,
    };
    println!("{}", output);

    Ok(())
}

/// Load a stored registration and print its summary
fn validate_client(args: &ValidateArgs) -> Result<(), AppError> {
    let registered_client = load_client(&args.file)?;
    println!("{}", registered_client);
    Ok(())
}

/// Read a JSON registration; deserialization re-runs registration validation
fn load_client(path: &Path) -> Result<RegisteredClient, AppError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|err| {
        if err.is_data() {
            AppError::Registration(ClientRegistrationError::InvalidArgument {
                argument: "registeredClient",
                reason: err.to_string(),
            })
        } else {
            AppError::Json(err)
        }
    })
}
