//! Storefront Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use storefront::users::{Role, User, UserUuid};
use storefront_app::{
    auth::{Argon2PasswordHasher, PasswordHasher},
    database, seed,
    store::{PgStore, Store},
};

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Insert development users and products when absent
    Seed,
    User(UserCommand),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Login email address
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Plaintext password; hashed before storage
    #[arg(long)]
    password: String,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let database_url = cli
        .database_url
        .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match cli.command {
        Commands::Migrate => {
            database::migrate(&pool)
                .await
                .map_err(|error| format!("failed to run migrations: {error}"))?;

            println!("migrations applied");

            Ok(())
        }
        Commands::Seed => {
            let report = seed::seed(&PgStore::new(pool), &Argon2PasswordHasher::new())
                .await
                .map_err(|error| format!("failed to seed database: {error}"))?;

            println!("users created: {}", report.users);
            println!("products created: {}", report.products);

            Ok(())
        }
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(PgStore::new(pool), args).await,
    }
}

async fn create_user(store: PgStore, args: CreateUserArgs) -> Result<(), String> {
    if args.password.is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let hashed_password = Argon2PasswordHasher::new()
        .hash(&args.password)
        .map_err(|error| format!("failed to hash password: {error}"))?;

    let uow = store
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let user = uow
        .users()
        .save(&User {
            id: UserUuid::new(),
            email: args.email,
            name: args.name,
            hashed_password,
            role: if args.admin { Role::Admin } else { Role::Customer },
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    uow.commit()
        .await
        .map_err(|error| format!("failed to commit: {error}"))?;

    println!("user_id: {}", user.id);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
