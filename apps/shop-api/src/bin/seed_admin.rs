//! Seed Admin
//!
//! Creates the first administrator account. If the email is already
//! registered the existing account is reported and left unchanged.

use axum_helpers::{JwtAuth, JwtConfig};
use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::mongodb::{connect_from_config_with_retry, MongoConfig};
use domain_users::{MongoUserRepository, SeedOutcome, UserService};
use eyre::Result;
use tracing::info;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Parser)]
#[command(name = "seed-admin")]
#[command(about = "Create the shop administrator account")]
struct Cli {
    /// Display name of the administrator
    #[arg(long, env = "ADMIN_NAME", default_value = "Admin")]
    name: String,

    /// Login email of the administrator
    #[arg(long, env = "ADMIN_EMAIL")]
    email: String,

    /// Initial password (at least 6 characters)
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    if cli.password.chars().count() < MIN_PASSWORD_LEN {
        eyre::bail!(
            "Admin password must have {} or more characters",
            MIN_PASSWORD_LEN
        );
    }

    let mongo_config = MongoConfig::from_env()?;
    let client = connect_from_config_with_retry(&mongo_config, None).await?;
    let db = client.database(mongo_config.database());

    let repository = MongoUserRepository::new(&db);
    repository.init_indexes().await?;

    let service = UserService::new(repository, JwtAuth::new(&JwtConfig::from_env()?));

    match service
        .ensure_admin(&cli.name, &cli.email, &cli.password)
        .await?
    {
        SeedOutcome::Created(user) => {
            info!(user_id = %user.id, email = %user.email, "Administrator created");
        }
        SeedOutcome::AlreadyExists(user) => {
            info!(
                user_id = %user.id,
                email = %user.email,
                role = %user.role.as_str(),
                "Email already registered, nothing to do"
            );
        }
    }

    client.shutdown().await;
    Ok(())
}
