//! Create a staff superuser account directly in the database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use recipe_backend::domain::ports::UserAccounts;
use recipe_backend::domain::{EmailAddress, Password, Registration, UserAccountService, UserName};
use recipe_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use tokio::runtime::Builder;

const DATABASE_URL_ENV: &str = "RECIPES_DATABASE_URL";

/// `create-superuser` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-superuser",
    about = "Create an active staff account with superuser rights",
    version
)]
struct CliArgs {
    /// Login email; the domain part is lower-cased.
    #[arg(long, value_name = "address")]
    email: String,
    /// Initial password.
    #[arg(long, value_name = "secret")]
    password: String,
    /// Display name.
    #[arg(long, value_name = "name", default_value = "")]
    name: String,
    /// Database connection URL. Falls back to `RECIPES_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let registration = registration_from_args(&args)?;
    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let accounts = UserAccountService::new(Arc::new(DieselUserRepository::new(pool)));
    let user = accounts
        .create_superuser(registration)
        .await
        .map_err(|error| io::Error::other(format!("create superuser failed: {error}")))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "id={}", user.id())?;
    writeln!(stdout, "email={}", user.email())?;
    Ok(())
}

fn invalid_input(error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error.to_string())
}

fn registration_from_args(args: &CliArgs) -> io::Result<Registration> {
    Ok(Registration {
        email: EmailAddress::new(&args.email).map_err(invalid_input)?,
        name: UserName::new(&args.name).map_err(invalid_input)?,
        password: Password::new(&args.password).map_err(invalid_input)?,
    })
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(invalid_input(
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var(DATABASE_URL_ENV).map_err(|_| {
        invalid_input(format!(
            "database URL missing: set --database-url or {DATABASE_URL_ENV}"
        ))
    })?;
    if from_env.trim().is_empty() {
        return Err(invalid_input(format!("{DATABASE_URL_ENV} must not be empty")));
    }
    Ok(from_env)
}
