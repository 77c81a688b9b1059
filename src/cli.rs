//! Command line interface for the `mbkm` binary.
//!
//! ```bash
//! mbkm                      # same as `mbkm serve`
//! mbkm migrate
//! mbkm create-admin -u admin -e admin@kampus.ac.id
//! ```

use clap::{Parser, Subcommand};
use sqlx::PgPool;
use sqlx::migrate::MigrateError;
use tracing::instrument;
use validator::Validate;

use mbkm_core::{AppError, UserRole};

use crate::modules::users::{CreateUserDto, User, UserService};

#[derive(Debug, Parser)]
#[command(name = "mbkm")]
#[command(about = "MBKM API - academic program management server and admin tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations
    Migrate,
    /// Create an administrator account
    CreateAdmin {
        /// Username (3 to 50 characters)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,
    },
}

impl Cli {
    pub fn command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

pub async fn run_migrations(db: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(db).await
}

#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Inserts an active admin user, applying the same validation rules as
/// public registration.
#[instrument(skip(db, account), fields(email = %account.email))]
pub async fn create_admin(db: &PgPool, account: AdminAccount) -> Result<User, AppError> {
    let dto = CreateUserDto {
        username: account.username,
        email: account.email,
        password: account.password,
        full_name: account.full_name,
        phone: None,
        role: UserRole::Admin,
    };
    dto.validate()?;

    let user = UserService::create_user(db, dto).await?;
    tracing::info!(user_id = %user.id, "Admin account created");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["mbkm"]).unwrap();
        assert!(matches!(cli.command(), Commands::Serve));
    }

    #[test]
    fn test_create_admin_flags() {
        let cli = Cli::try_parse_from([
            "mbkm",
            "create-admin",
            "-u",
            "admin",
            "--email",
            "admin@kampus.ac.id",
        ])
        .unwrap();

        match cli.command() {
            Commands::CreateAdmin {
                username,
                email,
                password,
                full_name,
            } => {
                assert_eq!(username.as_deref(), Some("admin"));
                assert_eq!(email.as_deref(), Some("admin@kampus.ac.id"));
                assert!(password.is_none());
                assert!(full_name.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_migrate_subcommand() {
        let cli = Cli::try_parse_from(["mbkm", "migrate"]).unwrap();
        assert!(matches!(cli.command(), Commands::Migrate));
    }
}
