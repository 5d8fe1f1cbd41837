use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use uuid::Uuid;
use validator::Validate;

use microtrack::modules::users::service::UserService;
use microtrack::store::{AccountStore, PgAccountStore, StoreError};
use microtrack_config::{DatabaseConfig, PasswordConfig};
use microtrack_core::hash_password_with_cost;
use microtrack_db::init_db_pool;
use microtrack_models::{NewAccount, Role, SignupDto};

#[derive(Parser)]
#[command(name = "microtrack-cli")]
#[command(about = "MicroTrack CLI - Administrative tools for MicroTrack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Login username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Promote an existing account to admin
    Promote {
        /// Username of the account to promote
        username: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let accounts = PgAccountStore::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            first_name,
            last_name,
            password,
        } => {
            let dto = SignupDto {
                username: prompt_if_missing(username, "Username")?,
                email: prompt_if_missing(email, "Email address")?,
                first_name: prompt_if_missing(first_name, "First name")?,
                last_name: prompt_if_missing(last_name, "Last name")?,
                password: match password {
                    Some(password) => password,
                    None => Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()?,
                },
            };
            handle_create_admin(&accounts, dto).await
        }
        Commands::Promote { username } => {
            let response = UserService::promote(&accounts, &username)
                .await
                .map_err(|e| anyhow::anyhow!(e.public_message()))?;
            println!("\n✅ {}", response.message);
            Ok(())
        }
    }
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

async fn handle_create_admin(accounts: &dyn AccountStore, dto: SignupDto) -> anyhow::Result<()> {
    if let Err(errors) = dto.validate() {
        bail!("Invalid account details: {}", errors);
    }

    let password_config = PasswordConfig::from_env();
    let password_hash = hash_password_with_cost(&dto.password, password_config.bcrypt_cost)
        .map_err(|e| anyhow::anyhow!(e.public_message()))?;

    let account = NewAccount {
        id: Uuid::new_v4(),
        username: dto.username,
        email: dto.email,
        first_name: dto.first_name,
        last_name: dto.last_name,
        password_hash,
        role: Role::Admin,
    };

    match accounts.insert(account).await {
        Ok(account) => {
            println!("\n✅ Admin account created successfully!");
            println!("   Username: {}", account.username);
            println!("   Email: {}", account.email);
            println!("   Name: {} {}", account.first_name, account.last_name);
            Ok(())
        }
        Err(StoreError::Duplicate(field)) => bail!("An account with this {} already exists", field),
        Err(e) => Err(e).context("Failed to create admin account"),
    }
}
