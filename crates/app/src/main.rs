//! Bibliotek Application CLI

use std::process;

use bibliotek_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::{
        imports::{ImportsService, PgImportsService},
        users::{
            PgUsersService, UsersService,
            models::{NewUser, UserRole, UserUuid},
        },
    },
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bibliotek-app", about = "Bibliotek CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(UserCommand),
    Books(BooksCommand),
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
    /// User display name
    #[arg(long)]
    name: String,

    /// User email address
    #[arg(long)]
    email: String,

    /// Role: member or librarian
    #[arg(long, default_value = "member")]
    role: UserRole,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct BooksCommand {
    #[command(subcommand)]
    command: BooksSubcommand,
}

#[derive(Debug, Subcommand)]
enum BooksSubcommand {
    Import(ImportBooksArgs),
}

#[derive(Debug, Args)]
struct ImportBooksArgs {
    /// Path to the catalog CSV file
    #[arg(long)]
    file: std::path::PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
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
    match cli.command {
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(args).await,
        Commands::Books(BooksCommand {
            command: BooksSubcommand::Import(args),
        }) => import_books(args).await,
    }
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let db = connect(&args.database_url).await?;

    let users = PgUsersService::new(db.clone());
    let auth = PgAuthService::new(db);

    let user = users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: args.name,
            email: args.email,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = auth
        .issue_token(user.uuid)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

async fn import_books(args: ImportBooksArgs) -> Result<(), String> {
    let csv = std::fs::read(&args.file)
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let db = connect(&args.database_url).await?;

    let imports = PgImportsService::new(db);

    let report = imports
        .import_books(&csv)
        .await
        .map_err(|error| format!("import failed: {error}"))?;

    println!("books_created: {}", report.created);
    println!("authors_created: {}", report.authors_created);
    println!("rows_skipped: {}", report.skipped.len());

    for row in &report.skipped {
        println!("  line {}: {}", row.line, row.reason);
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}
