use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lms-server")]
#[command(about = "LMS authentication API server")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Create a user account in the configured database
    CreateUser(CreateUserArgs),
}

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Create the account disabled
    #[arg(long)]
    pub inactive: bool,
}
