use std::io::{self, Write};

use clap::{Args, Subcommand};
use esfiharia::{
    api::accounts::{Credentials, NewUser, User},
    config::ApiConfig,
};

use super::source::context;

#[derive(Debug, Args)]
pub(crate) struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    /// Create an account
    Register(RegisterArgs),

    /// Log in and print the session token
    Login(LoginArgs),

    /// Show the account the session token belongs to
    Me,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// Login name
    #[arg(long)]
    username: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Password
    #[arg(long, env = "ESFIHARIA_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Username or email
    #[arg(long)]
    identifier: String,

    /// Password
    #[arg(long, env = "ESFIHARIA_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(command: AccountCommand, api: &ApiConfig) -> Result<(), String> {
    let accounts = context(api)?.accounts;

    match command.command {
        AccountSubcommand::Register(args) => {
            let user = accounts
                .register(NewUser {
                    username: args.username,
                    email: args.email,
                    password: args.password,
                })
                .await
                .map_err(|error| format!("failed to register: {error}"))?;

            write_user(&user)
        }
        AccountSubcommand::Login(args) => {
            let token = accounts
                .login(Credentials {
                    identifier: args.identifier,
                    password: args.password,
                })
                .await
                .map_err(|error| format!("failed to log in: {error}"))?;

            writeln!(io::stdout(), "API_TOKEN={}", token.access_token)
                .map_err(|error| error.to_string())
        }
        AccountSubcommand::Me => {
            let user = accounts
                .current_user()
                .await
                .map_err(|error| format!("failed to get account: {error}"))?;

            write_user(&user)
        }
    }
}

fn write_user(user: &User) -> Result<(), String> {
    writeln!(
        io::stdout(),
        "id: {}\nusername: {}\nemail: {}",
        user.id, user.username, user.email
    )
    .map_err(|error| error.to_string())
}
