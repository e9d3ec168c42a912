//! Account CLI commands
//!
//! Sign-up, sign-in, sign-out, password reset and identity display.

use std::io::{self, BufRead, Write};

use clap::Subcommand;

use crate::auth::{AuthProvider, SecretString};
use crate::error::{ExpensioError, ExpensioResult};
use crate::services::AuthService;
use crate::validation::{SignInForm, SignUpForm};

/// Environment variable read for passwords instead of prompting
pub const PASSWORD_ENV: &str = "EXPENSIO_PASSWORD";

/// Account subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and sign in
    Signup {
        /// Full name
        #[arg(short, long)]
        name: Option<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign in to an existing account
    Signin {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out
    Signout,
    /// Request a password reset email
    ResetPassword {
        /// Email address of the account
        #[arg(short, long)]
        email: String,
    },
    /// Show who is signed in
    Whoami,
}

fn prompt_line(label: &str) -> ExpensioResult<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_secret(label: &str) -> ExpensioResult<SecretString> {
    rpassword::prompt_password(format!("{}: ", label))
        .map(SecretString::from)
        .map_err(|e| ExpensioError::Io(format!("Failed to read password: {}", e)))
}

/// Handle an account command
pub fn handle_auth_command<A: AuthProvider + ?Sized>(
    provider: &A,
    cmd: AuthCommands,
) -> ExpensioResult<()> {
    let service = AuthService::new(provider);

    match cmd {
        AuthCommands::Signup {
            name,
            email,
            password,
        } => {
            let name = match name {
                Some(name) => name,
                None => prompt_line("Full name")?,
            };
            let email = match email {
                Some(email) => email,
                None => prompt_line("Email")?,
            };
            let (password, confirm) = match password {
                Some(password) => {
                    let password = SecretString::from(password);
                    (password.clone(), password)
                }
                None => (prompt_secret("Password")?, prompt_secret("Confirm password")?),
            };

            let identity = service.sign_up(&SignUpForm {
                name,
                email,
                password,
                confirm_password: confirm,
            })?;
            println!("Welcome, {}! You are signed in as {}.", identity.label(), identity.email);
        }

        AuthCommands::Signin { email, password } => {
            let password = match password {
                Some(password) => SecretString::from(password),
                None => prompt_secret("Password")?,
            };

            let identity = service.sign_in(&SignInForm { email, password })?;
            println!("Signed in as {}.", identity.email);
        }

        AuthCommands::Signout => {
            if service.current_identity().is_none() {
                println!("Not signed in.");
            } else {
                service.sign_out()?;
                println!("Signed out.");
            }
        }

        AuthCommands::ResetPassword { email } => {
            service.request_password_reset(&email)?;
            println!("If an account exists for {}, a reset link has been sent.", email.trim());
        }

        AuthCommands::Whoami => match service.current_identity() {
            Some(identity) => {
                println!("{} <{}>", identity.label(), identity.email);
                println!("User ID: {}", identity.user_id.as_uuid());
            }
            None => println!("Not signed in."),
        },
    }

    Ok(())
}
