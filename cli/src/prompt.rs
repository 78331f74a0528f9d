//! Interactive credential prompts.

use anyhow::{bail, Context, Result};
use scout_core::Credentials;
use std::io::{self, BufRead, Write};

/// Build credentials, asking for whatever was not supplied.
///
/// `ask_email` and `ask_password` are only called for missing values.
pub fn resolve_credentials<E, P>(
    email: Option<String>,
    password: Option<String>,
    ask_email: E,
    ask_password: P,
) -> Result<Credentials>
where
    E: FnOnce() -> Result<String>,
    P: FnOnce() -> Result<String>,
{
    let email = match email.filter(|e| !e.trim().is_empty()) {
        Some(email) => email,
        None => ask_email()?,
    };
    let email = email.trim().to_string();
    if email.is_empty() {
        bail!("a LinkedIn email is required");
    }

    let password = match password.filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => ask_password()?,
    };
    if password.is_empty() {
        bail!("a LinkedIn password is required");
    }

    Ok(Credentials::new(email, password))
}

/// Read the login email from the terminal.
pub fn ask_email() -> Result<String> {
    print!("LinkedIn email: ");
    io::stdout().flush().context("flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read email from stdin")?;
    Ok(line.trim().to_string())
}

/// Read the password from the terminal without echo.
pub fn ask_password() -> Result<String> {
    rpassword::prompt_password("LinkedIn password: ").context("read password from terminal")
}
