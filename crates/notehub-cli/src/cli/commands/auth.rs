//! Auth command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use notehub_core::api::ApiClient;
use notehub_core::api::auth::Registration;
use notehub_core::session::{SessionStore, mask_token};

pub async fn login(
    api: &ApiClient,
    store: &SessionStore,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_secret("Password: ")?,
    };
    if email.trim().is_empty() || password.is_empty() {
        bail!("Please enter your email and password");
    }

    let session = api.login(email.trim(), &password).await?;
    store.save(&session).context("save session")?;
    println!("Logged in as {}", session.label());
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if store.clear().context("remove session")? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub async fn register(
    api: &ApiClient,
    name: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let (password, confirm_password) = match password {
        Some(password) => (password.clone(), password),
        None => (
            read_secret("Password: ")?,
            read_secret("Confirm password: ")?,
        ),
    };
    if name.trim().is_empty() || email.trim().is_empty() {
        bail!("Please fill in all fields");
    }

    let registration = Registration {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password,
        confirm_password,
    };
    api.register(&registration).await?;
    println!("Registration successful! Please login.");
    Ok(())
}

pub async fn whoami(api: &ApiClient, store: &SessionStore) -> Result<()> {
    let Some(session) = store.load().context("load session")? else {
        bail!("Not logged in. Run `notehub login` first.");
    };

    match api.with_session(&session).whoami().await {
        Ok(me) => {
            println!("{} ({})", me.email, session.role);
            println!("Token: {}", mask_token(&session.token));
            Ok(())
        }
        Err(e) if e.is_session_expired() => {
            store.clear().context("remove session")?;
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads one line from stdin after printing `prompt` to stderr.
fn read_secret(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
