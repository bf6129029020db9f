//! Account commands - register, login, logout, whoami

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::{Input, Password};
use myflix_core::{Credentials, Registration};

use super::{get_context, is_interactive, parse_birthday_arg};
use crate::output;

/// Use the flag value, or ask for it when a terminal is attached
fn value_or_prompt(value: Option<String>, prompt: &str, allow_empty: bool) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    if !is_interactive() {
        if allow_empty {
            return Ok(String::new());
        }
        bail!("{} is required (pass it as a flag when not running interactively)", prompt);
    }
    let v: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()?;
    Ok(v.trim().to_string())
}

fn password_or_prompt(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(p) = password {
        return Ok(p);
    }
    if !is_interactive() {
        bail!("Password is required (pass --password when not running interactively)");
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

pub async fn register(
    username: Option<String>,
    password: Option<String>,
    email: Option<String>,
    birthday: Option<String>,
) -> Result<()> {
    let ctx = get_context()?;

    let username = value_or_prompt(username, "Username", false)?;
    let password = password_or_prompt(password, true)?;
    let email = value_or_prompt(email, "Email", false)?;
    let birthday = match birthday {
        Some(raw) => Some(raw),
        None if is_interactive() => Some(value_or_prompt(None, "Birthday (YYYY-MM-DD, optional)", true)?),
        None => None,
    };
    let birthday = parse_birthday_arg(birthday.as_deref())?;

    let registration = Registration {
        username,
        password,
        email,
        birthday,
    };
    let user = ctx.auth_service.register(&registration).await?;

    output::success(&format!("Account '{}' created.", user.username));
    println!("{}", "Run 'mfx login' to start a session.".dimmed());
    Ok(())
}

pub async fn login(username: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let username = value_or_prompt(username, "Username", false)?;
    let password = password_or_prompt(password, false)?;

    let user = ctx
        .auth_service
        .login(&Credentials::new(username, password))
        .await?;

    output::success(&format!("Logged in as {}.", user.username));
    Ok(())
}

pub fn logout() -> Result<()> {
    let ctx = get_context()?;
    if !ctx.auth_service.is_logged_in() {
        output::info("Not logged in.");
        return Ok(());
    }

    ctx.auth_service.logout()?;
    output::success("Logged out.");
    Ok(())
}

pub fn whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let Some(user) = ctx.auth_service.current_user() else {
        if json {
            println!("null");
            return Ok(());
        }
        return Err(myflix_core::Error::NotLoggedIn.into());
    };

    if json {
        return output::print_json(&user);
    }
    println!("{}", output::user_table(&user));
    Ok(())
}
