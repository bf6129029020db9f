//! Profile command - show, edit and delete the logged-in account

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use myflix_core::ProfileUpdate;

use super::{get_context, is_interactive, parse_birthday_arg};
use crate::output;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields
    Edit {
        /// New username
        #[arg(long, short)]
        username: Option<String>,
        /// New password
        #[arg(long, short)]
        password: Option<String>,
        /// New email address
        #[arg(long, short)]
        email: Option<String>,
        /// New birthday (YYYY-MM-DD)
        #[arg(long, short)]
        birthday: Option<String>,
    },
    /// Delete your account
    Delete {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub async fn run(command: ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Show { json } => show(json).await,
        ProfileCommands::Edit { username, password, email, birthday } => {
            edit(username, password, email, birthday).await
        }
        ProfileCommands::Delete { force } => delete(force).await,
    }
}

async fn show(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx.profile_service.profile().await?;

    if json {
        return output::print_json(&user);
    }
    println!("{}", output::user_table(&user));
    Ok(())
}

async fn edit(
    username: Option<String>,
    password: Option<String>,
    email: Option<String>,
    birthday: Option<String>,
) -> Result<()> {
    let ctx = get_context()?;

    let update = ProfileUpdate {
        username,
        password,
        email,
        birthday: parse_birthday_arg(birthday.as_deref())?,
    };
    if update.is_empty() {
        output::warning("Nothing to update. Pass --username, --password, --email or --birthday.");
        return Ok(());
    }

    let user = ctx.profile_service.edit(&update).await?;
    output::success("Profile updated.");
    println!("{}", output::user_table(&user));
    Ok(())
}

async fn delete(force: bool) -> Result<()> {
    let ctx = get_context()?;
    let Some(user) = ctx.auth_service.current_user() else {
        return Err(myflix_core::Error::NotLoggedIn.into());
    };

    if !force {
        if !is_interactive() {
            anyhow::bail!("Refusing to delete the account without confirmation (use --force)");
        }

        println!(
            "\n{}",
            format!("This will permanently delete the account '{}'.", user.username).yellow()
        );
        println!("{}\n", "Your favorites will be lost.".dimmed());

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let message = ctx.profile_service.delete_account().await?;
    output::success(&message);
    Ok(())
}
