//! Users command - browse the user directory

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn list(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let users = ctx.profile_service.list_users().await?;

    if json {
        return output::print_json(&users);
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Username", "Email", "Favorites"]);
    for user in &users {
        table.add_row(vec![
            user.id.clone(),
            user.username.clone(),
            user.email.clone(),
            user.favorite_movie_ids.len().to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

pub async fn show(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx.profile_service.user(id).await?;

    if json {
        return output::print_json(&user);
    }
    println!("{}", output::user_table(&user));
    Ok(())
}
