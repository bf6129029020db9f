//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use myflix_core::{Movie, User};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Pretty-print any serializable value
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One row per movie; favorites get a star
pub fn movie_table(movies: &[Movie], is_favorite: impl Fn(&str) -> bool) -> Table {
    let mut table = create_table();
    table.set_header(vec!["", "ID", "Title", "Genre", "Director"]);
    for movie in movies {
        let star = if is_favorite(&movie.id) { "★" } else { "" };
        table.add_row(vec![
            star,
            &movie.id,
            &movie.title,
            movie.genre_name().unwrap_or("-"),
            movie.director_name().unwrap_or("-"),
        ]);
    }
    table
}

/// Key/value view of one user
pub fn user_table(user: &User) -> Table {
    let mut table = create_table();
    let birthday = user
        .birthday
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let favorites = if user.favorite_movie_ids.is_empty() {
        "-".to_string()
    } else {
        user.favorite_movie_ids
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    table.add_row(vec!["ID", &user.id]);
    table.add_row(vec!["Username", &user.username]);
    table.add_row(vec!["Email", if user.email.is_empty() { "-" } else { &user.email }]);
    table.add_row(vec!["Birthday", &birthday]);
    table.add_row(vec!["Favorites", &favorites]);
    table
}
