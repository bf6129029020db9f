//! Favorites command - list and change favorite movies

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use myflix_core::FavoriteChange;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List favorite movies
    List {
        /// Only print ids, without fetching the catalog
        #[arg(long)]
        ids: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a movie to favorites
    Add {
        /// Movie id
        movie_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a movie from favorites
    Remove {
        /// Movie id
        movie_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add the movie if absent, remove it if present
    Toggle {
        /// Movie id
        movie_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: FavoritesCommands) -> Result<()> {
    let ctx = get_context()?;
    let favorites = &ctx.favorites_service;

    match command {
        FavoritesCommands::List { ids, json } => {
            // Pick up changes made from other clients
            favorites.refresh().await?;

            if ids {
                let ids = favorites.favorites();
                if json {
                    return output::print_json(&ids);
                }
                for id in ids {
                    println!("{}", id);
                }
                return Ok(());
            }

            let movies = ctx.catalog_service.favorite_movies().await?;
            if json {
                return output::print_json(&movies);
            }
            if movies.is_empty() {
                output::info("No favorite movies yet.");
                println!("{}", "Add one with 'mfx favorites add <movie-id>'.".dimmed());
                return Ok(());
            }
            println!("{}", output::movie_table(&movies, |_| true));
            Ok(())
        }
        FavoritesCommands::Add { movie_id, json } => {
            let change = favorites.add(&movie_id).await?;
            report(&change, json)
        }
        FavoritesCommands::Remove { movie_id, json } => {
            let change = favorites.remove(&movie_id).await?;
            report(&change, json)
        }
        FavoritesCommands::Toggle { movie_id, json } => {
            let change = favorites.toggle(&movie_id).await?;
            report(&change, json)
        }
    }
}

fn report(change: &FavoriteChange, json: bool) -> Result<()> {
    if json {
        return output::print_json(change);
    }
    if change.state.is_favorite() {
        output::success(&format!("Added '{}' to favorites.", change.movie_id));
    } else {
        output::success(&format!("Removed '{}' from favorites.", change.movie_id));
    }
    println!(
        "{}",
        format!("{} favorite(s)", change.favorites.len()).dimmed()
    );
    Ok(())
}
