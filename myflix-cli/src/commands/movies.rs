//! Catalog commands - movies, movie, director, genre

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn list(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let movies = ctx.catalog_service.list_movies().await?;

    if json {
        return output::print_json(&movies);
    }

    if movies.is_empty() {
        output::info("The list is empty!");
        return Ok(());
    }

    let favorites = &ctx.favorites_service;
    println!("{}", output::movie_table(&movies, |id| favorites.is_favorite(id)));
    println!("{}", format!("{} movies", movies.len()).dimmed());
    Ok(())
}

pub async fn show(id: Option<String>, title: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let movie = match (id, title) {
        (_, Some(title)) => ctx.catalog_service.movie_by_title(&title).await?,
        (Some(id), None) => ctx.catalog_service.movie_by_id(&id).await?,
        (None, None) => anyhow::bail!("Give a movie id or --title"),
    };

    if json {
        return output::print_json(&movie);
    }

    let star = if ctx.favorites_service.is_favorite(&movie.id) {
        " ★".yellow().to_string()
    } else {
        String::new()
    };
    println!("{}{}", movie.title.bold(), star);
    println!("{}", format!("id: {}", movie.id).dimmed());
    println!();
    if !movie.description.is_empty() {
        println!("{}", movie.description);
        println!();
    }

    let mut table = output::create_table();
    if let Some(genre) = &movie.genre {
        table.add_row(vec!["Genre", &genre.name]);
    }
    if let Some(director) = &movie.director {
        table.add_row(vec!["Director", &director.name]);
    }
    if let Some(image) = &movie.image_url {
        table.add_row(vec!["Image", image]);
    }
    table.add_row(vec!["Featured", if movie.featured { "yes" } else { "no" }]);
    println!("{}", table);
    Ok(())
}

pub async fn director(name: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let director = ctx.catalog_service.director(name).await?;

    if json {
        return output::print_json(&director);
    }

    println!("{}", director.name.bold());
    let lifespan = match (&director.birth, &director.death) {
        (Some(birth), Some(death)) => Some(format!("{} - {}", birth, death)),
        (Some(birth), None) => Some(format!("born {}", birth)),
        (None, Some(death)) => Some(format!("died {}", death)),
        (None, None) => None,
    };
    if let Some(lifespan) = lifespan {
        println!("{}", lifespan.dimmed());
    }
    if !director.bio.is_empty() {
        println!();
        println!("{}", director.bio);
    }
    Ok(())
}

pub async fn genre(name: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let genre = ctx.catalog_service.genre(name).await?;

    if json {
        return output::print_json(&genre);
    }

    println!("{}", genre.name.bold());
    if !genre.description.is_empty() {
        println!();
        println!("{}", genre.description);
    }
    Ok(())
}
