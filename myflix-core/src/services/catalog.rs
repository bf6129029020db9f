//! Catalog service - movie, director and genre lookups

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Director, Genre, Movie};
use crate::ports::MovieApi;
use crate::services::FavoritesService;

pub struct CatalogService {
    api: Arc<dyn MovieApi>,
    favorites: Arc<FavoritesService>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn MovieApi>, favorites: Arc<FavoritesService>) -> Self {
        Self { api, favorites }
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.api.list_movies().await
    }

    pub async fn movie_by_id(&self, id: &str) -> Result<Movie> {
        self.api.get_movie_by_id(id).await
    }

    pub async fn movie_by_title(&self, title: &str) -> Result<Movie> {
        self.api.get_movie_by_title(title).await
    }

    pub async fn director(&self, name: &str) -> Result<Director> {
        self.api.get_director(name).await
    }

    /// Look up a genre by name (case-insensitive)
    ///
    /// The API has no genre endpoint, so this scans the movie list and
    /// returns the genre of the first movie that carries it.
    pub async fn genre(&self, name: &str) -> Result<Genre> {
        let wanted = name.trim();
        self.api
            .list_movies()
            .await?
            .into_iter()
            .filter_map(|movie| movie.genre)
            .find(|genre| genre.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::not_found(format!("genre '{}'", wanted)))
    }

    /// Movies in the local favorites set, in catalog order
    pub async fn favorite_movies(&self) -> Result<Vec<Movie>> {
        let movies = self.api.list_movies().await?;
        Ok(movies
            .into_iter()
            .filter(|movie| self.favorites.is_favorite(&movie.id))
            .collect())
    }
}
