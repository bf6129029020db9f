//! Movie API port
//!
//! One method per endpoint of the remote myFlix service. Implementations
//! perform exactly one round trip per call and never retry.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{Credentials, Director, LoginResponse, Movie, ProfileUpdate, Registration, User};

/// Remote movie catalog API
///
/// Every method except `register` and `login` is authenticated with the
/// bearer token held by the session store at the moment of the call.
#[async_trait]
pub trait MovieApi: Send + Sync {
    // === Accounts ===

    /// Create a new user (`POST /users`)
    async fn register(&self, registration: &Registration) -> Result<User>;

    /// Exchange credentials for a token (`POST /login`)
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    // === Catalog ===

    /// All movies (`GET /movies`)
    async fn list_movies(&self) -> Result<Vec<Movie>>;

    /// One movie by id (`GET /movieid/{id}`)
    async fn get_movie_by_id(&self, id: &str) -> Result<Movie>;

    /// One movie by title (`GET /movie/{title}`)
    async fn get_movie_by_title(&self, title: &str) -> Result<Movie>;

    /// Director details (`GET /director/{name}`)
    async fn get_director(&self, name: &str) -> Result<Director>;

    // === Users ===

    /// All users (`GET /users`)
    async fn list_users(&self) -> Result<Vec<User>>;

    /// One user (`GET /user/{id}`)
    async fn get_user(&self, id: &str) -> Result<User>;

    /// Add a movie to the user's favorites (`POST /user/{userId}/{movieId}`)
    ///
    /// Returns the updated user, whose favorites are authoritative.
    async fn add_favorite(&self, user_id: &str, movie_id: &str) -> Result<User>;

    /// Remove a movie from the user's favorites (`DELETE /user/{userId}/{movieId}`)
    async fn remove_favorite(&self, user_id: &str, movie_id: &str) -> Result<User>;

    /// Update profile fields (`PUT /user/{id}`)
    async fn edit_user(&self, id: &str, update: &ProfileUpdate) -> Result<User>;

    /// Delete the account (`DELETE /user` with body `{ "id": ... }`)
    ///
    /// Returns the server's confirmation text.
    async fn delete_user(&self, id: &str) -> Result<String>;
}
