//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
mod catalog;
mod favorites;
mod profile;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use favorites::{FavoriteChange, FavoriteState, FavoritesService};
pub use profile::ProfileService;
