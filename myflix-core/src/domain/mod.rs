//! Core domain entities
//!
//! Plain data structures mirroring the movie API's records, plus the
//! client-side session. No I/O happens here.

mod movie;
mod session;
mod user;
pub mod result;

pub use movie::{Director, Genre, Movie};
pub use session::Session;
pub use user::{parse_birthday, Credentials, LoginResponse, ProfileUpdate, Registration, User};
