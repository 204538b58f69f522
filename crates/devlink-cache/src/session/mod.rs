//! Session storage (refresh tokens)

mod refresh_token;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
