//! HTTP handlers
//!
//! Pages and form posts mirror a classic server-rendered site: every form post
//! ends in a redirect. The JSON routes expose the same data read-only.

pub mod games;
pub mod health;
pub mod pages;
pub mod season;
pub mod upload;

pub use games::game_routes;
pub use health::health_routes;
pub use pages::page_routes;
pub use season::season_routes;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Parse a game id from a path segment; a malformed id is simply unknown
pub(crate) fn parse_game_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("game {}", raw)))
}
