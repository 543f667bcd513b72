mod auth;
mod recommendation;

pub use auth::EXPIRY_MARGIN_SECS;
pub use auth::TokenManager;
pub use recommendation::RecommendationManager;
