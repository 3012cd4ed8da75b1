mod recommendation;
mod title;

pub use recommendation::{
    MoviesResponse, Recommendation, RecommendRequest, RecommendResponse, RecommendationResult,
};
pub use title::{Catalog, Title};
