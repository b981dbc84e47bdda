pub mod movie_search;
pub mod providers;

pub use movie_search::MovieSearchService;
