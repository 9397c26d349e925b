mod movie_detail;

pub use movie_detail::MovieDetailManager;
