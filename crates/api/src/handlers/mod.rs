pub mod bookmarks;
pub mod queries;
pub mod recommendations;
