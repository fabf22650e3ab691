pub mod book;
pub mod story;
