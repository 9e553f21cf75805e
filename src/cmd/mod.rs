pub mod list;
pub mod mix;
pub mod search;
