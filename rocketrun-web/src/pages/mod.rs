pub mod game;
pub mod not_found;
pub mod select;
