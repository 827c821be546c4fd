pub mod market;
pub mod news;
pub mod returns;
