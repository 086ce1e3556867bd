pub mod models;
pub mod recommendations;
