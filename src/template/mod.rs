pub mod handlers;
pub mod models;

mod mod_tests;
