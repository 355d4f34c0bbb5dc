//! REST API endpoint tests

mod auth_tests;
mod health_tests;
mod reference_tests;
mod user_tests;
