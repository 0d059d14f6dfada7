pub mod app_error_impl;
pub mod app_state;
pub mod hook_auth;
pub mod routes;
