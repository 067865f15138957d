pub mod access;
pub mod auth;
pub mod roles;
pub mod routes;
pub mod users;
