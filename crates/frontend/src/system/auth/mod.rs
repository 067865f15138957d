pub mod api;
pub mod context;
pub mod expiry;
pub mod guard;
pub mod storage;
