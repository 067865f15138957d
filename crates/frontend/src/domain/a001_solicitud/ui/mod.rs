pub mod approval;
pub mod create;
pub mod details;
pub mod list;
pub mod mine;
pub mod row;
