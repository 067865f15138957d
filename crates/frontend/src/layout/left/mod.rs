pub mod left;
pub mod navbar;

pub use left::Left;
pub use navbar::Navbar;
