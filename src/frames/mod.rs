pub mod cache;
pub mod locate;
pub mod probe;
