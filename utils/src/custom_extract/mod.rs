pub mod auth;
pub mod json_extractor;
pub mod path_extractor;

pub use auth::*;
pub use json_extractor::*;
pub use path_extractor::*;
