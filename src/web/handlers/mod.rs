pub mod prompt;
pub mod response;
