pub mod cli;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod output;
pub mod progress;
