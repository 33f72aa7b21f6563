pub mod api;
pub mod cli;
pub mod error;
pub mod fill;
pub mod generate;

pub use cli::Cli;
pub use error::{CreateError, FillError};
pub use fill::{Filler, Summary, run};
