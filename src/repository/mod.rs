mod locator;
mod scanner;

pub use locator::{RepositoryInfo, current_year, year_of};
pub use scanner::*;
