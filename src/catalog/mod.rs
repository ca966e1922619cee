pub mod categories;
pub mod index;
pub mod loader;
pub mod models;
pub mod validation;


pub use categories::*;
pub use index::*;
pub use loader::*;
pub use validation::*;
