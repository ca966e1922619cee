pub mod coefficients;
pub mod html;
pub mod rows;


pub use coefficients::*;
pub use html::*;
pub use rows::*;
