mod account;
mod choice;
mod doh;
mod filter;

pub use account::*;
pub use choice::*;
pub use doh::*;
pub use filter::*;
