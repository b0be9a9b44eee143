pub mod client;
pub mod expo;
