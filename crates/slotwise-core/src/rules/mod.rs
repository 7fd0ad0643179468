pub mod activation;

pub use activation::{days_until, next_activation, EndDateBound};
