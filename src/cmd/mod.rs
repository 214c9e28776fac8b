pub mod art;
pub mod range;
