pub mod convert;
pub mod dump;
