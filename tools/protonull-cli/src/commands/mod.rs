pub mod convert;
pub mod describe;
