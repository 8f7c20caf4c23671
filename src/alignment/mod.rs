pub mod beam;
pub mod shift;
pub mod ter;
pub mod tokenization;
pub mod trace;
