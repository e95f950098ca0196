pub mod credits;
pub mod styles;
