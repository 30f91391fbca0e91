pub mod source;
pub mod style;
pub mod wire;
