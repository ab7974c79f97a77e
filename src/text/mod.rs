pub mod string;
pub mod utf8;
