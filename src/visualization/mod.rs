pub mod style;
pub mod viewer2d;
