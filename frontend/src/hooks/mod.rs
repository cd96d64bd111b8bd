pub mod use_wheel_options;

pub use use_wheel_options::*;
