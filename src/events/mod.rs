pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_activation_keys;
pub use pointer::{wire_input_handlers, InputWiring};
