//! Inbound inputs and the ordering state machine

mod callback;
mod input;
mod machine;

pub use callback::{BackTarget, CallbackAction};
pub use input::{Input, StartCommand};
pub use machine::handle;
