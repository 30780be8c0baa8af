//! Typing animation for Hearth
//!
//! A restartable type-and-erase text cycle: the pure state machine in
//! [`typing`], the tokio timer driver in [`driver`].

pub mod driver;
pub mod typing;

pub use driver::TypingAnimator;
pub use typing::{Phase, TypingConfig, TypingMachine};
