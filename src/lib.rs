mod bindings;
mod checkout_component;
pub mod client;
mod components;
pub mod form;
mod interop;

pub use bindings::*;
pub use checkout_component::*;
pub use client::*;
pub use components::*;
pub use form::*;
pub use interop::*;
