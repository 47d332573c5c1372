//! Built-in vendor platform definitions.

pub mod arista_eos;
pub mod cisco;
pub mod generic;
pub mod juniper_junos;
pub mod linux;
