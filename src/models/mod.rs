//! Typed records shared by the store and the HTTP layer.

pub mod email;
pub mod item;
pub mod response;
