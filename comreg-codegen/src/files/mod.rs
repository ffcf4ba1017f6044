//! Generated file types.

mod rgs;

pub use rgs::RgsScript;
