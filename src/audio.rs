//! rodio-backed media resource.
//!
//! A dedicated thread owns the output stream and the current sink. The player
//! side talks to it through `RodioMedia`, which implements `MediaResource`.

mod media;
mod sink;
mod thread;
mod types;

pub use media::RodioMedia;

#[cfg(test)]
mod tests;
