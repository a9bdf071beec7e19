mod detection;
mod identity;

pub use detection::{Monitor, detect, set_brightness};
