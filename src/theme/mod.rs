mod colors;
mod theme;

pub use colors::Color;
pub use theme::{Style, Theme};
