//! Navigation domain module.
//!
//! - `screen`: the `Screen` enumeration
//! - `controller`: `NavigationController` and the pure `next_screen` rule

mod controller;
mod screen;

pub use controller::{NavigationController, next_screen};
pub use screen::Screen;
