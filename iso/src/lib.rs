#![no_std]

extern crate alloc;

pub use layers::*;
pub use project::*;
pub use rotate::*;
pub use scene::*;
pub use theme::*;
pub use view::*;

mod layers;
mod project;
mod rotate;
mod scene;
mod theme;
mod view;
