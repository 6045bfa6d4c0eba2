//! Reusable UI components

mod gate;
mod layout;
mod loading;
mod nav;
mod redirect;

pub use gate::*;
pub use layout::*;
pub use loading::*;
pub use nav::*;
pub use redirect::*;
