pub mod timeline;
pub mod timeline_io;
pub mod timeline_plotting;

mod schedule;
mod voter_model;

pub use schedule::*;
pub use voter_model::*;
