mod error;
mod diversity;
mod rank_abundance;
mod octaves;
mod rarefaction;
mod logseries;

pub mod rank_plotting;

pub use error::*;
pub use diversity::*;
pub use rank_abundance::*;
pub use octaves::*;
pub use rarefaction::*;
pub use logseries::*;
