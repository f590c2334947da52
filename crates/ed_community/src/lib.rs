mod error;
mod abundance;
mod community;
mod otu_table;

pub use error::*;
pub use abundance::*;
pub use community::*;
pub use otu_table::*;

/// We use u32 (0 to ~4e9) for species and OTU indices, which is plenty for
/// any species pool a drift simulation or a sequencing survey will see. If
/// you ever want to change this, beware that ed_drift keys its sparse
/// abundance maps by SPIDX and *assumes* it is a primitive integer.
pub type SPIDX = u32;
