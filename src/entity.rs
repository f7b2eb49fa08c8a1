mod highest;
mod record;

pub use highest::*;
pub use record::*;
