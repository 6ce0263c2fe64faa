pub mod format;
pub mod numeric;

pub use format::*;
pub use numeric::*;
