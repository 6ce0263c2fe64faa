pub mod cache;
pub mod cohort;
pub mod distribution;
pub mod error;
pub mod scenario;
pub mod session;
pub mod wallet;

pub use cache::*;
pub use cohort::*;
pub use distribution::*;
pub use error::*;
pub use scenario::*;
pub use session::*;
pub use wallet::*;
