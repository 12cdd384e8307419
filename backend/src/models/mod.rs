pub mod filters;
pub mod macros;
pub mod metrics;
pub mod time;

pub use filters::*;
pub use metrics::*;
pub use time::*;
