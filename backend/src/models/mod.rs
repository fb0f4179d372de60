pub mod macros;
pub mod school;
pub mod school_year;
pub mod time;
pub mod time_block;

pub use school::*;
pub use school_year::*;
pub use time::*;
pub use time_block::*;
