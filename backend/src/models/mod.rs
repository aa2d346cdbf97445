pub mod bucket;
pub mod sample;
pub mod weekday;

pub use bucket::*;
pub use sample::*;
pub use weekday::*;
