pub mod serve;
pub mod summarize;
pub mod util;
