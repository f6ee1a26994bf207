mod bid;
mod page;
mod player;

pub use bid::*;
pub use page::*;
pub use player::*;
