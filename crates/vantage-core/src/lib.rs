pub mod analysis;
pub mod chart;
pub mod data;
pub mod types;

pub use data::sentiment;
pub use data::trades;
