pub mod cards;
pub mod chips;
pub mod detail;
pub mod filter;
pub mod stats;
