//! Background workers

pub mod extract;
pub mod monitor;
pub mod scrape;
