// Data preparation: scraping, cleaning, workbook conversion and sample generation.

pub mod clean;
pub mod convert;
pub mod dataset;
pub mod sample;
pub mod scrape;
