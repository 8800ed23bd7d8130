pub mod aggregator;
pub mod cache;
pub mod channels;
pub mod date_parser;
pub mod metrics;
pub mod normalizer;
pub mod shows;
pub mod upstream;
