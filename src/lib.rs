pub mod dust_detection;
pub mod logger;
