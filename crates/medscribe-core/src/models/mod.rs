pub mod analysis;
pub mod classification;
pub mod document;
pub mod transcript;
