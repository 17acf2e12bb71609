/// Text datasets and document traits
pub mod dataset;
