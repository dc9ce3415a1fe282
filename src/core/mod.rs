pub mod concentration;
pub mod differ;
pub mod normalizer;
pub mod parser;
pub mod targets;
