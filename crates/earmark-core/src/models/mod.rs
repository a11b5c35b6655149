pub mod audiogram;
pub mod ear;
pub mod report;
pub mod threshold;
