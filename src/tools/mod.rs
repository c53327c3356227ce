pub mod detect;
pub mod filter;

pub use detect::DetectStripeTool;
pub use filter::FilterProductsTool;
