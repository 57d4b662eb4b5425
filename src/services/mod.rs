pub mod markdown;
pub mod pdf_processor;
pub mod pipeline;
pub mod workspace;

pub use markdown::*;
pub use pdf_processor::*;
pub use pipeline::*;
pub use workspace::*;
