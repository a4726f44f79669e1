pub mod feed;
pub mod parser;
pub mod report;

pub use parser::contacts::Contact;
pub use parser::sections::Section;
pub use parser::{extract_content, extract_traced, ExtractedContent, Trace};
