pub mod fountain_parser;
pub mod location_analyzer;
pub mod note_scanner;
pub mod title_page;

pub use fountain_parser::FountainParser;
pub use location_analyzer::{analyze_location, LocationAnalyzer};
pub use note_scanner::{scan_notes, RawLine};
pub use title_page::{extract_title_page, extract_title_page_lines};
