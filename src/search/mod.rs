pub mod parser;

pub use parser::parse_search_query;
