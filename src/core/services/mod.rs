pub mod keyword_highlighter;
