//! Text processing and analysis module

pub mod analyzer;
pub mod ats_matcher;
pub mod document;
pub mod ranker;
pub mod rewriter;
pub mod scorer;
pub mod text_processor;
