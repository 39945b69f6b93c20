mod summarizer;

pub use summarizer::{Summarizer, SummaryResult, SummarySource};
