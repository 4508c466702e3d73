// Interaction flow: selection and persistence built on top of the ports.

pub mod filters;
pub mod search;

pub use filters::{KeywordMatch, SalaryRange};
pub use search::{SearchPipeline, SearchReport, SearchRequest};
