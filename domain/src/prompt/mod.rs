//! Prompt construction for every collaboration flow.

mod template;

pub use template::PromptTemplate;
