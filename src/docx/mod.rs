pub mod comments;
pub mod package;
pub mod paragraphs;
pub mod sections;
pub mod xml;
