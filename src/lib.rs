//! # docx-compare
//!
//! Compare two versions of a word-processing package (DOCX) and render a
//! side-by-side, diff-highlighted HTML table of the text that changed,
//! optionally scoped to a single heading-delimited section and annotated
//! with author comments attached to text ranges.
//!
//! The pipeline: a package is read fully into memory ([`DocPackage`]),
//! paragraphs and comment annotations (or sections and numbered
//! sub-clauses) are extracted from its XML parts, the two paragraph
//! sequences are aligned with an LCS opcode matcher, and changed pairs are
//! word-highlighted into table rows ([`render_diff_table`]).
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use docx_compare::compare_documents;
//! use docx_compare::DocPackage;
//!
//! let old = DocPackage::open(Path::new("contract_v1.docx"))?;
//! let new = DocPackage::open(Path::new("contract_v2.docx"))?;
//! let html = compare_documents(&old, &new)?;
//! # Ok::<(), docx_compare::CompareError>(())
//! ```
//!
//! Each comparison is a pure transformation over its inputs; concurrent
//! comparisons need independently-loaded packages and nothing else.

pub mod align;
pub mod compare;
pub mod docx;
pub mod error;
pub mod render;
pub mod split;

pub use align::{align, DiffOp, DiffTag};
pub use compare::{common_sections, compare_documents, compare_section};
pub use docx::comments::extract_comments;
pub use docx::package::DocPackage;
pub use docx::paragraphs::{extract_paragraphs_with_tooltip, ParagraphUnit};
pub use docx::sections::{extract_sections, NO_SECTION};
pub use error::{CompareError, Result};
pub use render::{highlight_word_changes, render_diff_table};
pub use split::split_paragraphs;
