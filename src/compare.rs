use crate::docx::comments::extract_comments;
use crate::docx::package::DocPackage;
use crate::docx::paragraphs::{extract_paragraphs_with_tooltip, ParagraphUnit};
use crate::docx::sections::extract_sections;
use crate::error::Result;
use crate::render::render_diff_table;
use crate::split::split_paragraphs;

/// Whole-document comparison: paragraphs with their comment summaries from
/// both packages, rendered as a diff table.
pub fn compare_documents(old: &DocPackage, new: &DocPackage) -> Result<String> {
    let old_comments = extract_comments(old)?;
    let new_comments = extract_comments(new)?;
    let old_units = extract_paragraphs_with_tooltip(old, &old_comments)?;
    let new_units = extract_paragraphs_with_tooltip(new, &new_comments)?;
    Ok(render_diff_table(&old_units, &new_units))
}

/// Section-scoped comparison: the titled section's texts from both packages,
/// split into numbered sub-clauses. A title absent from a document
/// contributes an empty side. Section units carry no comment summaries.
pub fn compare_section(old: &DocPackage, new: &DocPackage, title: &str) -> Result<String> {
    let old_sections = extract_sections(old)?;
    let new_sections = extract_sections(new)?;

    let old_units = section_units(old_sections.get(title));
    let new_units = section_units(new_sections.get(title));
    Ok(render_diff_table(&old_units, &new_units))
}

/// Section titles present in both documents, sorted for display.
pub fn common_sections(old: &DocPackage, new: &DocPackage) -> Result<Vec<String>> {
    let old_sections = extract_sections(old)?;
    let new_sections = extract_sections(new)?;
    let mut titles: Vec<String> = old_sections
        .keys()
        .filter(|t| new_sections.contains_key(*t))
        .cloned()
        .collect();
    titles.sort();
    Ok(titles)
}

fn section_units(texts: Option<&Vec<String>>) -> Vec<ParagraphUnit> {
    let empty = Vec::new();
    split_paragraphs(texts.unwrap_or(&empty))
        .into_iter()
        .map(|text| ParagraphUnit::new(text, ""))
        .collect()
}
