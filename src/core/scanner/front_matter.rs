//! YAML front matter parsing for documentation files.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default, alias = "sources")]
    references: Option<OneOrMany>,
}

/// Return the YAML block between the opening `---` and the closing
/// `---` / `...` line, if the document starts with one.
pub fn extract_block(content: &str) -> Option<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    if lines.next()?.trim_end() != "---" {
        return None;
    }

    let mut block = Vec::new();
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some(block.join("\n"));
        }
        block.push(trimmed);
    }

    None
}

/// Declared references from a document's front matter.
///
/// Documents without front matter, or without a `references` key, yield an
/// empty list. Blank entries are dropped.
pub fn parse_references(content: &str) -> Result<Vec<String>, serde_yml::Error> {
    let Some(block) = extract_block(content) else {
        return Ok(Vec::new());
    };
    if block.trim().is_empty() {
        return Ok(Vec::new());
    }

    let front_matter: Option<FrontMatter> = serde_yml::from_str(&block)?;
    let references = match front_matter.and_then(|fm| fm.references) {
        Some(OneOrMany::One(single)) => vec![single],
        Some(OneOrMany::Many(many)) => many,
        None => Vec::new(),
    };

    Ok(references
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect())
}
