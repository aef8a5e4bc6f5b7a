//! Weekly narrative files.
//!
//! A narrative is a header line followed by one block per character per
//! day. Blocks are rebuilt from the log record every time it changes and
//! written back in place, so rerunning a step never stacks duplicate
//! sections.

use storyloom_core::LogRecord;
use storyloom_error::StoryloomResult;
use storyloom_storage::LockedBlobStore;
use tracing::instrument;

/// First line of every freshly initialized narrative.
pub const NARRATIVE_HEADER: &str = "# Weekly log file initialized\n";

/// Line closing every day block.
pub const BLOCK_RULE: &str = "------------------------------------------------------";

const WRAP_WIDTH: usize = 100;
const CONTINUATION_INDENT: &str = "    ";

/// Header line identifying a record's block.
///
/// ```
/// use storyloom_core::{LogRecord, RunDate};
/// use storyloom_pipeline::block_header;
///
/// let record = LogRecord::new_empty(RunDate::parse("2025-06-23").unwrap(), "fox", "rain");
/// assert_eq!(block_header(&record), "=== 2025-06-23: rain [fox] ===");
/// ```
pub fn block_header(record: &LogRecord) -> String {
    format!(
        "=== {}: {} [{}] ===",
        record.date, record.theme_slug, record.character_id
    )
}

/// Greedy word wrap. Existing line breaks are kept; lines that overflow
/// continue on indented lines.
pub fn wrap(text: &str, first_prefix: &str) -> String {
    let mut out = String::new();
    for (n, line) in text.lines().enumerate() {
        if n > 0 {
            out.push('\n');
        }
        let prefix = if n == 0 { first_prefix } else { "" };
        wrap_line(line, prefix, &mut out);
    }
    if out.is_empty() {
        out.push_str(first_prefix.trim_end());
    }
    out
}

fn wrap_line(line: &str, prefix: &str, out: &mut String) {
    let mut current = prefix.to_string();
    let mut has_word = false;
    for word in line.split_whitespace() {
        let width = word.chars().count();
        let needed = if has_word { width + 1 } else { width };
        if has_word && current.chars().count() + needed > WRAP_WIDTH {
            out.push_str(&current);
            out.push('\n');
            current = format!("{}{}", CONTINUATION_INDENT, word);
        } else {
            if has_word {
                current.push(' ');
            }
            current.push_str(word);
        }
        has_word = true;
    }
    out.push_str(current.trim_end());
}

/// Render the full day block for `record`, ending with the closing rule
/// and a newline.
pub fn render_block(record: &LogRecord) -> String {
    let mut block = format!("{}\n", block_header(record));

    block.push_str("STORY:\n");
    block.push_str(&wrap(&record.story, ""));
    block.push_str("\n\nSUMMARY:\n");
    block.push_str(&wrap(&record.summary, ""));
    block.push_str("\n\nPROMPTS:\n");

    let width = record.prompt_list.len().to_string().len();
    for (idx, prompt) in record.prompt_list.iter().enumerate() {
        let prefix = format!("{:>width$}. ", idx + 1, width = width);
        block.push_str(&wrap(prompt, &prefix));
        block.push('\n');
    }

    block.push_str("\nIMAGE URLs:\n");
    for url in &record.images {
        block.push_str("- ");
        block.push_str(url);
        block.push('\n');
    }

    block.push_str(BLOCK_RULE);
    block.push('\n');
    block
}

/// Replace the block sharing `block`'s header line, or append it.
///
/// A replaced block runs from its header through the first closing rule
/// after it, or to the end of the text when the rule is missing.
///
/// ```
/// use storyloom_pipeline::{upsert_block, NARRATIVE_HEADER};
///
/// let first = "=== 2025-06-23: rain [fox] ===\nSTORY:\nold\n------------------------------------------------------\n";
/// let second = "=== 2025-06-23: rain [fox] ===\nSTORY:\nnew\n------------------------------------------------------\n";
///
/// let once = upsert_block(NARRATIVE_HEADER, first);
/// let twice = upsert_block(&once, second);
/// assert_eq!(twice.matches("=== 2025-06-23").count(), 1);
/// assert!(twice.contains("new") && !twice.contains("old"));
/// ```
pub fn upsert_block(existing: &str, block: &str) -> String {
    let header = block.lines().next().unwrap_or_default();

    let mut offset = 0;
    let mut start = None;
    let mut end = None;
    for line in existing.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        match start {
            None if !header.is_empty() && content == header => start = Some(offset),
            Some(_) if content == BLOCK_RULE => {
                end = Some(offset + line.len());
                break;
            }
            _ => {}
        }
        offset += line.len();
    }

    match start {
        Some(start) => {
            let end = end.unwrap_or(existing.len());
            format!("{}{}{}", &existing[..start], block, &existing[end..])
        }
        None => {
            let mut out = existing.to_string();
            if !out.is_empty() {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push('\n');
            }
            out.push_str(block);
            out
        }
    }
}

/// Write `record`'s block into each narrative under `paths`, creating a
/// narrative with the standard header when it does not exist yet.
#[instrument(skip(store, record), fields(character_id = %record.character_id))]
pub async fn publish_block(
    store: &LockedBlobStore,
    paths: &[&str],
    record: &LogRecord,
) -> StoryloomResult<()> {
    let block = render_block(record);
    for path in paths {
        store
            .update_text(path, |current| {
                let current = current.unwrap_or_else(|| NARRATIVE_HEADER.to_string());
                Ok(upsert_block(&current, &block))
            })
            .await?;
        tracing::debug!(path = %path, "Narrative block written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_core::RunDate;

    fn record(cid: &str) -> LogRecord {
        let mut record =
            LogRecord::new_empty(RunDate::parse("2025-06-23").unwrap(), cid, "creative_cooking");
        record.story = "Once upon a time.".into();
        record.summary = "A rabbit bakes.".into();
        record.prompt_list = (1..=10).map(|n| format!("prompt {}", n)).collect();
        record
    }

    #[test]
    fn test_block_layout() {
        let mut record = record("rabbit_chef");
        record.prompt_list.truncate(2);
        record.images = vec!["https://i.ibb.co/a.png".into()];
        let expected = "=== 2025-06-23: creative_cooking [rabbit_chef] ===\n\
                        STORY:\n\
                        Once upon a time.\n\
                        \n\
                        SUMMARY:\n\
                        A rabbit bakes.\n\
                        \n\
                        PROMPTS:\n\
                        1. prompt 1\n\
                        2. prompt 2\n\
                        \n\
                        IMAGE URLs:\n\
                        - https://i.ibb.co/a.png\n\
                        ------------------------------------------------------\n";
        assert_eq!(render_block(&record), expected);
    }

    #[test]
    fn test_prompt_indices_right_aligned() {
        let block = render_block(&record("fox"));
        assert!(block.contains("\n 1. prompt 1\n"));
        assert!(block.contains("\n10. prompt 10\n"));
    }

    #[test]
    fn test_long_lines_wrap_with_indent() {
        let text = "word ".repeat(40);
        let wrapped = wrap(text.trim(), "");
        let lines: Vec<&str> = wrapped.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= WRAP_WIDTH));
        assert!(lines[1].starts_with("    word"));
    }

    #[test]
    fn test_wrap_width_counts_characters() {
        // 10 characters, 20 bytes each: nine fit in 98 columns.
        let word = "é".repeat(10);
        let text = vec![word.as_str(); 12].join(" ");
        let wrapped = wrap(&text, "");
        let first = wrapped.lines().next().unwrap();
        assert_eq!(first.split_whitespace().count(), 9);
        assert_eq!(first.chars().count(), 98);
    }

    #[test]
    fn test_paragraph_breaks_kept() {
        assert_eq!(wrap("one\n\ntwo", ""), "one\n\ntwo");
    }

    #[test]
    fn test_upsert_leaves_other_blocks_alone() {
        let fox = render_block(&record("fox"));
        let owl = render_block(&record("owl"));
        let text = upsert_block(&upsert_block(NARRATIVE_HEADER, &fox), &owl);

        let mut changed = record("fox");
        changed.images = vec!["https://i.ibb.co/x.png".into()];
        let updated = upsert_block(&text, &render_block(&changed));

        assert!(updated.starts_with(NARRATIVE_HEADER));
        assert!(updated.contains(&owl));
        assert_eq!(updated.matches("IMAGE URLs:").count(), 2);
        assert_eq!(updated.matches("https://i.ibb.co/x.png").count(), 1);
    }

    #[test]
    fn test_upsert_separates_appended_blocks() {
        let fox = render_block(&record("fox"));
        let text = upsert_block("# Weekly log file initialized", &fox);
        assert!(text.starts_with("# Weekly log file initialized\n\n=== "));
    }
}
