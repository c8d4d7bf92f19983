//! In-place update of the HTML page.
//!
//! Two regions of the page are rewritten, everything else is kept byte for byte:
//! - The generated data block, from the `// SMM真实数据` comment through the
//!   `        };` line closing `const smmData = {`. Only the first occurrence
//!   is replaced. Leading spaces or tabs on the marker line belong to the
//!   match, so rerunning never shifts the block's indentation.
//! - Every `数据更新时间: YYYY-MM-DD` stamp.
//!
//! A page without a data block is left without one. By default that is not
//! an error (the stamps are still refreshed); [`update_document`] can be asked
//! to fail instead, in which case nothing is written.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Label preceding the displayed update date.
pub const STAMP_LABEL: &str = "数据更新时间: ";

static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)[ \t]*// SMM真实数据.*?const smmData = \{.*?\n        \};")
        .expect("static regex compiles")
});

static STAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"数据更新时间: \d{4}-\d{2}-\d{2}").expect("static regex compiles")
});

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no smmData block found in {}", path.display())]
    BlockNotFound { path: PathBuf },
}

/// What an update did (or, for a dry run, would do).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub block_replaced: bool,
    pub stamps_updated: usize,
    pub written: bool,
}

/// Replaces the first data block with `block`.
///
/// Returns `None` when the page has no block. `block` is inserted literally.
pub fn replace_block(content: &str, block: &str) -> Option<String> {
    let m = BLOCK_RE.find(content)?;
    let mut out = String::with_capacity(content.len() - m.len() + block.len());
    out.push_str(&content[..m.start()]);
    out.push_str(block);
    out.push_str(&content[m.end()..]);
    Some(out)
}

/// Rewrites every update stamp to `update_date`. Returns the new text and the
/// number of stamps found.
pub fn refresh_stamps(content: &str, update_date: &str) -> (String, usize) {
    let count = STAMP_RE.find_iter(content).count();
    if count == 0 {
        return (content.to_string(), 0);
    }
    let replacement = format!("{STAMP_LABEL}{update_date}");
    let out = STAMP_RE.replace_all(content, NoExpand(&replacement));
    (out.into_owned(), count)
}

/// Applies both rewrites to an in-memory page.
pub fn apply_update(content: &str, block: &str, update_date: &str) -> (String, UpdateOutcome) {
    let (with_block, block_replaced) = match replace_block(content, block) {
        Some(s) => (s, true),
        None => (content.to_string(), false),
    };
    let (out, stamps_updated) = refresh_stamps(&with_block, update_date);
    (
        out,
        UpdateOutcome {
            block_replaced,
            stamps_updated,
            written: false,
        },
    )
}

/// Options for [`update_document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Fail with [`DocumentError::BlockNotFound`] when the page has no block.
    pub require_block: bool,
    /// Compute the outcome without writing.
    pub dry_run: bool,
}

/// Reads the page at `path`, rewrites the block and stamps, and writes it back.
///
/// The file is rewritten in place, not via rename.
pub async fn update_document(
    path: &Path,
    block: &str,
    update_date: &str,
    opt: UpdateOptions,
) -> Result<UpdateOutcome, DocumentError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let (updated, mut outcome) = apply_update(&content, block, update_date);

    if !outcome.block_replaced {
        if opt.require_block {
            return Err(DocumentError::BlockNotFound {
                path: path.to_path_buf(),
            });
        }
        warn!(path = %path.display(), "no smmData block found; page data left unchanged");
    }
    debug!(
        block_replaced = outcome.block_replaced,
        stamps = outcome.stamps_updated,
        "page rewritten in memory"
    );

    if opt.dry_run {
        info!(path = %path.display(), "dry run; page not written");
        return Ok(outcome);
    }

    tokio::fs::write(path, updated.as_bytes())
        .await
        .map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    outcome.written = true;
    info!(path = %path.display(), "page updated");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = concat!(
        "<html><body>\n",
        "<span class=\"logo-update\">数据更新时间: 2024-01-01</span>\n",
        "<script>\n",
        "        // SMM真实数据 (2024-01-01获取)\n",
        "        const smmData = {\n",
        "            silver: [\n",
        "                {date: \"2024-01-01\", price: 1.0}\n",
        "            ]\n",
        "        };\n",
        "        render(smmData);\n",
        "</script>\n",
        "<footer>数据更新时间: 2024-01-01</footer>\n",
        "</body></html>\n",
    );

    const NEW_BLOCK: &str =
        "        // SMM真实数据 (2024-06-01获取)\n        const smmData = {\n            silver: []\n        };";

    #[test]
    fn replaces_block_and_keeps_surroundings() {
        let out = replace_block(PAGE, NEW_BLOCK).unwrap();
        let (head, rest) = PAGE.split_once("        // SMM").unwrap();
        let tail = &rest[rest.find("        };").unwrap() + "        };".len()..];
        assert_eq!(out, format!("{head}{NEW_BLOCK}{tail}"));
    }

    #[test]
    fn only_first_block_is_replaced() {
        let doubled = format!("{PAGE}{PAGE}");
        let out = replace_block(&doubled, NEW_BLOCK).unwrap();
        assert_eq!(out.matches("2024-06-01获取").count(), 1);
        assert_eq!(out.matches("2024-01-01获取").count(), 1);
    }

    #[test]
    fn dollar_signs_are_literal() {
        let block = "        // SMM真实数据 ($1)\n        const smmData = {\n        };";
        let out = replace_block(PAGE, block).unwrap();
        assert!(out.contains("($1)"));
    }

    #[test]
    fn missing_block_is_none() {
        assert!(replace_block("<html>const smmData = {};</html>", NEW_BLOCK).is_none());
        // closing brace must sit on its own 8-space line
        let wrong_indent = "// SMM真实数据\nconst smmData = {\n};";
        assert!(replace_block(wrong_indent, NEW_BLOCK).is_none());
    }

    #[test]
    fn refreshes_every_stamp() {
        let (out, n) = refresh_stamps(PAGE, "2024-06-01");
        assert_eq!(n, 2);
        assert_eq!(out.matches("数据更新时间: 2024-06-01").count(), 2);
        assert!(!out.contains("数据更新时间: 2024-01-01"));
    }

    #[test]
    fn malformed_stamp_is_untouched() {
        let page = "数据更新时间: 2024-1-1";
        assert_eq!(refresh_stamps(page, "2024-06-01"), (page.to_string(), 0));
    }

    #[test]
    fn apply_update_is_idempotent() {
        let (once, first) = apply_update(PAGE, NEW_BLOCK, "2024-06-01");
        let (twice, second) = apply_update(&once, NEW_BLOCK, "2024-06-01");
        assert_eq!(once, twice);
        assert!(first.block_replaced && second.block_replaced);
        assert!(!first.written);
    }
}
