//! Continuation-token pagination
//!
//! List calls return pages chained by an opaque token. [`collect_pages`]
//! walks a finite page stream and checks that the chain is well formed.

use tf_exporter_common::{ExportError, Result};
use tracing::debug;

/// One page of a list response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Token for the next page; `None` on the final page
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        // Some APIs return an empty marker on the last page
        let next_token = next_token.filter(|t| !t.is_empty());
        Self { items, next_token }
    }

    /// A final page
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

/// Concatenate the items of a page chain.
///
/// Fails when a page follows the final page, when a token is repeated, or
/// when the stream ends while a continuation token is still pending.
pub fn collect_pages<T, I>(operation: &str, pages: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = Page<T>>,
{
    let mut items = Vec::new();
    let mut seen_tokens: Vec<String> = Vec::new();
    let mut pending: Option<Option<String>> = None;

    for (number, page) in pages.into_iter().enumerate() {
        if let Some(None) = pending {
            return Err(ExportError::provider(
                operation,
                format!("page {} follows the final page", number + 1),
            ));
        }

        if let Some(token) = &page.next_token {
            if seen_tokens.contains(token) {
                return Err(ExportError::provider(
                    operation,
                    format!("continuation token '{token}' repeated"),
                ));
            }
            seen_tokens.push(token.clone());
        }

        debug!(operation, page = number + 1, items = page.items.len(), "collected page");
        pending = Some(page.next_token);
        items.extend(page.items);
    }

    if let Some(Some(token)) = pending {
        return Err(ExportError::provider(
            operation,
            format!("continuation token '{token}' has no following page"),
        ));
    }

    Ok(items)
}
