//! Page-count discovery.
//!
//! The catalog renders its pagination as a `<select id="page-select">` whose
//! `<option>`s list the page numbers in ascending order. The last option
//! therefore holds the page count.

use super::markup::{Document, MarkupNode, children_rev, find_first};
use crate::config::Selectors;
use crate::error::{CatalogError, Result};
use crate::fetch::Fetch;
use crate::models::PageCount;
use crate::utils::truncate_for_log;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Fetch `url` and read the catalog's page count from it.
///
/// # Errors
///
/// - transport errors from fetching `url`, unchanged
/// - [`CatalogError::NoPagesFound`] if the page has no pagination control
/// - [`CatalogError::InvalidPageCount`] if the control's last option is not a positive integer
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn discover<F: Fetch>(fetcher: &F, url: &Url, selectors: &Selectors) -> Result<PageCount> {
    let body = fetcher.fetch(url).await?;
    let document = Document::parse(&body);
    let count = page_count(document.root(), selectors)?;
    info!(pages = count.get(), "Discovered catalog page count");
    Ok(count)
}

/// Page count of an already parsed document.
pub fn page_count<'a, N: MarkupNode<'a>>(root: N, selectors: &Selectors) -> Result<PageCount> {
    let control = find_page_select(root, &selectors.page_select_id).ok_or_else(|| {
        warn!(id = %selectors.page_select_id, "No pagination control on page");
        CatalogError::NoPagesFound
    })?;
    count_from_control(control)
}

/// First `<select>` (pre-order) whose `id` is `id`.
fn find_page_select<'a, N: MarkupNode<'a>>(root: N, id: &str) -> Option<N> {
    find_first(root, |node| node.is_element("select") && node.attr("id") == Some(id))
}

fn count_from_control<'a, N: MarkupNode<'a>>(control: N) -> Result<PageCount> {
    // Options are assumed ascending, so only the last one is read.
    let last_option = children_rev(control)
        .find(|child| child.is_element("option"))
        .ok_or(CatalogError::InvalidPageCount)?;

    let text = last_option
        .first_child()
        .and_then(MarkupNode::text)
        .ok_or(CatalogError::InvalidPageCount)?;

    let count = text
        .parse::<i64>()
        .ok()
        .and_then(PageCount::new)
        .ok_or_else(|| {
            warn!(text = %truncate_for_log(text, 40), "Last page option is not a positive integer");
            CatalogError::InvalidPageCount
        })?;

    debug!(%count, "Read page count from last option");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::markup::fixture;

    fn count_of(html: &str) -> Result<PageCount> {
        let doc = Document::parse(html.as_bytes());
        page_count(doc.root(), &Selectors::default())
    }

    fn select(options: &str) -> String {
        format!(
            r#"<html><body><form><select id="page-select">{options}</select></form></body></html>"#
        )
    }

    #[test]
    fn test_last_option_wins() {
        let html = select("<option>1</option><option>2</option><option>57</option>");
        assert_eq!(count_of(&html).unwrap().get(), 57);
    }

    #[test]
    fn test_only_last_option_is_read() {
        // Earlier options are never inspected, even if they are bigger or garbage.
        let html = select("<option>999</option><option>oops</option><option>4</option>");
        assert_eq!(count_of(&html).unwrap().get(), 4);
    }

    #[test]
    fn test_single_option() {
        let html = select("<option>1</option>");
        assert_eq!(count_of(&html).unwrap().get(), 1);
    }

    #[test]
    fn test_trailing_non_option_children_are_skipped() {
        let html = select("<option>1</option><option>3</option>\n  <!-- end -->\n");
        assert_eq!(count_of(&html).unwrap().get(), 3);
    }

    #[test]
    fn test_missing_text_is_invalid() {
        let html = select("<option>1</option><option></option>");
        assert!(matches!(count_of(&html), Err(CatalogError::InvalidPageCount)));
    }

    #[test]
    fn test_non_numeric_text_is_invalid() {
        let html = select("<option>1</option><option>last</option>");
        assert!(matches!(count_of(&html), Err(CatalogError::InvalidPageCount)));
    }

    #[test]
    fn test_zero_is_invalid() {
        let html = select("<option>0</option>");
        assert!(matches!(count_of(&html), Err(CatalogError::InvalidPageCount)));
    }

    #[test]
    fn test_negative_is_invalid() {
        let html = select("<option>-3</option>");
        assert!(matches!(count_of(&html), Err(CatalogError::InvalidPageCount)));
    }

    #[test]
    fn test_whitespace_around_number_is_invalid() {
        let html = select("<option> 3 </option>");
        assert!(matches!(count_of(&html), Err(CatalogError::InvalidPageCount)));
    }

    #[test]
    fn test_control_without_options_is_invalid() {
        let html = select("");
        assert!(matches!(count_of(&html), Err(CatalogError::InvalidPageCount)));
    }

    #[test]
    fn test_first_child_must_be_text() {
        let mut tree = fixture::Tree::new();
        let control = tree.element(fixture::ROOT, "select", &[("id", "page-select")]);
        let option = tree.element(control, "option", &[]);
        let span = tree.element(option, "span", &[]);
        tree.text(span, "3");

        let result = page_count(tree.root(), &Selectors::default());
        assert!(matches!(result, Err(CatalogError::InvalidPageCount)));
    }

    #[test]
    fn test_no_control_is_no_pages() {
        let html = "<html><body><p>Nothing to paginate</p></body></html>";
        assert!(matches!(count_of(html), Err(CatalogError::NoPagesFound)));
    }

    #[test]
    fn test_select_with_other_id_is_no_pages() {
        let html = r#"<select id="sort-by"><option>2</option></select>"#;
        assert!(matches!(count_of(html), Err(CatalogError::NoPagesFound)));
    }

    #[test]
    fn test_id_on_non_select_is_ignored() {
        let html = r#"<div id="page-select"><option>2</option></div>"#;
        assert!(matches!(count_of(html), Err(CatalogError::NoPagesFound)));
    }

    #[test]
    fn test_deeply_nested_control_is_found() {
        let mut html = String::new();
        for _ in 0..40 {
            html.push_str("<div>");
        }
        html.push_str(r#"<select id="page-select"><option>1</option><option>12</option></select>"#);
        for _ in 0..40 {
            html.push_str("</div>");
        }
        assert_eq!(count_of(&html).unwrap().get(), 12);
    }

    #[test]
    fn test_first_matching_control_is_used() {
        let html = r#"
            <select id="page-select"><option>1</option><option>5</option></select>
            <select id="page-select"><option>1</option><option>9</option></select>
        "#;
        assert_eq!(count_of(html).unwrap().get(), 5);
    }
}
