//! Catalog page scrapers.
//!
//! Scraping is split the same way the run is:
//!
//! 1. **Discovery** ([`pagination`]): read the page count from page 1
//! 2. **Extraction** ([`titles`]): pull the cover titles out of every page
//!
//! Both walk the parsed tree through [`markup::MarkupNode`] instead of CSS
//! selectors, and both are pure functions of the parsed document; the fetch
//! happens in the thin async wrappers [`pagination::discover`] and
//! [`titles::scrape_page`].

pub mod markup;
pub mod pagination;
pub mod titles;
