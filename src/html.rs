// DOM helpers shared by the table locator, the row extractor and the
// metadata extractor.

use scraper::{ElementRef, Html, Selector};

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated text of an element and its descendants, whitespace-normalized.
pub fn element_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    normalize_ws(&raw)
}

pub fn child_elements<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name().eq_ignore_ascii_case(tag))
        .collect()
}

pub fn element_children(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap).collect()
}

pub fn select_text(doc: &Html, selector: &Selector) -> String {
    doc.select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Text of the last match of `selector`. An element's own text nodes win;
/// when they are blank the walk descends into its children, last child first.
/// `None` only when the whole subtree is empty.
pub fn nested_text(doc: &Html, selector: &Selector) -> Option<String> {
    let last = doc.select(selector).last()?;
    first_text(last)
}

fn first_text(el: ElementRef<'_>) -> Option<String> {
    let own: String = el
        .children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect();
    let own = normalize_ws(&own);
    if !own.is_empty() {
        return Some(own);
    }
    element_children(el).into_iter().rev().find_map(first_text)
}

/// Value of `key` in the query string of `href`. Fragment is ignored; no
/// percent decoding is applied (the site only puts digits there).
pub fn query_param(href: &str, key: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim().to_string())
}
