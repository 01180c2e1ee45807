//! Paging envelopes.

use serde::Deserialize;

/// Offset-paged collection as sent on the wire.
///
/// `items` is `None` only when the API omitted the field entirely; an empty
/// page arrives as `Some(vec![])`. The distinction is preserved through
/// mapping so callers can tell "no field" from "no results".
#[derive(Debug, Clone, Deserialize)]
pub struct WirePage<T> {
    pub href: String,
    pub items: Option<Vec<T>>,
    pub limit: u32,
    pub next: Option<String>,
    pub offset: u32,
    pub previous: Option<String>,
    pub total: u32,
}

/// Mapped offset-paged collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub href: String,
    pub items: Option<Vec<T>>,
    pub limit: u32,
    pub next: Option<String>,
    pub offset: u32,
    pub previous: Option<String>,
    pub total: u32,
}

impl<W> WirePage<W> {
    /// Map every item into its domain shape, leaving the envelope metadata
    /// untouched.
    pub fn map_into<T: From<W>>(self) -> Page<T> {
        Page {
            href: self.href,
            items: self
                .items
                .map(|items| items.into_iter().map(T::from).collect()),
            limit: self.limit,
            next: self.next,
            offset: self.offset,
            previous: self.previous,
            total: self.total,
        }
    }
}

/// Cursor-paged collection as sent on the wire. Forward-only: there is no
/// offset and no previous link, only an opaque `after` cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct WireCursorPage<T> {
    pub href: String,
    pub items: Option<Vec<T>>,
    pub limit: u32,
    pub next: Option<String>,
    pub cursors: WireCursors,
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCursors {
    pub after: Option<String>,
}

/// Mapped cursor-paged collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T> {
    pub href: String,
    pub items: Option<Vec<T>>,
    pub limit: u32,
    pub next: Option<String>,
    /// Cursor to pass as `after` on the next call; absent on the last page.
    pub after: Option<String>,
    pub total: Option<u32>,
}

impl<W> WireCursorPage<W> {
    pub fn map_into<T: From<W>>(self) -> CursorPage<T> {
        CursorPage {
            href: self.href,
            items: self
                .items
                .map(|items| items.into_iter().map(T::from).collect()),
            limit: self.limit,
            next: self.next,
            after: self.cursors.after,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The reflexive From impl lets the wire item double as its own domain
    // shape here.
    #[derive(Debug, Clone, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn omitted_items_stay_absent() {
        let page: WirePage<Item> = serde_json::from_value(serde_json::json!({
            "href": "https://example.com/page",
            "limit": 20,
            "next": null,
            "offset": 0,
            "previous": null,
            "total": 0
        }))
        .unwrap();

        let mapped: Page<Item> = page.map_into();
        assert!(mapped.items.is_none());
    }

    #[test]
    fn empty_page_is_not_absent() {
        let page: WirePage<Item> = serde_json::from_value(serde_json::json!({
            "href": "https://example.com/page",
            "items": [],
            "limit": 20,
            "next": null,
            "offset": 0,
            "previous": null,
            "total": 0
        }))
        .unwrap();

        let mapped: Page<Item> = page.map_into();
        assert_eq!(mapped.items, Some(vec![]));
    }

    #[test]
    fn cursor_page_carries_after_token() {
        let page: WireCursorPage<Item> = serde_json::from_value(serde_json::json!({
            "href": "https://example.com/page",
            "items": [{"id": "a"}],
            "limit": 10,
            "next": "https://example.com/page?after=a",
            "cursors": {"after": "a"},
            "total": 2
        }))
        .unwrap();

        let mapped: CursorPage<Item> = page.map_into();
        assert_eq!(mapped.after.as_deref(), Some("a"));
        assert_eq!(mapped.items.as_ref().map(Vec::len), Some(1));
    }
}
