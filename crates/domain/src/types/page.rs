//! Wire shapes of paginated responses
//!
//! Each shape requires its item array (`items`, `data` or `results`); a body
//! without it fails to decode, which the transport reports as a malformed
//! response. Continuation pointers are optional at every level, and their
//! absence is the normal end of pagination.

use serde::{Deserialize, Serialize};

/// A decoded page of a link-following listing
pub trait Page {
    type Item;

    /// URL of the following page; `None` ends pagination
    fn next_url(&self) -> Option<&str>;

    fn into_items(self) -> Vec<Self::Item>;
}

/// `{ items: [...], next?: url }` as returned by OSS and document management
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> Page for CursorPage<T> {
    type Item = T;

    fn next_url(&self) -> Option<&str> {
        non_empty(self.next.as_deref())
    }

    fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// `{ data: [...], links?: { next?: { href: url } } }` (JSON:API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonApiPage<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonApiLinks>,
}

impl<T> Page for JsonApiPage<T> {
    type Item = T;

    fn next_url(&self) -> Option<&str> {
        self.links.as_ref().and_then(|links| links.next.as_ref()).and_then(NextLink::href)
    }

    fn into_items(self) -> Vec<T> {
        self.data
    }
}

/// `links` object of a JSON:API page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextLink>,
}

/// Continuation pointer of a JSON:API page
///
/// Data management nests the URL in `{ "href": ... }`; webhooks put the URL
/// string directly under `next`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextLink {
    Object {
        #[serde(default)]
        href: Option<String>,
    },
    Url(String),
}

impl NextLink {
    /// URL carried by the link, if any
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Object { href } => non_empty(href.as_deref()),
            Self::Url(url) => non_empty(Some(url)),
        }
    }
}

/// `{ results: [...], pagination?: {...} }` as returned by BIM 360 admin and reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsPage<T> {
    pub results: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ResultsPage<T> {
    /// Server-reported total across all pages
    #[must_use]
    pub fn total_results(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.total_results)
    }
}

impl<T> Page for ResultsPage<T> {
    type Item = T;

    fn next_url(&self) -> Option<&str> {
        self.pagination.as_ref().and_then(|p| non_empty(p.next.as_deref()))
    }

    fn into_items(self) -> Vec<T> {
        self.results
    }
}

/// Pagination metadata attached to a [`ResultsPage`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_cursor_page_next() {
        let page: CursorPage<i32> =
            serde_json::from_value(json!({"items": [1, 2], "next": "https://x/p2"})).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.next_url(), Some("https://x/p2"));

        let last: CursorPage<i32> =
            serde_json::from_value(json!({"items": [3], "next": null})).unwrap();
        assert_eq!(last.next_url(), None);
    }

    #[test]
    fn test_cursor_page_requires_items() {
        let result = serde_json::from_value::<CursorPage<i32>>(json!({"next": "p2"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_json_api_href_link() {
        let page: JsonApiPage<Value> = serde_json::from_value(json!({
            "data": [{"id": "a"}],
            "links": {"next": {"href": "https://x/p2"}}
        }))
        .unwrap();
        assert_eq!(page.next_url(), Some("https://x/p2"));
    }

    #[test]
    fn test_json_api_bare_string_link() {
        let page: JsonApiPage<Value> = serde_json::from_value(json!({
            "data": [],
            "links": {"next": "https://x/p2"}
        }))
        .unwrap();
        assert_eq!(page.next_url(), Some("https://x/p2"));
    }

    #[test]
    fn test_json_api_missing_levels_terminate() {
        for body in [
            json!({"data": []}),
            json!({"data": [], "links": {}}),
            json!({"data": [], "links": {"next": null}}),
            json!({"data": [], "links": {"next": {}}}),
            json!({"data": [], "links": {"next": {"href": null}}}),
        ] {
            let page: JsonApiPage<Value> = serde_json::from_value(body).unwrap();
            assert_eq!(page.next_url(), None);
        }
    }

    #[test]
    fn test_results_page_metadata() {
        let page: ResultsPage<Value> = serde_json::from_value(json!({
            "results": [{"id": 1}],
            "pagination": {"totalResults": 250, "limit": 100, "offset": 0, "next": ""}
        }))
        .unwrap();
        assert_eq!(page.total_results(), Some(250));
        assert_eq!(page.next_url(), None);
    }

    #[test]
    fn test_into_items_yields_the_item_array() {
        let cursor: CursorPage<i32> =
            serde_json::from_value(json!({"items": [1, 2], "next": "p2"})).unwrap();
        let json_api: JsonApiPage<i32> = serde_json::from_value(json!({"data": [3]})).unwrap();
        let results: ResultsPage<i32> =
            serde_json::from_value(json!({"results": [4, 5], "pagination": {}})).unwrap();

        assert_eq!(cursor.into_items(), vec![1, 2]);
        assert_eq!(json_api.into_items(), vec![3]);
        assert_eq!(results.into_items(), vec![4, 5]);
    }
}
