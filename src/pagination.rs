//! Pagination utilities for OData collection responses.

use serde::Serialize;

/// A page of results from a Project Server collection.
///
/// The server drives paging: when more items exist, the response carries a
/// next link (`__next` in verbose JSON) which is followed as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Absolute URL of the next page, if the server reported one.
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    /// Create a new page from items and the next link.
    #[must_use]
    pub fn new(items: Vec<T>, next_link: Option<String>) -> Self {
        Self { items, next_link }
    }

    /// Whether the server reported another page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_link.is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_link: self.next_link,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_more() {
        let page: Page<i32> = Page::new(vec![1; 100], Some("https://x.test/next".to_string()));
        assert!(page.has_more());

        let page: Page<i32> = Page::new(vec![1; 50], None);
        assert!(!page.has_more());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], None);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert!(!mapped.has_more());
    }
}
