//! Demand-driven iteration over paginated endpoints.
//!
//! [`paginate`] turns a page source into a [`Stream`] of items. Pages are
//! fetched one at a time, only when the consumer asks for the item after
//! the last one of the current page. A failed fetch yields one `Err` and
//! ends the stream.
#![allow(clippy::future_not_send)]

use futures::stream::{self, Stream};

use super::params::PageOptions;
use super::types::Page;
use crate::error::Result;

/// A paginated endpoint.
///
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[trait_variant::make(PageSource: Send)]
pub trait LocalPageSource {
    /// Item type of one page.
    type Item;

    /// Fetches page `page` (1-indexed).
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call or decoding fails.
    async fn fetch_page(&self, page: u32) -> Result<Page<Self::Item>>;
}

/// Pagination state.
enum Cursor<T> {
    /// About to request page `page`; `fetched` pages requested so far.
    Fetching { page: u32, fetched: u32 },
    /// Handing out the items of page `page`.
    Yielding {
        items: std::vec::IntoIter<T>,
        page: u32,
        total_pages: u32,
        fetched: u32,
    },
    /// Exhausted, failed or stopped by `max_pages`.
    Done,
}

/// Streams every item of `source`, page by page.
///
/// Ends after the last page (`page >= total_pages`), after an empty page,
/// after `options.max_pages` pages, or after the first error.
pub fn paginate<S: LocalPageSource>(
    source: S,
    options: PageOptions,
) -> impl Stream<Item = Result<S::Item>> {
    let max_pages = options.max_pages;
    let start = if max_pages == Some(0) {
        Cursor::Done
    } else {
        Cursor::Fetching {
            page: options.start_page.max(1),
            fetched: 0,
        }
    };

    stream::unfold((source, start), move |(source, mut cursor)| async move {
        loop {
            match cursor {
                Cursor::Done => return None,
                Cursor::Fetching { page, fetched } => {
                    tracing::debug!(page, "fetching page");
                    let result = source.fetch_page(page).await;
                    let fetched = fetched.saturating_add(1);
                    match result {
                        Err(err) => {
                            tracing::debug!(page, error = %err, "page fetch failed");
                            return Some((Err(err), (source, Cursor::Done)));
                        }
                        Ok(Page {
                            results,
                            total_pages,
                            ..
                        }) => {
                            tracing::debug!(page, items = results.len(), total_pages, "page fetched");
                            if results.is_empty() {
                                if page < total_pages {
                                    tracing::warn!(
                                        page,
                                        total_pages,
                                        "empty page before the last page, stopping"
                                    );
                                }
                                cursor = Cursor::Done;
                            } else {
                                cursor = Cursor::Yielding {
                                    items: results.into_iter(),
                                    page,
                                    total_pages,
                                    fetched,
                                };
                            }
                        }
                    }
                }
                Cursor::Yielding {
                    mut items,
                    page,
                    total_pages,
                    fetched,
                } => {
                    if let Some(item) = items.next() {
                        let next = Cursor::Yielding {
                            items,
                            page,
                            total_pages,
                            fetched,
                        };
                        return Some((Ok(item), (source, next)));
                    }
                    let capped = max_pages.is_some_and(|max| fetched >= max);
                    cursor = match page.checked_add(1) {
                        Some(next) if next <= total_pages && !capped => Cursor::Fetching {
                            page: next,
                            fetched,
                        },
                        _ => {
                            tracing::debug!(pages = fetched, "pagination complete");
                            Cursor::Done
                        }
                    };
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::Mutex;

    use futures::StreamExt;

    use super::*;
    use crate::error::Error;

    /// In-memory source serving pre-built pages and recording requests.
    struct MockSource {
        pages: Vec<Vec<u32>>,
        fail_on: Option<u32>,
        requested: Mutex<Vec<u32>>,
    }

    impl MockSource {
        fn new(pages: Vec<Vec<u32>>) -> Self {
            Self {
                pages,
                fail_on: None,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_on = Some(page);
            self
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl LocalPageSource for &MockSource {
        type Item = u32;

        async fn fetch_page(&self, page: u32) -> Result<Page<u32>> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(Error::UnexpectedStatus {
                    code: 500,
                    message: None,
                });
            }
            let total_pages = u32::try_from(self.pages.len()).unwrap();
            let results = usize::try_from(page)
                .ok()
                .and_then(|p| p.checked_sub(1))
                .and_then(|i| self.pages.get(i))
                .cloned()
                .unwrap_or_default();
            Ok(Page {
                page,
                total_results: 0,
                results,
                total_pages,
            })
        }
    }

    fn numbered(sizes: &[u32]) -> Vec<Vec<u32>> {
        let mut next = 0;
        sizes
            .iter()
            .map(|&size| {
                (0..size)
                    .map(|_| {
                        next += 1;
                        next
                    })
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_yields_all_pages_in_order() {
        // Arrange
        let source = MockSource::new(numbered(&[20, 20, 5]));

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default()).collect().await;

        // Assert
        let items: Vec<u32> = items.into_iter().map(Result::unwrap).collect();
        assert_eq!(items, (1..=45).collect::<Vec<_>>());
        assert_eq!(source.requested(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_first_page_ends_cleanly() {
        // Arrange
        let source = MockSource::new(vec![vec![]]);

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default()).collect().await;

        // Assert
        assert!(items.is_empty());
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_start_page_beyond_total_yields_nothing() {
        // Arrange
        let source = MockSource::new(numbered(&[3, 3]));

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default().start_page(5))
            .collect()
            .await;

        // Assert
        assert!(items.is_empty());
        assert_eq!(source.requested(), vec![5]);
    }

    #[tokio::test]
    async fn test_start_page_zero_is_raised_to_one() {
        // Arrange
        let source = MockSource::new(numbered(&[2]));

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default().start_page(0))
            .collect()
            .await;

        // Assert
        assert_eq!(items.len(), 2);
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_error_yields_once_then_ends() {
        // Arrange
        let source = MockSource::new(numbered(&[2, 2, 2])).failing_on(2);

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default()).collect().await;

        // Assert
        assert_eq!(items.len(), 3);
        assert_eq!(*items[0].as_ref().unwrap(), 1);
        assert_eq!(*items[1].as_ref().unwrap(), 2);
        assert!(matches!(
            items[2],
            Err(Error::UnexpectedStatus { code: 500, .. })
        ));
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetches_only_on_demand() {
        // Arrange
        let source = MockSource::new(numbered(&[20, 20]));

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default())
            .take(3)
            .collect()
            .await;

        // Assert
        assert_eq!(items.len(), 3);
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_max_pages_caps_fetches() {
        // Arrange
        let source = MockSource::new(numbered(&[2, 2, 2]));

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default().max_pages(2))
            .collect()
            .await;

        // Assert
        assert_eq!(items.len(), 4);
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_max_pages_zero_fetches_nothing() {
        // Arrange
        let source = MockSource::new(numbered(&[2]));

        // Act
        let items: Vec<_> = paginate(&source, PageOptions::default().max_pages(0))
            .collect()
            .await;

        // Assert
        assert!(items.is_empty());
        assert!(source.requested().is_empty());
    }
}
