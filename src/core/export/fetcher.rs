//! Page fetching
//!
//! Both pagination strategies sit behind one request type. The fetcher holds
//! no cursor; the orchestrator passes the cursor in and threads the returned
//! one into the next request.

use crate::adapters::database::traits::RowSource;
use crate::domain::ids::EntityId;
use crate::domain::rows::{ChildRows, ReportRow};
use crate::domain::Result;
use std::sync::Arc;

/// What to fetch for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// Window of `page_size` reports starting at `page_index * page_size`
    Offset { page_index: u64, page_size: u64 },
    /// The single report whose identity follows `last_id`
    Keyset { last_id: EntityId },
}

/// Rows returned for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedPage {
    pub reports: Vec<ReportRow>,
    pub children: ChildRows,
    /// Cursor for the next keyset request, `None` in offset mode or when the
    /// table is exhausted
    pub next_cursor: Option<EntityId>,
}

impl FetchedPage {
    /// Whether the fetch returned no parent rows
    pub fn is_exhausted(&self) -> bool {
        self.reports.is_empty()
    }

    /// Identity of the single report of a keyset page
    pub fn entity_id(&self) -> Option<EntityId> {
        match self.reports.as_slice() {
            [report] => Some(report.scoop_report_id),
            _ => None,
        }
    }
}

/// Fetches pages from a [`RowSource`]
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn RowSource + Send + Sync>,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn RowSource + Send + Sync>) -> Self {
        Self { source }
    }

    /// Fetch one page and its child rows
    ///
    /// Children are fetched only for the reports actually returned, one
    /// query per collection.
    ///
    /// # Errors
    ///
    /// Returns the row source error of the first failing query.
    pub async fn fetch(&self, request: PageRequest) -> Result<FetchedPage> {
        let (reports, next_cursor) = match request {
            PageRequest::Offset {
                page_index,
                page_size,
            } => {
                let offset = page_index.saturating_mul(page_size);
                let reports = self.source.fetch_reports_page(offset, page_size).await?;
                (reports, None)
            }
            PageRequest::Keyset { last_id } => {
                match self.source.fetch_report_after(last_id).await? {
                    Some(report) => {
                        let cursor = report.scoop_report_id;
                        (vec![report], Some(cursor))
                    }
                    None => (Vec::new(), None),
                }
            }
        };

        if reports.is_empty() {
            return Ok(FetchedPage::default());
        }

        let ids: Vec<EntityId> = reports.iter().map(|r| r.scoop_report_id).collect();
        let children = ChildRows {
            articles: self.source.fetch_articles(&ids).await?,
            profiles: self.source.fetch_profiles(&ids).await?,
            details: self.source.fetch_profile_details(&ids).await?,
        };

        tracing::debug!(
            request = ?request,
            reports = reports.len(),
            children = children.len(),
            "Fetched page"
        );

        Ok(FetchedPage {
            reports,
            children,
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rows::fixtures::{article, detail, profile, report};
    use crate::domain::rows::{ArticleRow, DetailRow, ProfileRow};
    use crate::domain::RelexError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct TableSource {
        ids: Vec<EntityId>,
        calls: Mutex<Vec<String>>,
    }

    impl TableSource {
        fn with_ids(ids: &[EntityId]) -> Self {
            Self {
                ids: ids.to_vec(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl RowSource for TableSource {
        async fn test_connection(&self) -> Result<()> {
            Ok(())
        }

        async fn count_reports(&self) -> Result<u64> {
            Ok(self.ids.len() as u64)
        }

        async fn fetch_reports_page(&self, offset: u64, limit: u64) -> Result<Vec<ReportRow>> {
            self.record(format!("page {offset} {limit}"));
            Ok(self
                .ids
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .map(|id| report(*id))
                .collect())
        }

        async fn fetch_report_after(&self, last_id: EntityId) -> Result<Option<ReportRow>> {
            self.record(format!("after {last_id}"));
            Ok(self.ids.iter().find(|id| **id > last_id).map(|id| report(*id)))
        }

        async fn report_id_at(&self, ordinal: u64) -> Result<Option<EntityId>> {
            Ok(self.ids.get(ordinal as usize).copied())
        }

        async fn fetch_articles(&self, report_ids: &[EntityId]) -> Result<Vec<ArticleRow>> {
            self.record(format!("articles {report_ids:?}"));
            Ok(report_ids.iter().map(|id| article(id * 100, *id)).collect())
        }

        async fn fetch_profiles(&self, report_ids: &[EntityId]) -> Result<Vec<ProfileRow>> {
            Ok(report_ids.iter().map(|id| profile(id * 100, *id)).collect())
        }

        async fn fetch_profile_details(&self, report_ids: &[EntityId]) -> Result<Vec<DetailRow>> {
            if report_ids.contains(&13) {
                return Err(RelexError::Database("details unavailable".to_string()));
            }
            Ok(report_ids.iter().map(|id| detail(id * 1000, id * 100)).collect())
        }

        fn describe(&self) -> String {
            "table".to_string()
        }
    }

    #[tokio::test]
    async fn test_offset_page_fetches_window_and_children() {
        let source = Arc::new(TableSource::with_ids(&[1, 2, 3, 4, 5]));
        let fetcher = PageFetcher::new(source.clone());

        let page = fetcher
            .fetch(PageRequest::Offset {
                page_index: 1,
                page_size: 2,
            })
            .await
            .unwrap();

        let ids: Vec<_> = page.reports.iter().map(|r| r.scoop_report_id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(page.children.articles.len(), 2);
        assert_eq!(page.children.details.len(), 2);
        assert_eq!(page.next_cursor, None);
        assert_eq!(page.entity_id(), None);
        assert_eq!(
            source.calls.lock().unwrap().as_slice(),
            ["page 2 2".to_string(), "articles [3, 4]".to_string()]
        );
    }

    #[tokio::test]
    async fn test_keyset_walks_ids_until_exhausted() {
        let fetcher = PageFetcher::new(Arc::new(TableSource::with_ids(&[5, 9, 20])));

        let mut cursor = 0;
        let mut seen = Vec::new();
        loop {
            let page = fetcher
                .fetch(PageRequest::Keyset { last_id: cursor })
                .await
                .unwrap();
            if page.is_exhausted() {
                break;
            }
            seen.push(page.entity_id().unwrap());
            cursor = page.next_cursor.unwrap();
        }

        assert_eq!(seen, vec![5, 9, 20]);
    }

    #[tokio::test]
    async fn test_empty_page_skips_child_queries() {
        let source = Arc::new(TableSource::with_ids(&[1]));
        let fetcher = PageFetcher::new(source.clone());

        let page = fetcher
            .fetch(PageRequest::Offset {
                page_index: 3,
                page_size: 10,
            })
            .await
            .unwrap();

        assert!(page.is_exhausted());
        assert!(page.children.is_empty());
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_child_query_error_propagates() {
        let fetcher = PageFetcher::new(Arc::new(TableSource::with_ids(&[13])));

        let err = fetcher
            .fetch(PageRequest::Keyset { last_id: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err, RelexError::Database(_)));
    }
}
