//! Simulated page source
//!
//! Stands in for a network fetch: each request sleeps for the configured
//! latency and then delivers a page of numbered items. Every `drop_every`-th
//! load-more request is swallowed so the trigger's timeout path gets
//! exercised. The initial page is always delivered: nothing would re-request
//! it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;

use edgescroll::Direction;
use edgescroll::config::DemoConfig;
use edgescroll::log;

/// A request produced by the trigger's load action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub direction: Direction,
    /// Zero-based page index; page 0 is the initial fetch
    pub page: u32,
}

/// Items delivered for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub request: FetchRequest,
    pub items: Vec<String>,
}

/// Serves pages over a channel after a simulated delay.
#[derive(Clone)]
pub struct PageService {
    page_size: usize,
    latency: Duration,
    drop_every: u32,
    issued: Arc<AtomicU32>,
    tx: mpsc::Sender<Page>,
}

impl PageService {
    pub fn new(config: &DemoConfig, tx: mpsc::Sender<Page>) -> Self {
        Self {
            page_size: config.page_size.max(1),
            latency: Duration::from_millis(config.latency_ms),
            drop_every: config.drop_every,
            issued: Arc::new(AtomicU32::new(0)),
            tx,
        }
    }

    /// Start a fetch. Returns `false` if this request will never complete.
    pub fn fetch(&self, request: FetchRequest) -> bool {
        if request.page > 0 && self.should_drop() {
            log::log(&format!("Dropping fetch for page {}", request.page));
            return false;
        }

        let items = items_for(request, self.page_size);
        let latency = self.latency;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            if tx.send(Page { request, items }).await.is_err() {
                log::log("Page receiver dropped");
            }
        });
        true
    }

    /// Count a load-more request and decide whether it is swallowed.
    fn should_drop(&self) -> bool {
        let count = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.drop_every > 0 && count % self.drop_every == 0
    }
}

/// Build the items for a page in display order.
///
/// Bottom pages continue the numbering downward. Top pages are prepended, so
/// the highest number sits first and older items appear further up.
pub fn items_for(request: FetchRequest, page_size: usize) -> Vec<String> {
    let start = request.page as usize * page_size + 1;
    let numbers = start..start + page_size;
    match request.direction {
        Direction::Bottom => numbers.map(|n| format!("Item {:>5}", n)).collect(),
        Direction::Top => numbers.rev().map(|n| format!("Message {:>5}", n)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_for_bottom_page() {
        let items = items_for(FetchRequest { direction: Direction::Bottom, page: 1 }, 3);
        assert_eq!(items, vec!["Item     4", "Item     5", "Item     6"]);
    }

    #[test]
    fn test_items_for_top_page_is_reversed() {
        let items = items_for(FetchRequest { direction: Direction::Top, page: 0 }, 2);
        assert_eq!(items, vec!["Message     2", "Message     1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_every_second_fetch() {
        let (tx, mut rx) = mpsc::channel(4);
        let config = DemoConfig { page_size: 2, latency_ms: 10, drop_every: 2 };
        let service = PageService::new(&config, tx);

        let initial = FetchRequest { direction: Direction::Bottom, page: 0 };
        let first = FetchRequest { direction: Direction::Bottom, page: 1 };
        let second = FetchRequest { direction: Direction::Bottom, page: 2 };
        assert!(service.fetch(initial));
        assert!(service.fetch(first));
        assert!(!service.fetch(second));

        assert_eq!(rx.recv().await.unwrap().request, initial);
        let page = rx.recv().await.unwrap();
        assert_eq!(page.request, first);
        assert_eq!(page.items.len(), 2);

        let nothing = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(nothing.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_page_survives_drop_every_one() {
        let (tx, mut rx) = mpsc::channel(4);
        let config = DemoConfig { page_size: 3, latency_ms: 10, drop_every: 1 };
        let service = PageService::new(&config, tx);

        let initial = FetchRequest { direction: Direction::Top, page: 0 };
        assert!(service.fetch(initial));
        assert!(!service.fetch(FetchRequest { direction: Direction::Top, page: 1 }));

        let page = rx.recv().await.unwrap();
        assert_eq!(page.request, initial);
        assert_eq!(page.items.len(), 3);
    }
}
