//! Simulated paged data source.
//!
//! Runs on its own task, answering load jobs after a delay. Page data goes
//! back to the UI over a separate channel before the job is completed, so the
//! items are in place by the time the list learns the load finished.

use std::time::Duration;

use pullswipe::{LoadJob, LoadKind, LoadReceiver};
use tokio::sync::mpsc;

pub const PAGE_SIZE: usize = 15;
const LAST_PAGE: u32 = 4;
const LATENCY: Duration = Duration::from_millis(600);

/// A page of items delivered to the UI.
#[derive(Debug)]
pub struct Page {
    pub kind: LoadKind,
    pub items: Vec<String>,
}

pub fn spawn(mut jobs: LoadReceiver, pages: mpsc::UnboundedSender<Page>) {
    tokio::spawn(async move {
        let mut served = 0u32;
        while let Some(job) = jobs.recv().await {
            tokio::time::sleep(LATENCY).await;
            served += 1;
            answer(job, served, &pages);
        }
        log::debug!("source: list gone, stopping");
    });
}

fn answer(job: LoadJob, served: u32, pages: &mpsc::UnboundedSender<Page>) {
    let request = job.request;
    log::info!("source: {:?} page {}", request.kind, request.page);

    // Every fifth load-more fails so the retry footer can be tried.
    if request.kind == LoadKind::LoadMore && served % 5 == 0 {
        job.fail(503, "source unavailable");
        return;
    }

    let first = (request.page as usize - 1) * PAGE_SIZE;
    let items = (first..first + PAGE_SIZE)
        .map(|n| format!("Item {:>3}", n + 1))
        .collect();
    if pages
        .send(Page {
            kind: request.kind,
            items,
        })
        .is_err()
    {
        return;
    }
    job.finish(request.page < LAST_PAGE, true);
}
