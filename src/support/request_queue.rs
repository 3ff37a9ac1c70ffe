//! Sliding window over the last 1440 requests (one simulated day at one
//! request per minute), grounded on `RequestQueue` in
//! `original_source/search-server/request_queue.h/.cpp`: a `deque` of
//! per-request "was this empty" flags, with a running count of empty
//! results kept in sync as the window slides.

use std::collections::VecDeque;

use crate::core::error::Result;
use crate::core::types::{DocumentId, DocumentStatus};
use crate::scoring::scorer::FoundDocument;
use crate::server::SearchServer;

const WINDOW: usize = 1440;

pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<bool>,
    no_result_requests: usize,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        RequestQueue {
            server,
            requests: VecDeque::with_capacity(WINDOW),
            no_result_requests: 0,
        }
    }

    fn record(&mut self, is_empty: bool) {
        self.requests.push_back(is_empty);
        if is_empty {
            self.no_result_requests += 1;
        }
        if self.requests.len() > WINDOW {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<FoundDocument>> {
        let result = self.server.find_top_documents_default(raw_query)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<FoundDocument>> {
        let result = self.server.find_top_documents_with_status(raw_query, status)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn add_find_request_with<F>(&mut self, raw_query: &str, predicate: F) -> Result<Vec<FoundDocument>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let result = self.server.find_top_documents_with(raw_query, predicate)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }
}
