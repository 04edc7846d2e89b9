use crate::schemas::Record;
use crate::tui::domain::models::{SearchRequest, SearchResponse};
use crate::tui::ui::events::Message;
use crossbeam::channel::{self, Sender};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use rayon::prelude::*;
use std::sync::Arc;
use std::thread;

pub struct SearchService {
    matcher: SkimMatcherV2,
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchService {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        SearchResponse {
            id: request.id,
            stream: request.stream.clone(),
            query: request.query.clone(),
            hits: self.rank(&request.records, &request.query),
        }
    }

    /// Indices of the records whose value fuzzy-matches `query`, best score
    /// first and arrival order among equal scores. A blank query matches
    /// everything in arrival order.
    pub fn rank(&self, records: &[Arc<Record>], query: &str) -> Vec<usize> {
        let query = query.trim();
        if query.is_empty() {
            return (0..records.len()).collect();
        }

        let mut scored: Vec<(i64, usize)> = records
            .par_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.matcher
                    .fuzzy_match(&record.value_text(), query)
                    .map(|score| (score, index))
            })
            .collect();

        scored.par_sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, index)| index).collect()
    }
}

/// Spawn the search worker. Completed searches are posted to `inbox` as
/// [`Message::SearchCompleted`]; the worker exits once every request sender
/// is dropped.
pub fn start_search_worker(inbox: Sender<Message>) -> Sender<SearchRequest> {
    let (request_tx, request_rx) = channel::unbounded::<SearchRequest>();
    let service = SearchService::new();

    thread::spawn(move || {
        while let Ok(first) = request_rx.recv() {
            let mut pending = vec![first];
            pending.extend(request_rx.try_iter());

            for (position, request) in pending.iter().enumerate() {
                // a newer request for the same stream supersedes this one
                if pending[position + 1..]
                    .iter()
                    .any(|later| later.stream == request.stream)
                {
                    tracing::debug!(stream = %request.stream, id = request.id, "skipping superseded search");
                    continue;
                }

                let response = service.search(request);
                tracing::debug!(
                    stream = %response.stream,
                    id = response.id,
                    hits = response.hits.len(),
                    "search finished"
                );
                if inbox.send(Message::SearchCompleted(response)).is_err() {
                    return;
                }
            }
        }
    });

    request_tx
}
