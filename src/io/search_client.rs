// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Query submission against the search endpoint.
//!
//! A query is validated locally, posted as a multipart form, and the
//! response is classified by its declared content type: JSON bodies become
//! a `SearchResult`, anything else is handed back as opaque markup.

use crate::config::Settings;
use crate::models::search_result::SearchResult;
use anyhow::Result;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use thiserror::Error;

const TRANSPORT_MESSAGE: &str =
    "An error occurred while processing your request. Please try again.";

/// Failure of one submission. `Display` is the text shown to the user.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please enter a query.")]
    EmptyQuery,

    #[error("{}", TRANSPORT_MESSAGE)]
    Transport(#[source] anyhow::Error),

    #[error("{}", TRANSPORT_MESSAGE)]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    ServerReported(String),
}

/// Raw HTTP response, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(SearchResult),
    /// Non-JSON body, displayed verbatim and never stored.
    Markup(String),
}

/// Sends the search form somewhere and returns whatever came back.
///
/// HTTP error statuses are not failures here: the service reports errors
/// such as "no images" as a JSON body with a 4xx status.
pub trait SearchTransport: Send + Sync {
    fn post_form(&self, fields: &[(String, String)]) -> Result<RawResponse>;
}

/// `SearchTransport` over HTTP.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            client,
            url: settings.search_url(),
        })
    }
}

impl SearchTransport for HttpTransport {
    fn post_form(&self, fields: &[(String, String)]) -> Result<RawResponse> {
        let form = fields
            .iter()
            .fold(reqwest::blocking::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });

        let response = self.client.post(&self.url).multipart(form).send()?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let body = response.text()?;

        log::debug!(
            "POST {} -> {} ({})",
            self.url,
            status,
            content_type.as_deref().unwrap_or("no content type")
        );

        Ok(RawResponse { content_type, body })
    }
}

/// Trim a query and reject it if nothing is left.
pub fn validate_query(query: &str) -> Result<String, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(trimmed.to_string())
}

/// Turn a raw response into an outcome.
pub fn classify(response: RawResponse) -> Result<SearchOutcome, SearchError> {
    if !response.is_json() {
        return Ok(SearchOutcome::Markup(response.body));
    }

    let result = SearchResult::from_json(&response.body)?;
    if let Some(error) = result.error {
        return Err(SearchError::ServerReported(error));
    }

    log::info!(
        "Received {} frames, {} metadata entries",
        result.frame_paths.len(),
        result.metadata_list.len()
    );
    Ok(SearchOutcome::Results(result))
}

pub struct QuerySubmitter<T> {
    transport: T,
    form_fields: Vec<(String, String)>,
}

impl<T: SearchTransport> QuerySubmitter<T> {
    /// `form_fields` are sent ahead of the `query` field on every submission.
    pub fn new(transport: T, form_fields: Vec<(String, String)>) -> Self {
        Self {
            transport,
            form_fields,
        }
    }

    /// Submit one query. Empty queries fail without touching the transport.
    pub fn submit(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let query = validate_query(query)?;

        let mut fields = self.form_fields.clone();
        fields.push(("query".to_string(), query));

        let response = self
            .transport
            .post_form(&fields)
            .map_err(SearchError::Transport)?;
        classify(response)
    }
}

type Completion = (u64, Result<SearchOutcome, SearchError>);

/// Runs submissions on background threads and hands back the newest result.
///
/// Every submission gets a ticket. A response for an older ticket that
/// arrives after a newer submission was made is dropped.
pub struct SearchDispatcher<T> {
    submitter: Arc<QuerySubmitter<T>>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    latest: u64,
    pending: bool,
}

impl<T: SearchTransport + 'static> SearchDispatcher<T> {
    pub fn new(submitter: QuerySubmitter<T>) -> Self {
        let (sender, receiver) = channel();
        Self {
            submitter: Arc::new(submitter),
            sender,
            receiver,
            latest: 0,
            pending: false,
        }
    }

    /// Validate and start a submission. Returns its ticket.
    ///
    /// Validation runs here, so an empty query never spawns a request.
    pub fn dispatch(&mut self, query: &str) -> Result<u64, SearchError> {
        let query = validate_query(query)?;

        self.latest += 1;
        self.pending = true;
        let ticket = self.latest;
        let submitter = Arc::clone(&self.submitter);
        let sender = self.sender.clone();

        log::info!("Search #{} for {:?}", ticket, query);
        std::thread::spawn(move || {
            let result = submitter.submit(&query);
            let _ = sender.send((ticket, result));
        });

        Ok(ticket)
    }

    /// Take the newest submission's result if it has arrived.
    pub fn poll(&mut self) -> Option<Result<SearchOutcome, SearchError>> {
        while let Ok((ticket, result)) = self.receiver.try_recv() {
            if ticket != self.latest {
                log::debug!("Dropping stale response for search #{}", ticket);
                continue;
            }
            self.pending = false;
            if let Err(err) = &result {
                log::warn!("Search #{} failed: {:?}", ticket, err);
            }
            return Some(result);
        }
        None
    }

    /// Whether the newest submission is still running.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
