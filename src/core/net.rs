// src/core/net.rs
//
// Blocking HTTP GET against the registry. One request at a time; the fetch
// loop owns retries and pacing, this layer only reports what happened.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::debug;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

/// What came back for one GET: status, body, and the URL after redirects.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub url: String,
}

/// The network seam. The live client talks to the registry; tests script
/// responses.
pub trait Fetch {
    fn get(&self, url: &Url) -> Result<HttpResponse, FetchError>;
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        let t = std::time::Instant::now();
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let body = resp.text()?;
        debug!(status, bytes = body.len(), elapsed = ?t.elapsed(), "GET {final_url}");
        Ok(HttpResponse { status, body, url: final_url })
    }
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        (**self).get(url)
    }
}
