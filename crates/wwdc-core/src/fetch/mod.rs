//! HTTP page fetching.
//!
//! Uses the curl crate (libcurl) to retrieve listing and catalog pages as
//! text. This is the only network dependency of the resolvers; they take a
//! `PageFetcher` so tests can substitute canned pages.

mod options;

pub use options::FetchOptions;

use crate::error::FetchError;
use curl::easy::Easy;

/// Retrieves the raw text of a URL.
pub trait PageFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// libcurl-backed fetcher. Follows redirects; non-2xx and empty bodies are failures.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl PageFetcher for CurlFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let mut easy = prepare_easy(url, &self.opts)?;
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(|e| curl_err(url, e))?;
            transfer.perform().map_err(|e| curl_err(url, e))?;
        }

        check_status(&mut easy, url)?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Easy handle with the shared request settings applied (URL, redirects, timeouts, UA).
pub(crate) fn prepare_easy(url: &str, opts: &FetchOptions) -> Result<Easy, FetchError> {
    let mut easy = Easy::new();
    easy.url(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let apply = |easy: &mut Easy| -> Result<(), curl::Error> {
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(opts.connect_timeout)?;
        if let Some(timeout) = opts.timeout {
            easy.timeout(timeout)?;
        }
        easy.useragent(&opts.user_agent)?;
        Ok(())
    };
    apply(&mut easy).map_err(|e| curl_err(url, e))?;
    Ok(easy)
}

pub(crate) fn check_status(easy: &mut Easy, url: &str) -> Result<(), FetchError> {
    let code = easy.response_code().map_err(|e| curl_err(url, e))?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: code,
        });
    }
    Ok(())
}

fn curl_err(url: &str, source: curl::Error) -> FetchError {
    FetchError::Curl {
        url: url.to_string(),
        source,
    }
}
