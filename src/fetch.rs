use std::cmp::Ordering;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::error::{FetchError, ProfileError};
use crate::model::KernelSummary;
use crate::parser::listing;
use crate::TOP_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_6) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/79.0.3945.117 Safari/537.36";
const TIMEOUT: Duration = Duration::from_secs(15);

/// Loads a page by URL.
pub trait PageLoader {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP loader.
pub struct HttpLoader {
    client: reqwest::blocking::Client,
}

impl HttpLoader {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl PageLoader for HttpLoader {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(transport)
    }
}

/// A kernel page with the summary shown for it on the listing.
#[derive(Debug)]
pub struct KernelPage {
    pub summary: KernelSummary,
    pub markup: String,
}

/// An error from the page fetcher, with the markup it was looking at if any.
#[derive(Error, Debug)]
#[error("page fetch failed")]
pub struct PageFailure {
    #[source]
    pub error: ProfileError,
    pub markup: Option<String>,
}

impl PageFailure {
    fn new(error: impl Into<ProfileError>, markup: Option<String>) -> Self {
        Self {
            error: error.into(),
            markup,
        }
    }
}

pub type Kernels<'a> = Box<dyn Iterator<Item = Result<KernelPage, PageFailure>> + 'a>;

/// Produces the top kernels of a competition.
///
/// The returned iterator is one-shot: each kernel page is loaded as it is
/// reached, best score first.
pub trait PageFetcher {
    fn list_top_kernels(
        &self,
        comp_slug: &str,
        max_count: usize,
    ) -> Result<Kernels<'_>, PageFailure>;
}

/// Page fetcher for pre-rendered pages served over a [`PageLoader`].
pub struct ListingFetcher<'a, L: PageLoader> {
    loader: &'a L,
}

impl<'a, L: PageLoader> ListingFetcher<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        Self { loader }
    }
}

pub fn listing_url(comp_slug: &str) -> String {
    format!("{}/c/{}/notebooks", TOP_URL, comp_slug)
}

impl<L: PageLoader> PageFetcher for ListingFetcher<'_, L> {
    fn list_top_kernels(
        &self,
        comp_slug: &str,
        max_count: usize,
    ) -> Result<Kernels<'_>, PageFailure> {
        let url = listing_url(comp_slug);
        info!("Loading notebook listing: {}", url);
        let markup = self
            .loader
            .fetch(&url)
            .map_err(|e| PageFailure::new(e, None))?;

        let mut kernels = match listing::extract_kernels(&markup) {
            Ok(k) => k,
            Err(e) => return Err(PageFailure::new(e, Some(markup))),
        };
        sort_by_best_score(&mut kernels);
        kernels.truncate(max_count);
        info!("Found {} scored kernels for {}", kernels.len(), comp_slug);

        let loader = self.loader;
        Ok(Box::new(kernels.into_iter().map(move |summary| {
            match loader.fetch(&summary.url) {
                Ok(markup) => Ok(KernelPage { summary, markup }),
                Err(e) => Err(PageFailure::new(e, None)),
            }
        })))
    }
}

/// Descending by best score, stable. Scores that don't parse sort last.
fn sort_by_best_score(kernels: &mut [KernelSummary]) {
    let key = |k: &KernelSummary| k.best_score.trim().parse::<f64>().ok();
    kernels.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
