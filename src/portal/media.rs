//! Media-fragment endpoint: discover the PDF media ids attached to a record.

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::utils::HttpClient;

/// Path of the viewer fragment, followed by the record id
pub const FRAGMENT_PATH_PREFIX: &str = "/media-provider-webapp/fragments/default/RECORD";

/// Element wrapping each PDF in the viewer
const PDF_WRAPPER_SELECTOR: &str = "span.fotorama_pdf_wrapper";

/// Attribute holding the thumbnail URL, which embeds the media id
const THUMB_ATTRIBUTE: &str = "data-thumb";

fn media_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"mediaId=(\d+)").expect("valid regex"))
}

/// Discovers media ids from the record viewer fragment
#[derive(Debug, Clone)]
pub struct MediaDiscovery {
    client: Arc<HttpClient>,
    config: Arc<HarvestConfig>,
}

impl MediaDiscovery {
    pub fn new(client: Arc<HttpClient>, config: Arc<HarvestConfig>) -> Self {
        Self { client, config }
    }

    /// Fetch the viewer fragment, keep a raw copy and return its media ids
    pub async fn discover(&self, record_id: u64) -> Result<BTreeSet<u64>, HarvestError> {
        let url = self
            .config
            .endpoint(&format!("{}{}", FRAGMENT_PATH_PREFIX, record_id));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("tenant_id", self.config.tenant_id.as_str()),
                ("viewType", "fotorama"),
            ])
            .timeout(self.config.timeouts.metadata())
            .send()
            .await?;

        let body = response.text().await?;

        let path = self.config.storage.fragment_path(record_id);
        std::fs::write(&path, &body)?;
        tracing::debug!("Wrote {}", path.display());

        parse_fragment(&body)
    }
}

/// Extract the media ids of every PDF wrapper in a viewer fragment.
///
/// A wrapper without a thumbnail, or a thumbnail without a media id, means the
/// viewer markup changed; that is reported as a `FormatViolation`.
pub fn parse_fragment(html: &str) -> Result<BTreeSet<u64>, HarvestError> {
    let document = Html::parse_fragment(html);
    let selector = Selector::parse(PDF_WRAPPER_SELECTOR)
        .map_err(|e| HarvestError::FormatViolation(format!("Bad selector: {:?}", e)))?;

    let mut media_ids = BTreeSet::new();

    for wrapper in document.select(&selector) {
        let thumb = wrapper.value().attr(THUMB_ATTRIBUTE).ok_or_else(|| {
            HarvestError::FormatViolation(format!(
                "PDF wrapper without {}: {}",
                THUMB_ATTRIBUTE,
                wrapper.html()
            ))
        })?;

        let media_id = media_id_pattern()
            .captures(thumb)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(|| HarvestError::FormatViolation(format!("No media ID: {}", thumb)))?;

        media_ids.insert(media_id);
    }

    Ok(media_ids)
}
