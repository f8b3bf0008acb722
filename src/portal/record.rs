//! Record-display endpoint: fetch, unwrap and parse one MARCXML record.

use reqwest::header::ACCEPT;
use std::sync::Arc;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::marc::parse_marcxml;
use crate::models::BibliographicDocument;
use crate::utils::{decode_html_entities, HttpClient};

/// Path of the record-display portlet
pub const RECORD_DISPLAY_PATH: &str = "/ro/record";

/// Phrase the portal prints instead of a record ("was not found!")
pub const NOT_FOUND_SENTINEL: &str = "nu a fost găsită!";

/// Markup the portal wraps around the MARCXML
const WRAPPER_MARKUP: &[&str] = &["<div class=\"MarcXMLBox\">", "</div>", "<br />"];

/// Liferay portlet parameters that route the request to the record resource
const PORTLET_PARAMS: &[(&str, &str)] = &[
    ("p_p_id", "DisplayRecord_WAR_akfweb"),
    ("p_p_lifecycle", "2"),
    ("p_p_state", "normal"),
    ("p_p_mode", "view"),
    ("p_p_resource_id", "getRecord"),
    ("p_p_cacheability", "cacheLevelPage"),
    ("p_p_col_id", "column-2"),
    ("p_p_col_count", "2"),
    ("_DisplayRecord_WAR_akfweb_implicitModel", "true"),
];

/// Fetches bibliographic records and keeps a JSON copy of each
#[derive(Debug, Clone)]
pub struct RecordFetcher {
    client: Arc<HttpClient>,
    config: Arc<HarvestConfig>,
}

impl RecordFetcher {
    pub fn new(client: Arc<HttpClient>, config: Arc<HarvestConfig>) -> Self {
        Self { client, config }
    }

    /// Fetch and parse a record, then write it to the records directory.
    ///
    /// The JSON file is rewritten on every call.
    pub async fn fetch(&self, record_id: u64) -> Result<BibliographicDocument, HarvestError> {
        let body = self.request(record_id).await?;
        let document = parse_record_body(record_id, &body)?;

        let path = self.config.storage.record_path(record_id);
        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(&path, json)?;
        tracing::debug!("Wrote {}", path.display());

        Ok(document)
    }

    async fn request(&self, record_id: u64) -> Result<String, HarvestError> {
        let record_key = format!("RECORD{}", record_id);
        let form = [
            ("recordId", record_key.as_str()),
            ("dbid", "solr"),
            ("recordType", "manifestation"),
            ("format", "marcxml.html"),
            ("fromOutside", "false"),
        ];

        let response = self
            .client
            .post(&self.config.endpoint(RECORD_DISPLAY_PATH))
            .query(PORTLET_PARAMS)
            .form(&form)
            .header(ACCEPT, "text/html, */*; q=0.01")
            .timeout(self.config.timeouts.metadata())
            .send()
            .await?;

        Ok(response.text().await?)
    }
}

/// Strip the portal's wrapping markup from a decoded response body
pub fn unwrap_marcxml(decoded: &str) -> String {
    let mut xml = decoded.to_string();
    for markup in WRAPPER_MARKUP {
        xml = xml.replace(markup, "");
    }
    xml.trim().to_string()
}

/// Turn a record-display response body into a document.
///
/// Both the not-found page and an unparsable body map to `RecordNotFound`.
pub fn parse_record_body(
    record_id: u64,
    body: &str,
) -> Result<BibliographicDocument, HarvestError> {
    let decoded = decode_html_entities(body);

    if decoded.contains(NOT_FOUND_SENTINEL) {
        return Err(HarvestError::RecordNotFound(record_id));
    }

    let xml = unwrap_marcxml(&decoded);

    parse_marcxml(&xml).map_err(|e| {
        tracing::warn!("Error parsing XML of record {}: {}", record_id, e);
        tracing::debug!("Unparsable record body: {}", xml);
        HarvestError::RecordNotFound(record_id)
    })
}
