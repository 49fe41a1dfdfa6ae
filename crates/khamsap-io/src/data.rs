use std::path::PathBuf;

use khamsap_core::EntryStore;
use khamsap_types::Entry;
use reqwest::header::{CACHE_CONTROL, HeaderValue};

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the entry list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Read and parse the entry list (a JSON array of entries).
pub async fn load_entries(source: &DataSource) -> Result<Vec<Entry>, DataLoadError> {
    let raw = match source {
        DataSource::File(path) => tokio::fs::read_to_string(path).await?,
        DataSource::Url(url) => fetch(url).await?,
    };

    let entries: Vec<Entry> = serde_json::from_str(&raw)?;
    tracing::info!("Loaded {} entries from {}", entries.len(), source);
    Ok(entries)
}

async fn fetch(url: &str) -> Result<String, DataLoadError> {
    let response = reqwest::Client::new()
        .get(url)
        .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(DataLoadError::Status(response.status()));
    }

    Ok(response.text().await?)
}

/// Like [`load_entries`], but a failed load becomes an empty store.
pub async fn load_entries_or_empty(source: &DataSource) -> EntryStore {
    match load_entries(source).await {
        Ok(entries) => entries.into(),
        Err(e) => {
            tracing::error!("Failed to load entries from {}: {}", source, e);
            EntryStore::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("khamsap-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_source_kind() {
        assert_eq!(
            DataSource::parse("https://example.org/data.json"),
            DataSource::Url("https://example.org/data.json".to_string())
        );
        assert_eq!(
            DataSource::parse("./data/data.json"),
            DataSource::File(PathBuf::from("./data/data.json"))
        );
    }

    #[tokio::test]
    async fn loads_entries_in_file_order() {
        let path = temp_file(
            "ordered.json",
            r#"[
                {"zh":"你好","th":"สวัสดี","rtgs":"sawatdee","cat":"greetings"},
                {"zh":"水","th":"น้ำ","rtgs":"nam"}
            ]"#,
        );

        let entries = load_entries(&DataSource::File(path)).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rtgs, "sawatdee");
        assert_eq!(entries[1].cat, None);
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let path = temp_file("broken.json", r#"{"zh": "#);
        let result = load_entries(&DataSource::File(path)).await;
        assert!(matches!(result, Err(DataLoadError::Parse(_))));
    }

    #[tokio::test]
    async fn missing_file_recovers_to_empty_store() {
        let source = DataSource::File(PathBuf::from("no/such/data.json"));
        assert!(matches!(
            load_entries(&source).await,
            Err(DataLoadError::Io(_))
        ));

        let store = load_entries_or_empty(&source).await;
        assert!(store.is_empty());
    }
}
