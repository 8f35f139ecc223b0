use std::collections::HashMap;
use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::error::{Error, Result};

/// Token valence table. Each line of the source holds
/// `token<TAB>mean<TAB>std<TAB>[ratings]`; only the first two columns are used.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    pub fn parse(content: &str) -> Self {
        let mut valences = HashMap::new();

        for line in content.lines() {
            let mut fields = line.trim_end_matches('\r').split('\t');
            let (Some(token), Some(mean)) = (fields.next(), fields.next()) else {
                continue;
            };
            if token.is_empty() {
                continue;
            }
            match mean.trim().parse::<f64>() {
                Ok(valence) if valence.is_finite() => {
                    valences.insert(token.to_lowercase(), valence);
                }
                _ => tracing::debug!("Skipping malformed lexicon line: {}", line),
            }
        }

        Self { valences }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            valences: pairs
                .into_iter()
                .map(|(token, valence)| (token.to_lowercase(), valence))
                .collect(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ResourceUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let lexicon = Self::parse(&content);
        if lexicon.is_empty() {
            return Err(Error::ResourceUnavailable(format!(
                "{} contains no lexicon entries",
                path.display()
            )));
        }

        tracing::info!("Loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Loads the lexicon from `path`, downloading it from `url` first when the
    /// file does not exist yet.
    ///
    /// A download is only stored once it parses into a non-empty lexicon, and
    /// it lands at `path` through a rename so a partial file is never left there.
    pub async fn ensure(client: &Client, path: &Path, url: &str) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::info!("Lexicon not found at {}, downloading from {}", path.display(), url);
        let body = download(client, url).await?;

        let lexicon = Self::parse(&body);
        if lexicon.is_empty() {
            return Err(Error::ResourceUnavailable(format!(
                "download of {} contains no lexicon entries",
                url
            )));
        }

        store(path, &body).await?;
        tracing::info!("Stored {} lexicon entries at {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

async fn download(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::ResourceUnavailable(format!("download of {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::ResourceUnavailable(format!(
            "download of {} returned {}",
            url,
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| Error::ResourceUnavailable(format!("download of {} failed: {}", url, e)))
}

async fn store(path: &Path, body: &str) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let stored = match tokio::fs::write(&partial, body).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(e) => Err(e),
    };

    stored.map_err(|e| {
        let _ = std::fs::remove_file(&partial);
        Error::ResourceUnavailable(format!("cannot store {}: {}", path.display(), e))
    })
}
