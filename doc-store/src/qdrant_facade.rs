//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding the verbose builder pattern and keeping the rest of the workspace
//! decoupled from `qdrant-client`. Four capabilities are exposed:
//!
//! - [`DocStore::match_passages`]      — similarity search over the corpus
//! - [`DocStore::combine_all_content`] — whole-corpus concatenation (fallback)
//! - [`DocStore::match_history`]       — similarity search over past exchanges
//! - [`DocStore::insert_exchange`]     — append a recorded Q/A exchange

use chrono::{SecondsFormat, Utc};
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, ScrollPointsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{DistanceKind, StoreConfig};
use crate::errors::StoreError;
use crate::record::{NewExchange, PassageMatch, StoredExchange};

/// Scroll page size used when concatenating the whole corpus.
const SCROLL_PAGE: u32 = 256;

/// A facade over the Qdrant client holding both collections.
pub struct DocStore {
    client: Qdrant,
    cfg: StoreConfig,
}

impl DocStore {
    /// Creates a new facade from the given configuration.
    ///
    /// Supports optional API key authentication for Qdrant Cloud.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(format!("client build: {e}")))?;

        Ok(Self { client, cfg })
    }

    /// Ensures both collections exist, creating missing ones with the
    /// configured dimensionality and distance. Best-effort boot step; call
    /// once at startup when `embedding_dim` is known.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        let Some(dim) = self.cfg.embedding_dim else {
            warn!("EMBEDDING_DIM not set; skipping collection bootstrap");
            return Ok(());
        };
        self.ensure_collection(&self.cfg.passages_collection, dim)
            .await?;
        self.ensure_collection(&self.cfg.history_collection, dim).await
    }

    async fn ensure_collection(&self, name: &str, dim: usize) -> Result<(), StoreError> {
        match self.client.collection_info(name).await {
            Ok(_) => {
                debug!("collection '{name}' already exists");
                return Ok(());
            }
            Err(err) => {
                warn!("collection '{name}' not found, will be created (error={err})");
            }
        }

        let distance = match self.cfg.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(VectorParamsBuilder::new(dim as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::Qdrant(format!("create_collection {name}: {e}")))?;

        info!("collection '{name}' created (dim={dim})");
        Ok(())
    }

    /// Similarity search over the corpus.
    ///
    /// The score threshold is applied by the store itself; passages shorter
    /// than `min_content_length` bytes are dropped from the result.
    /// Returned matches keep the store's descending-score order.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on client failures.
    pub async fn match_passages(
        &self,
        vector: &[f32],
        threshold: f32,
        count: u64,
        min_content_length: usize,
    ) -> Result<Vec<PassageMatch>, StoreError> {
        self.check_dim(vector)?;

        let builder = SearchPointsBuilder::new(
            &self.cfg.passages_collection,
            vector.to_vec(),
            count,
        )
        .with_payload(true)
        .score_threshold(threshold);

        let resp = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(format!("search_points: {e}")))?;

        let out: Vec<PassageMatch> = resp
            .result
            .into_iter()
            .filter_map(|sp| {
                let payload = qpayload_to_json(sp.payload);
                passage_from_payload(sp.score, &payload)
            })
            .filter(|p| p.content.len() >= min_content_length)
            .collect();

        debug!(
            hits = out.len(),
            threshold, count, "match_passages completed"
        );
        Ok(out)
    }

    /// Concatenates the content of every corpus passage, in stable scroll
    /// order, separated by blank lines. This is the whole-corpus fallback
    /// used when no passage clears the similarity threshold.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on client failures.
    pub async fn combine_all_content(&self) -> Result<String, StoreError> {
        let mut combined = String::new();
        let mut offset = None;
        let mut pages = 0usize;

        loop {
            let mut builder = ScrollPointsBuilder::new(&self.cfg.passages_collection)
                .limit(SCROLL_PAGE)
                .with_payload(true);
            if let Some(off) = offset {
                builder = builder.offset(off);
            }

            let resp = self
                .client
                .scroll(builder)
                .await
                .map_err(|e| StoreError::Qdrant(format!("scroll: {e}")))?;

            for point in resp.result {
                let payload = qpayload_to_json(point.payload);
                if let Some(content) = payload.get("content").and_then(|v| v.as_str()) {
                    append_content(&mut combined, content);
                }
            }

            pages += 1;
            match resp.next_page_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!(pages, chars = combined.len(), "combine_all_content completed");
        Ok(combined)
    }

    /// Similarity search over recorded exchanges, best first.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on client failures.
    pub async fn match_history(
        &self,
        vector: &[f32],
        limit: u64,
    ) -> Result<Vec<StoredExchange>, StoreError> {
        self.check_dim(vector)?;

        let builder =
            SearchPointsBuilder::new(&self.cfg.history_collection, vector.to_vec(), limit)
                .with_payload(true);

        let resp = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(format!("search_points: {e}")))?;

        let out: Vec<StoredExchange> = resp
            .result
            .into_iter()
            .filter_map(|sp| {
                let payload = qpayload_to_json(sp.payload);
                exchange_from_payload(sp.score, &payload)
            })
            .collect();

        debug!(hits = out.len(), limit, "match_history completed");
        Ok(out)
    }

    /// Appends one recorded exchange to the history collection. The point
    /// vector is the query embedding; exchanges are never edited.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on client failures, or
    /// `VectorSizeMismatch` if the embedding length is wrong.
    pub async fn insert_exchange(&self, exchange: NewExchange) -> Result<(), StoreError> {
        self.check_dim(&exchange.embedding)?;

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let payload = json!({
            "question": exchange.question,
            "answer": exchange.answer,
            "created_at": created_at,
        });
        let q_payload: qdrant_client::Payload = payload
            .try_into()
            .map_err(|e| StoreError::Qdrant(format!("payload convert: {e}")))?;

        let point = PointStruct::new(
            Uuid::new_v4().to_string(),
            exchange.embedding,
            q_payload,
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(
                &self.cfg.history_collection,
                vec![point],
            ))
            .await
            .map_err(|e| StoreError::Qdrant(format!("upsert_points: {e}")))?;

        debug!("insert_exchange recorded one point");
        Ok(())
    }

    fn check_dim(&self, vector: &[f32]) -> Result<(), StoreError> {
        if let Some(want) = self.cfg.embedding_dim {
            if vector.len() != want {
                return Err(StoreError::VectorSizeMismatch {
                    got: vector.len(),
                    want,
                });
            }
        }
        Ok(())
    }
}

/// Appends one passage to the combined corpus text, blank-line separated.
fn append_content(combined: &mut String, content: &str) {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return;
    }
    if !combined.is_empty() {
        combined.push_str("\n\n");
    }
    combined.push_str(trimmed);
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Unsupported nested objects/arrays are mapped to `Null`.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            None => serde_json::Value::Null,
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}

/// Maps a search payload into a [`PassageMatch`]; points without textual
/// `content` are skipped.
fn passage_from_payload(score: f32, payload: &serde_json::Value) -> Option<PassageMatch> {
    let content = payload.get("content")?.as_str()?.to_string();
    Some(PassageMatch { content, score })
}

/// Maps a history payload into a [`StoredExchange`]; malformed points are
/// skipped rather than failing the whole lookup.
fn exchange_from_payload(score: f32, payload: &serde_json::Value) -> Option<StoredExchange> {
    let question = payload.get("question")?.as_str()?.to_string();
    let answer = payload.get("answer")?.as_str()?.to_string();
    let created_at = payload
        .get("created_at")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    Some(StoredExchange {
        question,
        answer,
        score,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::value::Kind;
    use std::collections::HashMap;

    fn qstring(s: &str) -> QValue {
        QValue {
            kind: Some(Kind::StringValue(s.to_string())),
        }
    }

    #[test]
    fn payload_converts_scalar_kinds() {
        let mut p = HashMap::new();
        p.insert("content".to_string(), qstring("hello"));
        p.insert(
            "flag".to_string(),
            QValue {
                kind: Some(Kind::BoolValue(true)),
            },
        );
        let json = qpayload_to_json(p);
        assert_eq!(json["content"], "hello");
        assert_eq!(json["flag"], true);
    }

    #[test]
    fn passage_mapping_skips_missing_content() {
        let ok = passage_from_payload(0.9, &json!({"content": "a passage"}));
        assert_eq!(ok.unwrap().content, "a passage");

        assert!(passage_from_payload(0.9, &json!({"other": 1})).is_none());
        assert!(passage_from_payload(0.9, &json!({"content": 42})).is_none());
    }

    #[test]
    fn exchange_mapping_tolerates_missing_timestamp() {
        let x = exchange_from_payload(
            0.5,
            &json!({"question": "q?", "answer": "a.", "created_at": "2026-02-01T10:00:00Z"}),
        )
        .unwrap();
        assert_eq!(x.question, "q?");
        assert_eq!(x.created_at, "2026-02-01T10:00:00Z");

        let no_ts = exchange_from_payload(0.5, &json!({"question": "q?", "answer": "a."})).unwrap();
        assert_eq!(no_ts.created_at, "");

        assert!(exchange_from_payload(0.5, &json!({"question": "q?"})).is_none());
    }

    #[test]
    fn combined_content_is_blank_line_separated() {
        let mut combined = String::new();
        append_content(&mut combined, "first passage\n");
        append_content(&mut combined, "   ");
        append_content(&mut combined, "second passage");
        assert_eq!(combined, "first passage\n\nsecond passage");
    }
}
