// src/integrations/firestore/document.rs
//
// Firestore REST document encoding for favorite records.
//
// Layout: users/{userId}/favorites/{movieId}
// Fields: id, title, poster_path, release_date, vote_average, genre_ids

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FavoriteRecord, MovieId};
use crate::error::{AppError, AppResult};

/// A typed Firestore value as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirestoreValue {
    NullValue(()),
    BooleanValue(bool),
    /// int64 values travel as decimal strings
    IntegerValue(String),
    DoubleValue(f64),
    StringValue(String),
    TimestampValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(serde_json::Value),
    ArrayValue(ArrayValue),
    MapValue(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<FirestoreValue>,
}

impl FirestoreValue {
    pub fn integer(value: i64) -> Self {
        FirestoreValue::IntegerValue(value.to_string())
    }

    pub fn optional_string(value: Option<&str>) -> Self {
        match value {
            Some(s) => FirestoreValue::StringValue(s.to_string()),
            None => FirestoreValue::NullValue(()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FirestoreValue::IntegerValue(raw) => raw.parse().ok(),
            FirestoreValue::DoubleValue(v) if v.fract() == 0.0 => Some(*v as i64),
            FirestoreValue::StringValue(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whole-number ratings come back as integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FirestoreValue::DoubleValue(v) => Some(*v),
            FirestoreValue::IntegerValue(raw) => raw.parse::<i64>().ok().map(|v| v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FirestoreValue::StringValue(s) => Some(s),
            _ => None,
        }
    }
}

/// A Firestore document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, absent on writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub fields: HashMap<String, FirestoreValue>,

    #[serde(default, skip_serializing)]
    pub create_time: Option<String>,

    #[serde(default, skip_serializing)]
    pub update_time: Option<String>,
}

impl Document {
    /// Last path segment of the resource name
    pub fn document_id(&self) -> Option<&str> {
        self.name.as_deref().and_then(|name| name.rsplit('/').next())
    }
}

/// Response of a collection listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    pub next_page_token: Option<String>,
}

/// Encode a favorite record into document fields
pub fn encode_record(record: &FavoriteRecord) -> Document {
    let mut fields = HashMap::new();
    fields.insert("id".to_string(), FirestoreValue::integer(record.id.value()));
    fields.insert(
        "title".to_string(),
        FirestoreValue::StringValue(record.title.clone()),
    );
    fields.insert(
        "poster_path".to_string(),
        FirestoreValue::optional_string(record.poster_path.as_deref()),
    );
    fields.insert(
        "release_date".to_string(),
        FirestoreValue::optional_string(record.release_date.as_deref()),
    );
    fields.insert(
        "vote_average".to_string(),
        FirestoreValue::DoubleValue(record.vote_average),
    );
    fields.insert(
        "genre_ids".to_string(),
        FirestoreValue::ArrayValue(ArrayValue {
            values: record.genre_ids.iter().map(|g| FirestoreValue::integer(*g)).collect(),
        }),
    );

    Document {
        fields,
        ..Document::default()
    }
}

/// Rebuild a favorite record from a stored document.
///
/// The `id` field wins over the document name; the name is only the
/// fallback for documents written without one.
pub fn decode_record(document: &Document) -> AppResult<FavoriteRecord> {
    let field = |key: &str| document.fields.get(key);

    let id = field("id")
        .and_then(FirestoreValue::as_i64)
        .or_else(|| document.document_id().and_then(|raw| raw.parse().ok()))
        .ok_or_else(|| {
            AppError::Other(format!(
                "Firestore favorite document without a movie id: {}",
                document.name.as_deref().unwrap_or("<unnamed>")
            ))
        })?;

    let genre_ids = match field("genre_ids") {
        Some(FirestoreValue::ArrayValue(array)) => {
            array.values.iter().filter_map(FirestoreValue::as_i64).collect()
        }
        _ => Vec::new(),
    };

    Ok(FavoriteRecord {
        id: MovieId(id),
        title: field("title")
            .and_then(FirestoreValue::as_str)
            .unwrap_or_default()
            .to_string(),
        poster_path: field("poster_path")
            .and_then(FirestoreValue::as_str)
            .map(str::to_string),
        release_date: field("release_date")
            .and_then(FirestoreValue::as_str)
            .map(str::to_string),
        vote_average: field("vote_average")
            .and_then(FirestoreValue::as_f64)
            .unwrap_or(0.0),
        genre_ids,
    })
}
