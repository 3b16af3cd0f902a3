pub mod client;
pub mod document;

pub use client::FirestoreFavoritesStore;
pub use document::{decode_record, encode_record, Document, FirestoreValue};
