use super::entity::Movie;
use crate::domain::{DomainError, DomainResult};

/// Validates the invariants a movie must satisfy before it can be favorited
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    validate_id(movie)?;
    validate_rating(movie)?;
    Ok(())
}

/// Catalog ids are positive integers
fn validate_id(movie: &Movie) -> DomainResult<()> {
    if movie.id.value() <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Movie id must be positive, got {}",
            movie.id
        )));
    }
    Ok(())
}

fn validate_rating(movie: &Movie) -> DomainResult<()> {
    if !movie.vote_average.is_finite() {
        return Err(DomainError::InvariantViolation(format!(
            "Movie {} has a non-finite rating",
            movie.id
        )));
    }
    Ok(())
}

/// Invariants that must hold true for Movie domain:
///
/// 1. Identity is assigned by the catalog and never changes
/// 2. Id is a positive integer
/// 3. Rating is a finite number
/// 4. Title may be empty; display code falls back on the id
