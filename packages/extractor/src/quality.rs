//! Best-resolution selection among media variants.

use crate::types::MediaCandidate;

/// Pick the candidate with the largest pixel area (`width * height`).
///
/// Ties keep the earliest candidate, so the first-discovered variant
/// among equals wins. Candidates without dimensions rank as zero area
/// and only win if nothing better exists. Empty input yields `None`.
pub fn select_best(candidates: &[MediaCandidate]) -> Option<&MediaCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.area() > current.area() => Some(candidate),
        Some(current) => Some(current),
        None => Some(candidate),
    })
}
