use super::domain::{Assignment, Caregiver, CaregiverId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no candidates available for selection")]
    NoCandidates,
}

/// Pick the candidate with the fewest assignments in the snapshot.
///
/// Ties keep the first-encountered candidate: a later candidate wins only
/// with a strictly smaller workload. The result is deterministic for a
/// stable candidate ordering, but callers must not read fairness into that
/// ordering beyond "no candidate is less loaded than the chosen one".
///
/// `max_patients` is deliberately not consulted here; capacity is advisory
/// and surfaced through the load report instead.
pub fn select_least_loaded<'a>(
    candidates: &'a [Caregiver],
    assignments: &[Assignment],
) -> Result<&'a Caregiver, SelectionError> {
    let mut best: Option<(&Caregiver, usize)> = None;

    for candidate in candidates {
        let workload = workload_of(&candidate.id, assignments);
        match best {
            Some((_, smallest)) if workload >= smallest => {}
            _ => best = Some((candidate, workload)),
        }
    }

    best.map(|(candidate, _)| candidate)
        .ok_or(SelectionError::NoCandidates)
}

/// Count of snapshot assignments held by one caregiver. Callers pass a
/// snapshot already restricted to active patients.
pub fn workload_of(caregiver: &CaregiverId, assignments: &[Assignment]) -> usize {
    assignments
        .iter()
        .filter(|assignment| &assignment.caregiver_id == caregiver)
        .count()
}
