use super::domain::{CareTier, Caregiver};

/// Subset of the roster allowed to serve a case of the required tier,
/// restricted to active entries.
///
/// Eligibility table: bronze cases take bronze (or untiered) caregivers,
/// silver cases take silver or gold, gold cases take gold only. When the
/// filtered set is empty the entire active roster is returned instead —
/// availability takes precedence over strict tier matching, so assignment
/// succeeds whenever any active caregiver exists.
pub fn eligible_for(required: CareTier, roster: &[Caregiver]) -> Vec<Caregiver> {
    let active: Vec<&Caregiver> = roster.iter().filter(|entry| entry.is_active()).collect();

    let eligible: Vec<Caregiver> = active
        .iter()
        .filter(|entry| tier_serves(required, entry.effective_tier()))
        .map(|entry| (*entry).clone())
        .collect();

    if eligible.is_empty() {
        active.into_iter().cloned().collect()
    } else {
        eligible
    }
}

fn tier_serves(required: CareTier, offered: CareTier) -> bool {
    match required {
        CareTier::Bronze => offered == CareTier::Bronze,
        CareTier::Silver => matches!(offered, CareTier::Silver | CareTier::Gold),
        CareTier::Gold => offered == CareTier::Gold,
    }
}
