use serde::Serialize;

use super::domain::{Assignment, CareTier, Caregiver, CaregiverId};
use super::selection::workload_of;

/// Per-caregiver workload versus the advisory cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaregiverLoadEntry {
    pub caregiver_id: CaregiverId,
    pub tier: CareTier,
    pub active_patients: usize,
    pub max_patients: u8,
    /// Set at or above `max_patients`. Reporting only; selection ignores it.
    pub over_capacity: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CaregiverLoadReport {
    pub entries: Vec<CaregiverLoadEntry>,
}

impl CaregiverLoadReport {
    /// Join the roster and assignment snapshots, most-loaded first.
    pub fn build(roster: &[Caregiver], assignments: &[Assignment]) -> Self {
        let mut entries: Vec<CaregiverLoadEntry> = roster
            .iter()
            .filter(|caregiver| caregiver.is_active())
            .map(|caregiver| {
                let active_patients = workload_of(&caregiver.id, assignments);
                CaregiverLoadEntry {
                    caregiver_id: caregiver.id.clone(),
                    tier: caregiver.effective_tier(),
                    active_patients,
                    max_patients: caregiver.max_patients,
                    over_capacity: active_patients >= caregiver.max_patients as usize,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.active_patients
                .cmp(&a.active_patients)
                .then_with(|| a.caregiver_id.cmp(&b.caregiver_id))
        });

        Self { entries }
    }

    pub fn over_capacity(&self) -> Vec<&CaregiverLoadEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.over_capacity)
            .collect()
    }
}
