// Path: crates/system/src/lib.rs

use aeon_api::state::StateAccess;
use aeon_types::{
    app::{Phase, PhaseSnapshot, PhaseState, PhaseTicket, ValidatorUpdate},
    codec,
    error::{ChangeoverError, StateError},
    keys::{COMMITTEE_UPDATES_KEY, JAILED_UPDATES_KEY},
};

// --- TRAITS ---

/// Durable storage for the changeover phase slots and their payloads.
///
/// An absent slot or payload means "nothing pending" and is never an error.
pub trait PhaseStore {
    /// Reads the current state of a phase slot.
    fn phase_state(&self, phase: Phase) -> Result<PhaseState, ChangeoverError>;
    /// Raises a phase slot to its pending state.
    fn raise(&mut self, phase: Phase) -> Result<(), ChangeoverError>;
    /// Consumes a pending phase, writing it back to `Idle` and returning the ticket.
    /// Returns `None` when the phase is not pending.
    fn consume(&mut self, phase: Phase) -> Result<Option<PhaseTicket>, ChangeoverError>;
    /// Reads the persisted DKG committee payload.
    fn committee_updates(&self) -> Result<Vec<ValidatorUpdate>, StateError>;
    /// Overwrites the persisted DKG committee payload.
    fn set_committee_updates(&mut self, updates: &[ValidatorUpdate]) -> Result<(), StateError>;
    /// Reads the jailed-validator payload.
    fn jailed_updates(&self) -> Result<Vec<ValidatorUpdate>, StateError>;
    /// Overwrites the jailed-validator payload.
    fn set_jailed_updates(&mut self, updates: &[ValidatorUpdate]) -> Result<(), StateError>;
    /// Returns a read-only view of every slot.
    fn snapshot(&self) -> Result<PhaseSnapshot, ChangeoverError>;
}

// --- IMPLEMENTATION ---

/// A `PhaseStore` over the block's key-value state.
pub struct KvPhaseStore<'a> {
    state: &'a mut dyn StateAccess,
}

impl<'a> KvPhaseStore<'a> {
    pub fn new(state: &'a mut dyn StateAccess) -> Self {
        Self { state }
    }

    fn write_phase(&mut self, phase: Phase, next: PhaseState) -> Result<(), StateError> {
        let bytes = codec::to_bytes_canonical(&next).map_err(StateError::InvalidValue)?;
        log::debug!("[PhaseStore] {} <- {:?}", phase.label(), next);
        self.state.insert(phase.key(), &bytes)
    }

    fn read_updates(&self, key: &[u8]) -> Result<Vec<ValidatorUpdate>, StateError> {
        match self.state.get(key)? {
            Some(b) => codec::from_bytes_canonical(&b).map_err(StateError::Decode),
            None => Ok(Vec::new()),
        }
    }

    fn write_updates(&mut self, key: &[u8], updates: &[ValidatorUpdate]) -> Result<(), StateError> {
        let bytes = codec::to_bytes_canonical(&updates).map_err(StateError::InvalidValue)?;
        self.state.insert(key, &bytes)
    }
}

impl<'a> PhaseStore for KvPhaseStore<'a> {
    fn phase_state(&self, phase: Phase) -> Result<PhaseState, ChangeoverError> {
        match self.state.get(phase.key())? {
            Some(b) => Ok(codec::from_bytes_canonical(&b).map_err(StateError::Decode)?),
            None => Ok(PhaseState::Idle),
        }
    }

    fn raise(&mut self, phase: Phase) -> Result<(), ChangeoverError> {
        let next = self.phase_state(phase)?.raise(phase)?;
        self.write_phase(phase, next)?;
        Ok(())
    }

    fn consume(&mut self, phase: Phase) -> Result<Option<PhaseTicket>, ChangeoverError> {
        let (next, ticket) = self.phase_state(phase)?.consume(phase)?;
        if ticket.is_some() {
            self.write_phase(phase, next)?;
        }
        Ok(ticket)
    }

    fn committee_updates(&self) -> Result<Vec<ValidatorUpdate>, StateError> {
        self.read_updates(COMMITTEE_UPDATES_KEY)
    }

    fn set_committee_updates(&mut self, updates: &[ValidatorUpdate]) -> Result<(), StateError> {
        self.write_updates(COMMITTEE_UPDATES_KEY, updates)
    }

    fn jailed_updates(&self) -> Result<Vec<ValidatorUpdate>, StateError> {
        self.read_updates(JAILED_UPDATES_KEY)
    }

    fn set_jailed_updates(&mut self, updates: &[ValidatorUpdate]) -> Result<(), StateError> {
        self.write_updates(JAILED_UPDATES_KEY, updates)
    }

    fn snapshot(&self) -> Result<PhaseSnapshot, ChangeoverError> {
        Ok(PhaseSnapshot {
            compute_dkg: self.phase_state(Phase::ComputeDkg)?,
            promote_consensus: self.phase_state(Phase::PromoteConsensus)?,
            committee_updates: self.committee_updates()?.len(),
            jailed_pending: self.jailed_updates()?.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_test_utils::fixtures::{ed25519_key, update};
    use aeon_test_utils::state::MemoryState;
    use aeon_types::keys::COMPUTE_DKG_PHASE_KEY;

    #[test]
    fn absent_slots_read_as_nothing_pending() {
        let mut state = MemoryState::new();
        let store = KvPhaseStore::new(&mut state);
        assert_eq!(store.snapshot().unwrap(), PhaseSnapshot::default());
    }

    #[test]
    fn consume_clears_only_the_flag() {
        let mut state = MemoryState::new();
        let mut store = KvPhaseStore::new(&mut state);
        let payload = vec![update(1, 10), update(2, 0)];
        store.set_committee_updates(&payload).unwrap();
        store.raise(Phase::PromoteConsensus).unwrap();

        let ticket = store.consume(Phase::PromoteConsensus).unwrap();
        assert_eq!(ticket.unwrap().phase(), Phase::PromoteConsensus);
        assert!(store.consume(Phase::PromoteConsensus).unwrap().is_none());
        assert_eq!(store.committee_updates().unwrap(), payload);
    }

    #[test]
    fn consume_of_idle_slot_does_not_write() {
        let mut state = MemoryState::new();
        {
            let mut store = KvPhaseStore::new(&mut state);
            assert!(store.consume(Phase::ComputeDkg).unwrap().is_none());
        }
        assert_eq!(state.get(COMPUTE_DKG_PHASE_KEY).unwrap(), None);
    }

    #[test]
    fn phases_are_independent() {
        let mut state = MemoryState::new();
        let mut store = KvPhaseStore::new(&mut state);
        store.raise(Phase::ComputeDkg).unwrap();
        assert_eq!(
            store.phase_state(Phase::PromoteConsensus).unwrap(),
            PhaseState::Idle
        );
        assert_eq!(
            store.phase_state(Phase::ComputeDkg).unwrap(),
            PhaseState::PendingCompute
        );
    }

    #[test]
    fn corrupt_slot_bytes_are_fatal() {
        let mut state = MemoryState::new();
        state.insert(COMPUTE_DKG_PHASE_KEY, &[9, 9]).unwrap();
        let mut store = KvPhaseStore::new(&mut state);
        assert!(matches!(
            store.consume(Phase::ComputeDkg),
            Err(ChangeoverError::State(StateError::Decode(_)))
        ));
    }

    #[test]
    fn jailed_payload_roundtrips() {
        let mut state = MemoryState::new();
        let mut store = KvPhaseStore::new(&mut state);
        let jailed = vec![ValidatorUpdate::removal(ed25519_key(3))];
        store.set_jailed_updates(&jailed).unwrap();
        assert_eq!(store.jailed_updates().unwrap(), jailed);
        store.set_jailed_updates(&[]).unwrap();
        assert!(store.jailed_updates().unwrap().is_empty());
    }
}
