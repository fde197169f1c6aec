// LONG-LIVING QUORUM PARAMETERS
// Static LLMQ descriptors and the per-network quorum selection.
//
// SAFETY INVARIANTS:
// 1. min_size <= size and threshold <= min_size
// 2. dkg_phase_blocks * 5 <= mining_window_start < mining_window_end <= dkg_interval
// 3. The chain-lock and InstantSend selections always name a registered quorum type

use crate::error::ConsensusError;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Number of DKG phases that must complete before the commitment may be mined.
pub const DKG_PHASE_COUNT: u32 = 5;

/// Quorum type identifiers as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum LlmqType {
    Llmq50_60 = 1,
    Llmq400_60 = 2,
    Llmq400_85 = 3,
    /// Test-scale quorum; never registered on mainnet.
    Llmq5_60 = 100,
}

impl LlmqType {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(LlmqType::Llmq50_60),
            2 => Some(LlmqType::Llmq400_60),
            3 => Some(LlmqType::Llmq400_85),
            100 => Some(LlmqType::Llmq5_60),
            _ => None,
        }
    }

    pub fn params(self) -> &'static QuorumParams {
        match self {
            LlmqType::Llmq50_60 => &LLMQ_50_60,
            LlmqType::Llmq400_60 => &LLMQ_400_60,
            LlmqType::Llmq400_85 => &LLMQ_400_85,
            LlmqType::Llmq5_60 => &LLMQ_5_60,
        }
    }
}

impl fmt::Display for LlmqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuorumParams {
    pub llmq_type: LlmqType,
    pub name: &'static str,
    pub size: u32,
    pub min_size: u32,
    pub threshold: u32,

    /// Blocks between DKG sessions.
    pub dkg_interval: u32,
    pub dkg_phase_blocks: u32,
    /// Offsets from the session start during which the commitment may be mined.
    pub dkg_mining_window_start: u32,
    pub dkg_mining_window_end: u32,
    pub dkg_bad_votes_threshold: u32,

    pub signing_active_quorum_count: u32,
    pub keep_old_connections: u32,
}

impl QuorumParams {
    pub fn validate(&self) -> Result<(), ConsensusError> {
        let invalid = |reason: String| ConsensusError::InvalidQuorumParams {
            llmq_type: self.llmq_type,
            reason,
        };

        if self.min_size > self.size {
            return Err(invalid(format!("min size {} exceeds size {}", self.min_size, self.size)));
        }
        if self.threshold > self.min_size {
            return Err(invalid(format!(
                "threshold {} exceeds min size {}",
                self.threshold, self.min_size
            )));
        }
        if self.dkg_phase_blocks * DKG_PHASE_COUNT > self.dkg_mining_window_start {
            return Err(invalid(format!(
                "mining window opens at {} before {} phases of {} blocks finish",
                self.dkg_mining_window_start, DKG_PHASE_COUNT, self.dkg_phase_blocks
            )));
        }
        if self.dkg_mining_window_start >= self.dkg_mining_window_end {
            return Err(invalid("mining window is empty".to_string()));
        }
        if self.dkg_mining_window_end > self.dkg_interval {
            return Err(invalid(format!(
                "mining window ends at {} after the {}-block interval",
                self.dkg_mining_window_end, self.dkg_interval
            )));
        }
        Ok(())
    }
}

/// For testing only.
pub const LLMQ_5_60: QuorumParams = QuorumParams {
    llmq_type: LlmqType::Llmq5_60,
    name: "llmq_5_60",
    size: 3,
    min_size: 3,
    threshold: 3,

    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 8,

    signing_active_quorum_count: 2,
    keep_old_connections: 3,
};

pub const LLMQ_50_60: QuorumParams = QuorumParams {
    llmq_type: LlmqType::Llmq50_60,
    name: "llmq_50_60",
    size: 50,
    min_size: 40,
    threshold: 30,

    dkg_interval: 24, // hourly
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 40,

    signing_active_quorum_count: 24, // a full day
    keep_old_connections: 25,
};

pub const LLMQ_400_60: QuorumParams = QuorumParams {
    llmq_type: LlmqType::Llmq400_60,
    name: "llmq_400_60",
    size: 400,
    min_size: 300,
    threshold: 240,

    dkg_interval: 24 * 12,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 300,

    signing_active_quorum_count: 4, // two days
    keep_old_connections: 5,
};

/// Deployment and min-proto-version signalling; needs the higher threshold.
pub const LLMQ_400_85: QuorumParams = QuorumParams {
    llmq_type: LlmqType::Llmq400_85,
    name: "llmq_400_85",
    size: 400,
    min_size: 350,
    threshold: 340,

    dkg_interval: 24 * 24,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 48, // wider so the commitment gets mined
    dkg_bad_votes_threshold: 300,

    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

/// The quorum types a network runs, plus which ones back chain locks and InstantSend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuorumSet {
    quorums: BTreeMap<LlmqType, QuorumParams>,
    chain_locks: LlmqType,
    instant_send: LlmqType,
}

impl QuorumSet {
    /// Register the shared descriptors for `types` and select the signing quorums.
    pub fn new(
        types: &[LlmqType],
        chain_locks: LlmqType,
        instant_send: LlmqType,
    ) -> Result<Self, ConsensusError> {
        let quorums = types.iter().map(|t| (*t, *t.params())).collect();
        let set = QuorumSet {
            quorums,
            chain_locks,
            instant_send,
        };
        set.validate()?;
        Ok(set)
    }

    pub fn get(&self, llmq_type: LlmqType) -> Option<&QuorumParams> {
        self.quorums.get(&llmq_type)
    }

    pub fn contains(&self, llmq_type: LlmqType) -> bool {
        self.quorums.contains_key(&llmq_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuorumParams> {
        self.quorums.values()
    }

    pub fn len(&self) -> usize {
        self.quorums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quorums.is_empty()
    }

    pub fn chain_locks(&self) -> LlmqType {
        self.chain_locks
    }

    pub fn instant_send(&self) -> LlmqType {
        self.instant_send
    }

    pub fn validate(&self) -> Result<(), ConsensusError> {
        for params in self.quorums.values() {
            params.validate()?;
        }
        for selected in [self.chain_locks, self.instant_send] {
            if !self.contains(selected) {
                return Err(ConsensusError::UnregisteredQuorum(selected));
            }
        }
        Ok(())
    }

    /// Switch the chain-lock quorum. The type must already be registered.
    pub fn set_chain_locks(&mut self, llmq_type: LlmqType) -> Result<(), ConsensusError> {
        if !self.contains(llmq_type) {
            return Err(ConsensusError::UnregisteredQuorum(llmq_type));
        }
        debug!("Chain locks now use {}", llmq_type);
        self.chain_locks = llmq_type;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LlmqType; 4] = [
        LlmqType::Llmq50_60,
        LlmqType::Llmq400_60,
        LlmqType::Llmq400_85,
        LlmqType::Llmq5_60,
    ];

    #[test]
    fn test_shared_descriptors_are_valid() {
        for t in ALL {
            t.params().validate().unwrap();
            assert_eq!(t.params().llmq_type, t);
        }
    }

    #[test]
    fn test_wire_ids_round_trip() {
        for t in ALL {
            assert_eq!(LlmqType::from_id(t.id()), Some(t));
        }
        assert_eq!(LlmqType::Llmq5_60.id(), 100);
        assert_eq!(LlmqType::from_id(4), None);
    }

    #[test]
    fn test_phase_budget_is_enforced() {
        let mut params = LLMQ_400_60;
        params.dkg_mining_window_start = 19;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_window_must_fit_interval() {
        let mut params = LLMQ_5_60;
        params.dkg_mining_window_end = 25;
        assert!(params.validate().is_err());
        params.dkg_mining_window_end = 10;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_unregistered_selection_is_rejected() {
        let result = QuorumSet::new(&[LlmqType::Llmq5_60], LlmqType::Llmq50_60, LlmqType::Llmq5_60);
        assert!(matches!(result, Err(ConsensusError::UnregisteredQuorum(LlmqType::Llmq50_60))));
    }

    #[test]
    fn test_set_chain_locks() {
        let mut set = QuorumSet::new(
            &[LlmqType::Llmq50_60, LlmqType::Llmq400_60],
            LlmqType::Llmq50_60,
            LlmqType::Llmq50_60,
        )
        .unwrap();

        set.set_chain_locks(LlmqType::Llmq400_60).unwrap();
        assert_eq!(set.chain_locks(), LlmqType::Llmq400_60);
        assert_eq!(set.instant_send(), LlmqType::Llmq50_60);

        assert!(set.set_chain_locks(LlmqType::Llmq5_60).is_err());
        assert_eq!(set.chain_locks(), LlmqType::Llmq400_60);
    }
}
