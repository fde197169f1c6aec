// SOFT-FORK DEPLOYMENT TABLE
// BIP9 versionbits descriptors, one per known deployment.
//
// SAFETY INVARIANTS:
// 1. The table always holds exactly one descriptor per DeploymentPos, in order
// 2. Effective threshold <= effective window for every deployment
// 3. Signaling bits never collide between deployments whose [start, timeout) overlap
// 4. Timing only changes through set_timing, which test-network overrides call
//
// The versionbits state machine (DEFINED -> STARTED -> LOCKED_IN -> ACTIVE / FAILED)
// lives with block validation and only reads these descriptors.

use crate::error::ConsensusError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of usable versionbits.
pub const VERSIONBITS_NUM_BITS: u8 = 29;

/// Number of known deployments.
pub const MAX_VERSION_BITS_DEPLOYMENTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeploymentPos {
    TestDummy,
    /// BIP68, BIP112 and BIP113.
    Csv,
    /// Larger blocks and masternode payment changes.
    Dip0001,
    Bip147,
    /// Deterministic masternode lists.
    Dip0003,
    /// Chain locks enforcement.
    Dip0008,
}

impl DeploymentPos {
    pub const ALL: [DeploymentPos; MAX_VERSION_BITS_DEPLOYMENTS] = [
        DeploymentPos::TestDummy,
        DeploymentPos::Csv,
        DeploymentPos::Dip0001,
        DeploymentPos::Bip147,
        DeploymentPos::Dip0003,
        DeploymentPos::Dip0008,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used by the versionbits RPC surface.
    pub fn name(self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Csv => "csv",
            DeploymentPos::Dip0001 => "dip0001",
            DeploymentPos::Bip147 => "bip147",
            DeploymentPos::Dip0003 => "dip0003",
            DeploymentPos::Dip0008 => "dip0008",
        }
    }

    /// The bit every network signals this deployment on.
    pub fn default_bit(self) -> u8 {
        match self {
            DeploymentPos::TestDummy => 28,
            DeploymentPos::Csv => 0,
            DeploymentPos::Dip0001 => 1,
            DeploymentPos::Bip147 => 2,
            DeploymentPos::Dip0003 => 3,
            DeploymentPos::Dip0008 => 4,
        }
    }
}

impl fmt::Display for DeploymentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// When signaling may begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTime {
    /// Active from genesis; no signaling period.
    AlwaysActive,
    /// Median-time-past at which signaling starts.
    At(i64),
}

/// When an unactivated deployment fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeout {
    NoTimeout,
    At(i64),
}

impl StartTime {
    fn lower_bound(self) -> i64 {
        match self {
            StartTime::AlwaysActive => i64::MIN,
            StartTime::At(t) => t,
        }
    }
}

impl Timeout {
    fn upper_bound(self) -> i64 {
        match self {
            Timeout::NoTimeout => i64::MAX,
            Timeout::At(t) => t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentDescriptor {
    pub id: DeploymentPos,
    pub bit: u8,
    pub start: StartTime,
    pub timeout: Timeout,
    /// Signaling window in blocks; `None` uses the network's miner confirmation window.
    pub window_size: Option<u32>,
    /// Signaling blocks needed to lock in; `None` uses the network's activation threshold.
    pub threshold: Option<u32>,
}

impl DeploymentDescriptor {
    /// A descriptor on the deployment's standard bit using the network-wide window.
    pub const fn new(id: DeploymentPos, bit: u8, start: StartTime, timeout: Timeout) -> Self {
        DeploymentDescriptor {
            id,
            bit,
            start,
            timeout,
            window_size: None,
            threshold: None,
        }
    }

    pub const fn with_window(mut self, window_size: u32, threshold: u32) -> Self {
        self.window_size = Some(window_size);
        self.threshold = Some(threshold);
        self
    }

    /// Whether the two signaling periods share at least one instant.
    fn overlaps(&self, other: &DeploymentDescriptor) -> bool {
        let (a_start, a_end) = (self.start.lower_bound(), self.timeout.upper_bound());
        let (b_start, b_end) = (other.start.lower_bound(), other.timeout.upper_bound());
        a_start < b_end && b_start < a_end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTable {
    deployments: [DeploymentDescriptor; MAX_VERSION_BITS_DEPLOYMENTS],
    miner_confirmation_window: u32,
    rule_change_activation_threshold: u32,
}

impl DeploymentTable {
    /// Build a table from one descriptor per deployment, in `DeploymentPos` order.
    pub fn new(
        deployments: [DeploymentDescriptor; MAX_VERSION_BITS_DEPLOYMENTS],
        miner_confirmation_window: u32,
        rule_change_activation_threshold: u32,
    ) -> Result<Self, ConsensusError> {
        for (slot, descriptor) in DeploymentPos::ALL.iter().zip(deployments.iter()) {
            if descriptor.id != *slot {
                return Err(ConsensusError::InvalidDeployment {
                    id: descriptor.id,
                    reason: format!("stored in the slot for {}", slot),
                });
            }
        }

        let table = DeploymentTable {
            deployments,
            miner_confirmation_window,
            rule_change_activation_threshold,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn get(&self, id: DeploymentPos) -> &DeploymentDescriptor {
        &self.deployments[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeploymentDescriptor> {
        self.deployments.iter()
    }

    pub fn miner_confirmation_window(&self) -> u32 {
        self.miner_confirmation_window
    }

    pub fn rule_change_activation_threshold(&self) -> u32 {
        self.rule_change_activation_threshold
    }

    /// Effective signaling window for `id`.
    pub fn window_size(&self, id: DeploymentPos) -> u32 {
        self.get(id).window_size.unwrap_or(self.miner_confirmation_window)
    }

    /// Effective lock-in threshold for `id`.
    pub fn threshold(&self, id: DeploymentPos) -> u32 {
        self.get(id).threshold.unwrap_or(self.rule_change_activation_threshold)
    }

    /// Check threshold/window bounds and bit uniqueness across overlapping periods.
    pub fn validate(&self) -> Result<(), ConsensusError> {
        for descriptor in &self.deployments {
            let id = descriptor.id;
            if descriptor.bit >= VERSIONBITS_NUM_BITS {
                return Err(ConsensusError::InvalidDeployment {
                    id,
                    reason: format!("bit {} out of range", descriptor.bit),
                });
            }
            let window = self.window_size(id);
            let threshold = self.threshold(id);
            if window == 0 {
                return Err(ConsensusError::InvalidDeployment {
                    id,
                    reason: "signaling window is empty".to_string(),
                });
            }
            if threshold > window {
                return Err(ConsensusError::InvalidDeployment {
                    id,
                    reason: format!("threshold {} exceeds window {}", threshold, window),
                });
            }
        }

        for (i, a) in self.deployments.iter().enumerate() {
            for b in &self.deployments[i + 1..] {
                if a.bit == b.bit && a.overlaps(b) {
                    return Err(ConsensusError::InvalidDeployment {
                        id: b.id,
                        reason: format!("bit {} collides with {}", b.bit, a.id),
                    });
                }
            }
        }
        Ok(())
    }

    /// Replace the timing of one deployment.
    ///
    /// `None` leaves the current window size / threshold in place. The table is
    /// re-validated and left untouched if the new timing is rejected.
    pub fn set_timing(
        &mut self,
        id: DeploymentPos,
        start: StartTime,
        timeout: Timeout,
        window_size: Option<u32>,
        threshold: Option<u32>,
    ) -> Result<(), ConsensusError> {
        let previous = self.deployments[id.index()];
        {
            let slot = &mut self.deployments[id.index()];
            slot.start = start;
            slot.timeout = timeout;
            if window_size.is_some() {
                slot.window_size = window_size;
            }
            if threshold.is_some() {
                slot.threshold = threshold;
            }
        }

        if let Err(e) = self.validate() {
            self.deployments[id.index()] = previous;
            return Err(e);
        }
        debug!("Deployment {} timing set to {:?}..{:?}", id, start, timeout);
        Ok(())
    }
}
