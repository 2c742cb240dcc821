//! Metric identities and their static attributes

use crate::constants::{
    BASE_CHUNKS, BASE_LATENCY, BASE_QUEUE_LENGTH, BASE_STORAGE, BASE_SYSTEM_DATA, BASE_THROUGHPUT,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a metric's data is retrieved from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchType {
    /// Fetched once per parameter tuple and treated as a stable snapshot
    Read,
    /// Fetched repeatedly; each refresh replaces the previous value
    Modify,
}

impl FetchType {
    /// Wire name of the fetch type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Modify => "modify",
        }
    }
}

impl fmt::Display for FetchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monitored quantity of a database instance
///
/// The set is closed: every table keyed on `Metric` is matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Chunk access frequency
    Access,
    /// CPU usage
    Cpu,
    /// Mean query latency
    Latency,
    /// Scheduler queue length
    #[serde(alias = "queue_length", alias = "queuelength")]
    QueueLength,
    /// Memory usage
    Ram,
    /// Storage footprint
    Storage,
    /// Query throughput
    Throughput,
}

impl Metric {
    /// Every metric, in declaration order
    pub const ALL: [Metric; 7] = [
        Metric::Access,
        Metric::Cpu,
        Metric::Latency,
        Metric::QueueLength,
        Metric::Ram,
        Metric::Storage,
        Metric::Throughput,
    ];

    /// Position of the metric in [`Metric::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Identity name as used by dashboard views and configuration keys
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Cpu => "cpu",
            Self::Latency => "latency",
            Self::QueueLength => "queueLength",
            Self::Ram => "ram",
            Self::Storage => "storage",
            Self::Throughput => "throughput",
        }
    }

    /// Fetch strategy of the metric
    pub fn fetch_type(self) -> FetchType {
        match self {
            Self::Access | Self::Storage => FetchType::Read,
            Self::Cpu | Self::Latency | Self::QueueLength | Self::Ram | Self::Throughput => {
                FetchType::Modify
            }
        }
    }

    /// Logical backend resource the metric is served from
    ///
    /// Several metrics may share a base.
    pub fn base(self) -> &'static str {
        match self {
            Self::Access => BASE_CHUNKS,
            Self::Cpu | Self::Ram => BASE_SYSTEM_DATA,
            Self::Latency => BASE_LATENCY,
            Self::QueueLength => BASE_QUEUE_LENGTH,
            Self::Storage => BASE_STORAGE,
            Self::Throughput => BASE_THROUGHPUT,
        }
    }

    /// Display title for tile and chart labels
    pub fn title(self) -> &'static str {
        match self {
            Self::Access => "Access Frequency",
            Self::Cpu => "CPU",
            Self::Latency => "Latency",
            Self::QueueLength => "Queue Length",
            Self::Ram => "RAM",
            Self::Storage => "Storage",
            Self::Throughput => "Throughput",
        }
    }

    /// Name of the UI building block that renders the metric
    pub fn component(self) -> &'static str {
        match self {
            Self::Access => "Access",
            Self::Cpu => "CPU",
            Self::Latency => "Latency",
            Self::QueueLength => "QueueLength",
            Self::Ram => "RAM",
            Self::Storage => "Storage",
            Self::Throughput => "Throughput",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "access" => Ok(Self::Access),
            "cpu" => Ok(Self::Cpu),
            "latency" => Ok(Self::Latency),
            "queuelength" | "queue_length" | "queue-length" => Ok(Self::QueueLength),
            "ram" => Ok(Self::Ram),
            "storage" => Ok(Self::Storage),
            "throughput" => Ok(Self::Throughput),
            _ => Err(Error::unknown_metric(s)),
        }
    }
}
