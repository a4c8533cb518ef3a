//! Static enumeration catalogs backing console dictionaries.
//!
//! Every catalog is a closed const table. `all()` returns the declared order,
//! which is also the order every dictionary query emits.

use std::str::FromStr;

use hera_core::AppError;
use serde::{Deserialize, Serialize};

/// Resource kinds that can be attached to a log or monitoring project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Message queue clusters.
    MessageQueue,
    /// Storage clusters receiving collected data.
    Storage,
    /// Configuration center namespaces.
    ConfigCenter,
}

impl ResourceKind {
    /// Returns the stable numeric code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::MessageQueue => 1,
            Self::Storage => 2,
            Self::ConfigCenter => 3,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MessageQueue => "MQ",
            Self::Storage => "Storage",
            Self::ConfigCenter => "Config Center",
        }
    }

    /// Returns all resource kinds in declared order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ResourceKind] = &[
            ResourceKind::MessageQueue,
            ResourceKind::Storage,
            ResourceKind::ConfigCenter,
        ];

        ALL
    }
}

/// Message queue products a log pipeline can consume from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MqSource {
    /// Apache RocketMQ.
    RocketMq,
    /// Apache Kafka.
    Kafka,
}

impl MqSource {
    /// Returns the stable numeric code persisted as a middleware config type.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::RocketMq => 2,
            Self::Kafka => 4,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RocketMq => "RocketMQ",
            Self::Kafka => "Kafka",
        }
    }

    /// Returns all message queue sources in declared order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[MqSource] = &[MqSource::RocketMq, MqSource::Kafka];

        ALL
    }

    /// Resolves a persisted type code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|source| source.code() == code)
    }
}

/// Machine rooms a deployment can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineRegion {
    /// Northern mainland machine room.
    CnNorth,
    /// Eastern mainland machine room.
    CnEast,
    /// Southern mainland machine room.
    CnSouth,
    /// Machine rooms outside the mainland.
    Overseas,
}

impl MachineRegion {
    /// Returns the machine key used as a selection value and lookup key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::CnNorth => "cn-north",
            Self::CnEast => "cn-east",
            Self::CnSouth => "cn-south",
            Self::Overseas => "overseas",
        }
    }

    /// Returns the localized display name.
    #[must_use]
    pub fn localized_name(&self) -> &'static str {
        match self {
            Self::CnNorth => "华北机房",
            Self::CnEast => "华东机房",
            Self::CnSouth => "华南机房",
            Self::Overseas => "海外机房",
        }
    }

    /// Returns all regions in declared order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[MachineRegion] = &[
            MachineRegion::CnNorth,
            MachineRegion::CnEast,
            MachineRegion::CnSouth,
            MachineRegion::Overseas,
        ];

        ALL
    }
}

impl FromStr for MachineRegion {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|region| region.key() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown machine region '{value}'")))
    }
}

/// Deployment modes of a monitored application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployWay {
    /// Deployed on physical or virtual machines.
    Machine,
    /// Deployed as plain containers.
    Container,
    /// Deployed on Kubernetes.
    Kubernetes,
}

impl DeployWay {
    /// Returns the stable numeric code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Machine => 1,
            Self::Container => 2,
            Self::Kubernetes => 3,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Machine => "machine",
            Self::Container => "container",
            Self::Kubernetes => "k8s",
        }
    }

    /// Returns all deploy ways in declared order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[DeployWay] = &[
            DeployWay::Machine,
            DeployWay::Container,
            DeployWay::Kubernetes,
        ];

        ALL
    }
}

/// Project types a log store can be created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// Business application.
    Application,
    /// Middleware component.
    Middleware,
    /// Big data job.
    BigData,
}

impl ProjectType {
    /// Returns the stable numeric code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Application => 0,
            Self::Middleware => 1,
            Self::BigData => 2,
        }
    }

    /// Returns the type label.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Middleware => "middleware",
            Self::BigData => "bigdata",
        }
    }

    /// Returns all project types in declared order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ProjectType] = &[
            ProjectType::Application,
            ProjectType::Middleware,
            ProjectType::BigData,
        ];

        ALL
    }
}
