use hera_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::MqSource;

/// Connection settings of a configured middleware instance.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddlewareConnection {
    /// Name server address list.
    pub name_server: Option<String>,
    /// Service endpoint URL.
    pub service_url: Option<String>,
    /// Access key.
    pub access_key: Option<String>,
    /// Secret key.
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,
    /// Authorization token.
    #[serde(default, skip_serializing)]
    pub authorization: Option<String>,
}

impl std::fmt::Debug for MiddlewareConnection {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");

        formatter
            .debug_struct("MiddlewareConnection")
            .field("name_server", &self.name_server)
            .field("service_url", &self.service_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &redact(&self.secret_key))
            .field("authorization", &redact(&self.authorization))
            .finish()
    }
}

/// Persisted message queue or storage instance configured for a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddlewareConfig {
    id: i64,
    alias: NonEmptyString,
    #[serde(rename = "type")]
    type_code: i32,
    region_key: String,
    connection: MiddlewareConnection,
    org_id: Option<String>,
    team_id: Option<String>,
}

impl MiddlewareConfig {
    /// Creates a validated middleware config.
    pub fn new(
        id: i64,
        alias: impl Into<String>,
        type_code: i32,
        region_key: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            alias: NonEmptyString::new(alias)?,
            type_code,
            region_key: region_key.into(),
            connection: MiddlewareConnection::default(),
            org_id: None,
            team_id: None,
        })
    }

    /// Replaces connection settings.
    #[must_use]
    pub fn with_connection(mut self, connection: MiddlewareConnection) -> Self {
        self.connection = connection;
        self
    }

    /// Sets organizational scoping.
    #[must_use]
    pub fn with_scope(mut self, org_id: Option<String>, team_id: Option<String>) -> Self {
        self.org_id = org_id;
        self.team_id = team_id;
        self
    }

    /// Returns the persisted identifier.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the display alias.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.alias.as_str()
    }

    /// Returns the raw type code.
    #[must_use]
    pub fn type_code(&self) -> i32 {
        self.type_code
    }

    /// Returns the message queue source when the type code is known.
    #[must_use]
    pub fn source(&self) -> Option<MqSource> {
        MqSource::from_code(self.type_code)
    }

    /// Returns the machine region key this config belongs to.
    #[must_use]
    pub fn region_key(&self) -> &str {
        self.region_key.as_str()
    }

    /// Returns connection settings.
    #[must_use]
    pub fn connection(&self) -> &MiddlewareConnection {
        &self.connection
    }

    /// Returns the owning organization, if scoped.
    #[must_use]
    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    /// Returns the owning team, if scoped.
    #[must_use]
    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }
}
