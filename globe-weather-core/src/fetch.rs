//! Fetch lifecycle for the active location's weather.
//!
//! Every fetch is tagged with a [`RequestId`]. Only the most recently issued
//! id may settle the tracker, so a slow response for an old location can
//! never overwrite the result for the location the user picked last.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::location::Location;
use crate::weather::WeatherSnapshot;

/// Monotonic tag for one fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the latest fetch stands.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success(WeatherSnapshot),
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What happens to the last good snapshot when a later fetch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionPolicy {
    /// Keep showing the previous snapshot next to the error.
    #[default]
    Keep,
    /// Drop the previous snapshot.
    Clear,
}

impl FromStr for RetentionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(RetentionPolicy::Keep),
            "clear" => Ok(RetentionPolicy::Clear),
            other => Err(format!("unknown retention policy '{other}' (expected keep or clear)")),
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RetentionPolicy::Keep => "keep",
            RetentionPolicy::Clear => "clear",
        })
    }
}

/// Tracks the in-flight request, its status and the last good snapshot
/// together with the location it was fetched for.
#[derive(Clone, Debug, Default)]
pub struct WeatherTracker {
    status: FetchStatus,
    retained: Option<(Location, WeatherSnapshot)>,
    issued: u64,
    pending: Option<RequestId>,
    policy: RetentionPolicy,
}

impl WeatherTracker {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Issue a new request id and enter `Loading`. Any earlier request
    /// becomes stale. The retained snapshot is left alone.
    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        self.pending = Some(id);
        self.status = FetchStatus::Loading;
        id
    }

    /// Settle request `id`. A success carries the location it was fetched
    /// for. Returns `false` (and changes nothing) when `id` is not the latest
    /// outstanding request.
    pub fn resolve(
        &mut self,
        id: RequestId,
        result: Result<(Location, WeatherSnapshot), String>,
    ) -> bool {
        if self.pending != Some(id) {
            debug!(request = %id, pending = ?self.pending, "discarding stale weather result");
            return false;
        }
        self.pending = None;
        match result {
            Ok((location, snapshot)) => {
                self.status = FetchStatus::Success(snapshot.clone());
                self.retained = Some((location, snapshot));
            }
            Err(message) => {
                if self.policy == RetentionPolicy::Clear {
                    self.retained = None;
                }
                self.status = FetchStatus::Failed(message);
            }
        }
        true
    }

    /// Begin and immediately fail a request, for errors known before any
    /// network call (such as a missing API key).
    pub fn fail_now(&mut self, message: impl Into<String>) -> RequestId {
        let id = self.begin();
        self.resolve(id, Err(message.into()));
        id
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// The last good snapshot, subject to the retention policy.
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.retained.as_ref().map(|(_, snapshot)| snapshot)
    }

    /// The last good snapshot and the location it describes. This is not
    /// necessarily the active location: with [`RetentionPolicy::Keep`] a
    /// failed fetch for a new point leaves the previous pair in place.
    pub fn retained(&self) -> Option<(Location, &WeatherSnapshot)> {
        self.retained
            .as_ref()
            .map(|(location, snapshot)| (*location, snapshot))
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}
