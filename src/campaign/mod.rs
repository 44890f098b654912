use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod draft;
pub mod manager;
pub mod provider;

use provider::ProviderEntry;

pub type CampaignId = TypedId<Campaign>;
pub type SegmentId = String;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub segments: Vec<SegmentId>,
    pub providers: Vec<ProviderEntry>,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "camp"
    }
}

impl Campaign {
    pub fn from_new(new: NewCampaign, now: DateTime<Utc>) -> Campaign {
        Campaign {
            id: CampaignId::new(),
            name: new.name,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            segments: new.segments,
            providers: new.providers,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow merge: every field present in the patch replaces the stored
    /// one wholesale.
    pub fn apply(&mut self, patch: CampaignPatch, now: DateTime<Utc>) {
        let CampaignPatch {
            name,
            description,
            start_date,
            end_date,
            segments,
            providers,
            status,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(start_date) = start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            self.end_date = end_date;
        }
        if let Some(segments) = segments {
            self.segments = segments;
        }
        if let Some(providers) = providers {
            self.providers = providers;
        }
        if let Some(status) = status {
            self.status = status;
        }

        self.updated_at = now;
    }

    /// Case-insensitive substring match on name or description.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    pub fn to_pretty_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Finished,
    Scheduled,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 4] = [
        CampaignStatus::Active,
        CampaignStatus::Paused,
        CampaignStatus::Finished,
        CampaignStatus::Scheduled,
    ];

    /// The status a manual toggle moves to. Only active and paused campaigns
    /// can be toggled.
    pub fn toggled(self) -> Option<CampaignStatus> {
        match self {
            CampaignStatus::Active => Some(CampaignStatus::Paused),
            CampaignStatus::Paused => Some(CampaignStatus::Active),
            CampaignStatus::Finished | CampaignStatus::Scheduled => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CampaignStatus::Active => "Ativa",
            CampaignStatus::Paused => "Pausada",
            CampaignStatus::Finished => "Finalizada",
            CampaignStatus::Scheduled => "Agendada",
        }
    }
}

impl Default for CampaignStatus {
    fn default() -> CampaignStatus {
        CampaignStatus::Scheduled
    }
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(CampaignStatus),
}

impl StatusFilter {
    pub fn matches(self, status: CampaignStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl From<CampaignStatus> for StatusFilter {
    fn from(status: CampaignStatus) -> StatusFilter {
        StatusFilter::Only(status)
    }
}

/// Everything a caller supplies to create a campaign. The id and both
/// timestamps are assigned by the store.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub segments: Vec<SegmentId>,
    pub providers: Vec<ProviderEntry>,
    pub status: CampaignStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<ProviderEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
}

impl CampaignPatch {
    pub fn status(status: CampaignStatus) -> CampaignPatch {
        CampaignPatch {
            status: Some(status),
            ..Default::default()
        }
    }
}
