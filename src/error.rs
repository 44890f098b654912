use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use chrono::NaiveDate;
use derivative::Derivative;
use serde::{Serialize, Serializer};
use serde_json::Error as JsonError;

use crate::campaign::provider::{ProviderEntryId, ProviderKind};
use crate::campaign::CampaignId;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    Invalid,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    CampaignNameMissing,
    CampaignPeriodMissing,
    CampaignPeriodInverted {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    InvalidConfig {
        key: &'static str,
        value: String,
    },

    // 404
    CampaignNotFound {
        campaign_id: CampaignId,
    },
    ProviderEntryNotFound {
        provider_id: ProviderEntryId,
    },

    // 409
    DuplicateProviderType {
        kind: ProviderKind,
    },
    ProviderHasNoTemplate {
        provider_id: ProviderEntryId,
        kind: ProviderKind,
    },

    // 500
    #[serde(serialize_with = "display")]
    FailedStorageIo(#[derivative(PartialEq = "ignore")] IoError),
    #[serde(serialize_with = "display")]
    FailedJsonCodec(#[derivative(PartialEq = "ignore")] JsonError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::CampaignNameMissing => "E4001000",
            Error::CampaignPeriodMissing => "E4001001",
            Error::CampaignPeriodInverted { .. } => "E4001002",
            Error::InvalidConfig { .. } => "E4001003",
            Error::CampaignNotFound { .. } => "E4041000",
            Error::ProviderEntryNotFound { .. } => "E4041001",
            Error::DuplicateProviderType { .. } => "E4091000",
            Error::ProviderHasNoTemplate { .. } => "E4091001",
            Error::FailedStorageIo(_) => "E5001000",
            Error::FailedJsonCodec(_) => "E5001001",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::CampaignNameMissing => "The campaign needs a name",
            Error::CampaignPeriodMissing => "The campaign period needs a start and an end date",
            Error::CampaignPeriodInverted { .. } => {
                "The campaign period starts after it ends"
            }
            Error::InvalidConfig { .. } => "A configuration value could not be parsed",
            Error::CampaignNotFound { .. } => "The requested campaign does not exist",
            Error::ProviderEntryNotFound { .. } => {
                "The requested provider is not configured on the campaign"
            }
            Error::DuplicateProviderType { .. } => {
                "A provider of this type is already configured, the limit is one per type"
            }
            Error::ProviderHasNoTemplate { .. } => {
                "The requested provider type does not use message templates"
            }
            Error::FailedStorageIo(_) => "An error occurred when reading or writing the store",
            Error::FailedJsonCodec(_) => {
                "An error occurred when encoding or decoding campaigns as json"
            }
        }
    }

    pub fn error_class(&self) -> ErrorClass {
        match self {
            Error::CampaignNameMissing => ErrorClass::Invalid,
            Error::CampaignPeriodMissing => ErrorClass::Invalid,
            Error::CampaignPeriodInverted { .. } => ErrorClass::Invalid,
            Error::InvalidConfig { .. } => ErrorClass::Invalid,
            Error::CampaignNotFound { .. } => ErrorClass::NotFound,
            Error::ProviderEntryNotFound { .. } => ErrorClass::NotFound,
            Error::DuplicateProviderType { .. } => ErrorClass::Conflict,
            Error::ProviderHasNoTemplate { .. } => ErrorClass::Conflict,
            Error::FailedStorageIo(_) => ErrorClass::Internal,
            Error::FailedJsonCodec(_) => ErrorClass::Internal,
        }
    }

    /// Renders the error the way callers show it to a user: code, message
    /// and the variant's details as json.
    pub fn report(&self) -> Result<String, Error> {
        #[derive(Serialize)]
        struct Report<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        let report = serde_json::to_string(&Report {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })?;

        Ok(report)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::FailedStorageIo(error)
    }
}

impl From<JsonError> for Error {
    fn from(error: JsonError) -> Error {
        Error::FailedJsonCodec(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FailedStorageIo(err) => Some(err),
            Error::FailedJsonCodec(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
