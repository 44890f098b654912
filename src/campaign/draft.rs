use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog;
use crate::error::Error;

use super::provider::{
    AiAgentConfig, EmailConfig, FieldMappings, ProviderConfig, ProviderEntry, ProviderEntryId,
    ProviderKind, PushConfig, WhatsAppConfig,
};
use super::{Campaign, CampaignPatch, CampaignStatus, NewCampaign, SegmentId};

const DEFAULT_SENDER_EMAIL: &str = "noreply@prism.com";
const DEFAULT_SENDER_NAME: &str = "Prism";

/// Campaign being edited, before it has been validated and handed to the
/// store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignDraft {
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: CampaignStatus,
    pub segments: Vec<SegmentId>,
    pub providers: Vec<ProviderEntry>,
}

impl CampaignDraft {
    pub fn new() -> CampaignDraft {
        CampaignDraft::default()
    }

    pub fn toggle_segment(&mut self, segment_id: &str) {
        match self.segments.iter().position(|id| id == segment_id) {
            Some(index) => {
                self.segments.remove(index);
            }
            None => self.segments.push(segment_id.to_string()),
        }
    }

    /// Adds a provider of `kind` with the console defaults. A campaign holds
    /// at most one provider per kind.
    pub fn add_provider(&mut self, kind: ProviderKind) -> Result<&mut ProviderEntry, Error> {
        if self.providers.iter().any(|entry| entry.kind() == kind) {
            return Err(Error::DuplicateProviderType { kind });
        }

        self.providers.push(default_entry(kind));
        let index = self.providers.len() - 1;

        Ok(&mut self.providers[index])
    }

    pub fn remove_provider(&mut self, provider_id: &ProviderEntryId) -> Result<ProviderEntry, Error> {
        let index = self
            .providers
            .iter()
            .position(|entry| &entry.id == provider_id)
            .ok_or_else(|| Error::ProviderEntryNotFound {
                provider_id: provider_id.clone(),
            })?;

        Ok(self.providers.remove(index))
    }

    pub fn provider_mut(&mut self, provider_id: &ProviderEntryId) -> Result<&mut ProviderEntry, Error> {
        self.providers
            .iter_mut()
            .find(|entry| &entry.id == provider_id)
            .ok_or_else(|| Error::ProviderEntryNotFound {
                provider_id: provider_id.clone(),
            })
    }

    pub fn relabel_provider(&mut self, provider_id: &ProviderEntryId, label: &str) -> Result<(), Error> {
        self.provider_mut(provider_id)?.label = label.to_string();
        Ok(())
    }

    pub fn validate(&self) -> Result<NewCampaign, Error> {
        if self.name.trim().is_empty() {
            return Err(Error::CampaignNameMissing);
        }

        let (start_date, end_date) = match (self.start_date, self.end_date) {
            (Some(start_date), Some(end_date)) => (start_date, end_date),
            _ => return Err(Error::CampaignPeriodMissing),
        };

        if start_date > end_date {
            return Err(Error::CampaignPeriodInverted {
                start_date,
                end_date,
            });
        }

        Ok(NewCampaign {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date,
            end_date,
            segments: self.segments.clone(),
            providers: self.providers.clone(),
            status: self.status,
        })
    }

    /// Validated draft as a patch replacing every editable field.
    pub fn into_patch(self) -> Result<CampaignPatch, Error> {
        let new = self.validate()?;

        Ok(CampaignPatch {
            name: Some(new.name),
            description: Some(new.description),
            start_date: Some(new.start_date),
            end_date: Some(new.end_date),
            segments: Some(new.segments),
            providers: Some(new.providers),
            status: Some(new.status),
        })
    }

    pub fn dispatch_payload(&self) -> DispatchPayload<'_> {
        DispatchPayload {
            campaign: PayloadCampaign {
                name: &self.name,
                description: &self.description,
                period: PayloadPeriod {
                    start_date: self.start_date,
                    end_date: self.end_date,
                },
                segments: &self.segments,
            },
            dispatch_providers: &self.providers,
        }
    }
}

impl From<Campaign> for CampaignDraft {
    fn from(campaign: Campaign) -> CampaignDraft {
        CampaignDraft {
            name: campaign.name,
            description: campaign.description,
            start_date: Some(campaign.start_date),
            end_date: Some(campaign.end_date),
            status: campaign.status,
            segments: campaign.segments,
            providers: campaign.providers,
        }
    }
}

/// Json preview of what a draft would dispatch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPayload<'a> {
    pub campaign: PayloadCampaign<'a>,
    pub dispatch_providers: &'a [ProviderEntry],
}

#[derive(Debug, Serialize)]
pub struct PayloadCampaign<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub period: PayloadPeriod,
    pub segments: &'a [SegmentId],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadPeriod {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DispatchPayload<'_> {
    pub fn to_pretty_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_entry(kind: ProviderKind) -> ProviderEntry {
    let provider_id = first_provider(kind);
    let template_id = first_template(kind);

    let config = match kind {
        ProviderKind::WhatsApp => ProviderConfig::WhatsApp(WhatsAppConfig {
            provider_id,
            bot_name: String::new(),
            flow_id: String::new(),
            template_id,
            field_mappings: FieldMappings::new(),
        }),
        ProviderKind::Push => ProviderConfig::Push(PushConfig {
            provider_id,
            title: "Black Friday chegou!".to_string(),
            body: "Descontos imperdíveis. Toque e aproveite.".to_string(),
            deep_link: "myapp://black-friday".to_string(),
            image_url: Some(String::new()),
        }),
        ProviderKind::Email => ProviderConfig::Email(EmailConfig {
            provider_id,
            sender_email: DEFAULT_SENDER_EMAIL.to_string(),
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            subject: String::new(),
            template_id,
            field_mappings: FieldMappings::new(),
        }),
        ProviderKind::AiAgent => ProviderConfig::AiAgent(AiAgentConfig {
            provider_id,
            blip_bot_id: String::new(),
            template_id,
            field_mappings: FieldMappings::new(),
        }),
    };

    ProviderEntry {
        id: ProviderEntryId::new(),
        label: kind.display_name().to_string(),
        config,
    }
}

fn first_provider(kind: ProviderKind) -> String {
    catalog::channel_providers(kind)
        .first()
        .map(|provider| provider.id.to_string())
        .unwrap_or_default()
}

fn first_template(kind: ProviderKind) -> String {
    catalog::templates_for(kind)
        .first()
        .map(|template| template.id.to_string())
        .unwrap_or_default()
}
