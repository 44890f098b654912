use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub type ProviderEntryId = TypedId<ProviderEntry>;
pub type TemplateId = String;

/// Placeholder name to contact schema field key.
pub type FieldMappings = BTreeMap<String, String>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ProviderKind {
    #[serde(rename = "WHATSAPP")]
    WhatsApp,
    #[serde(rename = "PUSH")]
    Push,
    #[serde(rename = "EMAIL")]
    Email,
    #[serde(rename = "AI_AGENT")]
    AiAgent,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::WhatsApp,
        ProviderKind::AiAgent,
        ProviderKind::Push,
        ProviderKind::Email,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::WhatsApp => "WhatsApp",
            ProviderKind::Push => "Push Notification",
            ProviderKind::Email => "Email",
            ProviderKind::AiAgent => "Agente de IA",
        }
    }

    pub fn uses_templates(self) -> bool {
        match self {
            ProviderKind::WhatsApp | ProviderKind::Email | ProviderKind::AiAgent => true,
            ProviderKind::Push => false,
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One channel-specific dispatch configuration owned by a campaign.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ProviderEntry {
    pub id: ProviderEntryId,
    pub label: String,
    #[serde(flatten)]
    pub config: ProviderConfig,
}

impl TypedIdMarker for ProviderEntry {
    fn tag() -> &'static str {
        "prov"
    }
}

impl ProviderEntry {
    pub fn kind(&self) -> ProviderKind {
        self.config.kind()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "config")]
pub enum ProviderConfig {
    #[serde(rename = "WHATSAPP")]
    WhatsApp(WhatsAppConfig),
    #[serde(rename = "PUSH")]
    Push(PushConfig),
    #[serde(rename = "EMAIL")]
    Email(EmailConfig),
    #[serde(rename = "AI_AGENT")]
    AiAgent(AiAgentConfig),
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::WhatsApp(_) => ProviderKind::WhatsApp,
            ProviderConfig::Push(_) => ProviderKind::Push,
            ProviderConfig::Email(_) => ProviderKind::Email,
            ProviderConfig::AiAgent(_) => ProviderKind::AiAgent,
        }
    }

    pub fn provider_id(&self) -> &str {
        match self {
            ProviderConfig::WhatsApp(config) => &config.provider_id,
            ProviderConfig::Push(config) => &config.provider_id,
            ProviderConfig::Email(config) => &config.provider_id,
            ProviderConfig::AiAgent(config) => &config.provider_id,
        }
    }

    pub fn template_id(&self) -> Option<&TemplateId> {
        match self {
            ProviderConfig::WhatsApp(config) => Some(&config.template_id),
            ProviderConfig::Email(config) => Some(&config.template_id),
            ProviderConfig::AiAgent(config) => Some(&config.template_id),
            ProviderConfig::Push(_) => None,
        }
    }

    pub fn field_mappings(&self) -> Option<&FieldMappings> {
        match self {
            ProviderConfig::WhatsApp(config) => Some(&config.field_mappings),
            ProviderConfig::Email(config) => Some(&config.field_mappings),
            ProviderConfig::AiAgent(config) => Some(&config.field_mappings),
            ProviderConfig::Push(_) => None,
        }
    }

    /// Mutable access to the template selection and its mappings, `None`
    /// for channels that send free text.
    pub fn template_mut(&mut self) -> Option<(&mut TemplateId, &mut FieldMappings)> {
        match self {
            ProviderConfig::WhatsApp(config) => {
                Some((&mut config.template_id, &mut config.field_mappings))
            }
            ProviderConfig::Email(config) => {
                Some((&mut config.template_id, &mut config.field_mappings))
            }
            ProviderConfig::AiAgent(config) => {
                Some((&mut config.template_id, &mut config.field_mappings))
            }
            ProviderConfig::Push(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppConfig {
    pub provider_id: String,
    #[serde(default)]
    pub bot_name: String,
    #[serde(default)]
    pub flow_id: String,
    pub template_id: TemplateId,
    #[serde(default)]
    pub field_mappings: FieldMappings,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushConfig {
    pub provider_id: String,
    pub title: String,
    pub body: String,
    pub deep_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    pub provider_id: String,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub subject: String,
    pub template_id: TemplateId,
    #[serde(default)]
    pub field_mappings: FieldMappings,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAgentConfig {
    pub provider_id: String,
    #[serde(default)]
    pub blip_bot_id: String,
    pub template_id: TemplateId,
    #[serde(default)]
    pub field_mappings: FieldMappings,
}
