//! Static reference tables the console picks from: audience segments,
//! channel providers, message templates and contact schema fields.
//!
//! Campaigns only store ids from these tables. Nothing checks that a stored
//! id is still listed here.

use serde::Serialize;

use crate::campaign::provider::ProviderKind;

const SEGMENT_LIMIT: usize = 20;
const FILTERED_SEGMENT_LIMIT: usize = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelProvider {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<&'static str>,
    pub body: &'static str,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactField {
    pub key: &'static str,
    pub label: &'static str,
}

pub const SEGMENTS: &[Segment] = &[
    Segment { id: "seg_new_users", name: "Novos usuários (D0–D7)" },
    Segment { id: "seg_high_ltv", name: "Alta Recorrência / LTV" },
    Segment { id: "seg_churn_risk", name: "Risco de churn" },
    Segment { id: "seg_black_friday_vips", name: "BF – VIPs" },
    Segment { id: "seg_cupom_ativo", name: "Usuários com cupom ativo" },
];

const WHATSAPP_PROVIDERS: &[ChannelProvider] = &[
    ChannelProvider { id: "wpp_meta_01", name: "Meta BSP #01" },
    ChannelProvider { id: "wpp_360_01", name: "360Dialog #01" },
];

const PUSH_PROVIDERS: &[ChannelProvider] = &[
    ChannelProvider { id: "push_firebase_01", name: "Firebase (FCM) #01" },
    ChannelProvider { id: "push_sns_01", name: "AWS SNS #01" },
];

const AI_AGENT_PROVIDERS: &[ChannelProvider] = &[
    ChannelProvider { id: "ai_blip_01", name: "Blip AI Agent #01" },
    ChannelProvider { id: "ai_blip_02", name: "Blip AI Agent #02" },
];

const EMAIL_PROVIDERS: &[ChannelProvider] = &[
    ChannelProvider { id: "email_ses_01", name: "AWS SES #01" },
    ChannelProvider { id: "email_sendgrid_01", name: "SendGrid #01" },
];

// shared by whatsapp and the ai agent
const MESSAGE_TEMPLATES: &[Template] = &[
    Template {
        id: "tpl_bf_offer",
        name: "Black Friday - Oferta de Crédito",
        subject: None,
        body: "Olá {{name}}, chegou a Black Friday! Você tem uma oferta de crédito de {{creditvalue}} com taxa de {{credittax}}. Aproveite!",
    },
    Template {
        id: "tpl_credit_approval",
        name: "Aprovação de Crédito",
        subject: None,
        body: "{{name}}, sua solicitação foi aprovada! Crédito de {{creditvalue}} disponível para {{tradingname}}.",
    },
    Template {
        id: "tpl_card_offer",
        name: "Oferta de Cartão",
        subject: None,
        body: "Olá {{name}}! Temos uma oferta especial de cartão para {{tradingname}} com limite de {{limite}}.",
    },
];

const EMAIL_TEMPLATES: &[Template] = &[
    Template {
        id: "tpl_email_bf_offer",
        name: "Black Friday - Oferta de Crédito (Email)",
        subject: Some("🎉 Black Friday: Oferta Especial para {{name}}!"),
        body: "Olá {{name}}, chegou a Black Friday! Você tem uma oferta de crédito de {{creditvalue}} com taxa de {{credittax}}. Aproveite!",
    },
    Template {
        id: "tpl_email_credit_approval",
        name: "Aprovação de Crédito (Email)",
        subject: Some("✅ Crédito Aprovado - {{tradingname}}"),
        body: "{{name}}, sua solicitação foi aprovada! Crédito de {{creditvalue}} disponível para {{tradingname}}.",
    },
];

pub const CONTACT_FIELDS: &[ContactField] = &[
    ContactField { key: "d_tax_identification", label: "CNPJ (Tax ID)" },
    ContactField { key: "d_trading_name", label: "Nome Fantasia (Trading Name)" },
    ContactField { key: "d_first_name", label: "Primeiro Nome (First Name)" },
    ContactField { key: "d_account_type", label: "Tipo de Conta (Account Type)" },
    ContactField { key: "d_segment_type", label: "Tipo de Segmento (Segment Type)" },
    ContactField { key: "d_city", label: "Cidade (City)" },
    ContactField { key: "d_state", label: "Estado (State)" },
    ContactField {
        key: "m_creditengine_last_offer_value_max_formatted",
        label: "Valor Máximo da Oferta (Max Offer Value)",
    },
    ContactField { key: "m_credit_tax", label: "Taxa de Crédito (Credit Tax)" },
    ContactField { key: "m_tiervalue", label: "Tier Value" },
    ContactField { key: "d_ifp_category", label: "Categoria iFood Pago" },
    ContactField { key: "d_ifp_credit_product", label: "Produto de Crédito iFood Pago" },
    ContactField {
        key: "m_credit_card_limit_approved",
        label: "Limite de Cartão Aprovado (Card Limit)",
    },
    ContactField { key: "d_card_type", label: "Tipo de Cartão (Card Type)" },
    ContactField { key: "d_taxa_d7_motor", label: "Taxa D7 Motor" },
];

pub fn segment_name(id: &str) -> Option<&'static str> {
    SEGMENTS
        .iter()
        .find(|segment| segment.id == id)
        .map(|segment| segment.name)
}

/// Segments whose name contains `filter`, ignoring case. An empty filter
/// lists the first few segments only.
pub fn search_segments(filter: &str) -> Vec<Segment> {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return SEGMENTS.iter().take(SEGMENT_LIMIT).copied().collect();
    }

    SEGMENTS
        .iter()
        .filter(|segment| segment.name.to_lowercase().contains(&filter))
        .take(FILTERED_SEGMENT_LIMIT)
        .copied()
        .collect()
}

pub fn channel_providers(kind: ProviderKind) -> &'static [ChannelProvider] {
    match kind {
        ProviderKind::WhatsApp => WHATSAPP_PROVIDERS,
        ProviderKind::Push => PUSH_PROVIDERS,
        ProviderKind::Email => EMAIL_PROVIDERS,
        ProviderKind::AiAgent => AI_AGENT_PROVIDERS,
    }
}

pub fn channel_provider_name(kind: ProviderKind, id: &str) -> Option<&'static str> {
    channel_providers(kind)
        .iter()
        .find(|provider| provider.id == id)
        .map(|provider| provider.name)
}

pub fn templates_for(kind: ProviderKind) -> &'static [Template] {
    match kind {
        ProviderKind::WhatsApp | ProviderKind::AiAgent => MESSAGE_TEMPLATES,
        ProviderKind::Email => EMAIL_TEMPLATES,
        ProviderKind::Push => &[],
    }
}

pub fn find_template(kind: ProviderKind, id: &str) -> Option<&'static Template> {
    templates_for(kind).iter().find(|template| template.id == id)
}

pub fn contact_field_label(key: &str) -> Option<&'static str> {
    CONTACT_FIELDS
        .iter()
        .find(|field| field.key == key)
        .map(|field| field.label)
}
