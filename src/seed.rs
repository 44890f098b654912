use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::campaign::db::CampaignRepository;
use crate::campaign::provider::{
    AiAgentConfig, EmailConfig, FieldMappings, ProviderConfig, ProviderEntry, PushConfig,
    WhatsAppConfig,
};
use crate::campaign::{Campaign, CampaignStatus};
use crate::error::Error;

/// Writes the built-in example campaigns, replacing whatever is stored.
pub fn seed(db: &dyn CampaignRepository) -> Result<Vec<Campaign>, Error> {
    let campaigns = seed_campaigns();
    db.store_campaigns(&campaigns)?;

    Ok(campaigns)
}

pub fn seed_campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: "camp_001".parse().unwrap(),
            name: "black-friday-2025-vip".to_string(),
            description: "Campanha de Black Friday para segmentos VIP e alta recorrência."
                .to_string(),
            start_date: date(2025, 11, 25),
            end_date: date(2025, 11, 30),
            segments: vec!["seg_black_friday_vips".into(), "seg_high_ltv".into()],
            providers: vec![ProviderEntry {
                id: "prov_001".parse().unwrap(),
                label: "WhatsApp VIP".to_string(),
                config: ProviderConfig::WhatsApp(WhatsAppConfig {
                    provider_id: "wpp_meta_01".to_string(),
                    bot_name: "bf-bot-vip".to_string(),
                    flow_id: "flow_123456".to_string(),
                    template_id: "tpl_bf_offer".to_string(),
                    field_mappings: mappings(&[
                        ("name", "d_first_name"),
                        ("creditvalue", "m_creditengine_last_offer_value_max_formatted"),
                        ("credittax", "m_credit_tax"),
                    ]),
                }),
            }],
            status: CampaignStatus::Active,
            created_at: timestamp(2025, 10, 15, 10, 30),
            updated_at: timestamp(2025, 10, 15, 10, 30),
        },
        Campaign {
            id: "camp_002".parse().unwrap(),
            name: "credito-aprovado-notificacao".to_string(),
            description: "Notificação automática para usuários com crédito aprovado.".to_string(),
            start_date: date(2025, 10, 1),
            end_date: date(2025, 12, 31),
            segments: vec!["seg_new_users".into()],
            providers: vec![
                ProviderEntry {
                    id: "prov_002".parse().unwrap(),
                    label: "Push Notification".to_string(),
                    config: ProviderConfig::Push(PushConfig {
                        provider_id: "push_firebase_01".to_string(),
                        title: "Crédito Aprovado!".to_string(),
                        body: "Seu crédito foi aprovado. Confira agora.".to_string(),
                        deep_link: "myapp://credit-approved".to_string(),
                        image_url: Some(String::new()),
                    }),
                },
                ProviderEntry {
                    id: "prov_003".parse().unwrap(),
                    label: "Email".to_string(),
                    config: ProviderConfig::Email(EmailConfig {
                        provider_id: "email_ses_01".to_string(),
                        sender_email: "noreply@prism.com".to_string(),
                        sender_name: "Prism".to_string(),
                        subject: "Crédito Aprovado".to_string(),
                        template_id: "tpl_email_credit_approval".to_string(),
                        field_mappings: mappings(&[
                            ("name", "d_first_name"),
                            ("tradingname", "d_trading_name"),
                            ("creditvalue", "m_creditengine_last_offer_value_max_formatted"),
                        ]),
                    }),
                },
            ],
            status: CampaignStatus::Active,
            created_at: timestamp(2025, 9, 20, 14, 0),
            updated_at: timestamp(2025, 9, 20, 14, 0),
        },
        Campaign {
            id: "camp_003".parse().unwrap(),
            name: "cartao-oferta-especial".to_string(),
            description: "Oferta de cartão de crédito para alta recorrência.".to_string(),
            start_date: date(2025, 11, 1),
            end_date: date(2025, 11, 15),
            segments: vec!["seg_high_ltv".into()],
            providers: vec![ProviderEntry {
                id: "prov_004".parse().unwrap(),
                label: "Agente de IA".to_string(),
                config: ProviderConfig::AiAgent(AiAgentConfig {
                    provider_id: "ai_blip_01".to_string(),
                    blip_bot_id: "bot-card-offer-001".to_string(),
                    template_id: "tpl_card_offer".to_string(),
                    field_mappings: mappings(&[
                        ("name", "d_first_name"),
                        ("tradingname", "d_trading_name"),
                        ("limite", "m_credit_card_limit_approved"),
                    ]),
                }),
            }],
            status: CampaignStatus::Scheduled,
            created_at: timestamp(2025, 10, 10, 9, 15),
            updated_at: timestamp(2025, 10, 10, 9, 15),
        },
        Campaign {
            id: "camp_004".parse().unwrap(),
            name: "retencao-churn-risk".to_string(),
            description: "Campanha de retenção para usuários com risco de churn.".to_string(),
            start_date: date(2025, 9, 1),
            end_date: date(2025, 9, 30),
            segments: vec!["seg_churn_risk".into()],
            providers: vec![ProviderEntry {
                id: "prov_005".parse().unwrap(),
                label: "WhatsApp".to_string(),
                config: ProviderConfig::WhatsApp(WhatsAppConfig {
                    provider_id: "wpp_360_01".to_string(),
                    bot_name: "retention-bot".to_string(),
                    flow_id: "flow_retention_001".to_string(),
                    template_id: "tpl_credit_approval".to_string(),
                    field_mappings: mappings(&[
                        ("name", "d_first_name"),
                        ("tradingname", "d_trading_name"),
                        ("creditvalue", "m_creditengine_last_offer_value_max_formatted"),
                    ]),
                }),
            }],
            status: CampaignStatus::Finished,
            created_at: timestamp(2025, 8, 25, 16, 45),
            updated_at: timestamp(2025, 8, 25, 16, 45),
        },
        Campaign {
            id: "camp_005".parse().unwrap(),
            name: "cupom-ativo-promocao".to_string(),
            description: "Promoção para usuários com cupom ativo.".to_string(),
            start_date: date(2025, 10, 20),
            end_date: date(2025, 10, 25),
            segments: vec!["seg_cupom_ativo".into()],
            providers: vec![ProviderEntry {
                id: "prov_006".parse().unwrap(),
                label: "Push Notification".to_string(),
                config: ProviderConfig::Push(PushConfig {
                    provider_id: "push_sns_01".to_string(),
                    title: "Seu cupom está ativo!".to_string(),
                    body: "Use seu cupom agora e ganhe desconto exclusivo.".to_string(),
                    deep_link: "myapp://coupons".to_string(),
                    image_url: Some("https://example.com/coupon.png".to_string()),
                }),
            }],
            status: CampaignStatus::Paused,
            created_at: timestamp(2025, 10, 12, 11, 20),
            updated_at: timestamp(2025, 10, 18, 15, 30),
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

fn mappings(pairs: &[(&str, &str)]) -> FieldMappings {
    pairs
        .iter()
        .map(|(placeholder, field)| (placeholder.to_string(), field.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::database::MemoryDatabase;

    #[test]
    fn seed_set_covers_every_status_with_unique_ids() {
        let campaigns = seed_campaigns();

        let ids: HashSet<_> = campaigns.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), campaigns.len());

        for status in CampaignStatus::ALL.iter() {
            assert!(campaigns.iter().any(|c| c.status == *status));
        }
        assert!(campaigns.iter().all(|c| c.start_date <= c.end_date));
    }

    #[test]
    fn seed_overwrites_the_store() {
        let db = MemoryDatabase::with_contents("[]");

        let seeded = seed(&db).unwrap();

        assert_eq!(db.load_campaigns().unwrap(), Some(seeded));
    }
}
