use chrono::NaiveDate;

use prism::campaign::draft::CampaignDraft;
use prism::campaign::manager;
use prism::campaign::provider::ProviderKind;
use prism::{template, CampaignRepository, CampaignStatus, JsonFileDatabase};

#[test]
fn create_edit_and_delete_campaign_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prism_campaigns.json");
    let db = JsonFileDatabase::new(&path);

    assert!(manager::initialize_campaigns(&db).unwrap());
    assert_eq!(manager::get_campaigns(&db).unwrap().len(), 5);

    let mut draft = CampaignDraft::new();
    draft.name = "The Green Bean Brigade".into();
    draft.start_date = NaiveDate::from_ymd_opt(2026, 11, 20);
    draft.end_date = NaiveDate::from_ymd_opt(2026, 11, 30);
    draft.toggle_segment("seg_black_friday_vips");

    let entry = draft.add_provider(ProviderKind::WhatsApp).unwrap();
    let placeholders = template::entry_placeholders(entry);
    assert_eq!(placeholders, vec!["name", "creditvalue", "credittax"]);
    *entry = template::set_mapping(entry.clone(), "name", "d_first_name").unwrap();

    let campaign = manager::create_campaign(&db, draft.validate().unwrap()).unwrap();
    assert_eq!(campaign.created_at, campaign.updated_at);

    // a second handle on the same file sees the write
    let reopened = JsonFileDatabase::new(&path);
    let stored = manager::expect_campaign_by_id(&reopened, &campaign.id).unwrap();
    assert_eq!(stored, campaign);
    let mappings = stored.providers[0].config.field_mappings().unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(
        template::unmapped_placeholders(&placeholders, mappings),
        vec!["creditvalue", "credittax"]
    );

    let mut draft = CampaignDraft::from(stored);
    draft.status = CampaignStatus::Active;
    let provider_id = draft.providers[0].id.clone();
    let entry = draft.provider_mut(&provider_id).unwrap();
    *entry = template::select_template(entry.clone(), "tpl_card_offer").unwrap();

    let updated = manager::update_campaign(&db, &campaign.id, draft.into_patch().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, CampaignStatus::Active);
    assert!(updated.providers[0].config.field_mappings().unwrap().is_empty());
    assert!(updated.updated_at >= campaign.updated_at);
    assert_eq!(updated.created_at, campaign.created_at);

    let paused = manager::toggle_campaign_status(&db, &campaign.id)
        .unwrap()
        .unwrap();
    assert_eq!(paused.status, CampaignStatus::Paused);

    assert!(manager::delete_campaign(&db, &campaign.id).unwrap());
    assert!(!manager::delete_campaign(&db, &campaign.id).unwrap());
    assert_eq!(manager::get_campaign_by_id(&db, &campaign.id).unwrap(), None);
    assert_eq!(manager::get_campaigns(&db).unwrap().len(), 5);
}

#[test]
fn last_writer_wins_between_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prism_campaigns.json");
    let first = JsonFileDatabase::new(&path);
    let second = JsonFileDatabase::new(&path);
    manager::initialize_campaigns(&first).unwrap();

    // both handles read the same collection, then write in turn
    let mut from_first = first.load_campaigns().unwrap().unwrap();
    let mut from_second = second.load_campaigns().unwrap().unwrap();
    from_first[0].name = "first".into();
    from_second[1].name = "second".into();
    first.store_campaigns(&from_first).unwrap();
    second.store_campaigns(&from_second).unwrap();

    let stored = manager::get_campaigns(&first).unwrap();
    assert_ne!(stored[0].name, "first");
    assert_eq!(stored[1].name, "second");
}

#[test]
fn failed_write_leaves_stored_collection_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prism_campaigns.json");
    let db = JsonFileDatabase::new(&path);
    manager::initialize_campaigns(&db).unwrap();
    let before = manager::get_campaigns(&db).unwrap();

    // a directory in the staging spot makes every write fail
    std::fs::create_dir(dir.path().join("prism_campaigns.json.tmp")).unwrap();

    let mut draft = CampaignDraft::new();
    draft.name = "never stored".into();
    draft.start_date = NaiveDate::from_ymd_opt(2026, 1, 1);
    draft.end_date = NaiveDate::from_ymd_opt(2026, 1, 2);
    let error = manager::create_campaign(&db, draft.validate().unwrap()).unwrap_err();
    assert_eq!(error.error_code(), "E5001000");

    assert_eq!(manager::get_campaigns(&db).unwrap(), before);
}

#[test]
fn persisted_file_is_a_json_array_of_campaigns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prism_campaigns.json");
    let db = JsonFileDatabase::new(&path);
    manager::initialize_campaigns(&db).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();

    let campaigns = value.as_array().unwrap();
    assert_eq!(campaigns.len(), 5);
    assert_eq!(campaigns[0]["id"], "camp_001");
    assert_eq!(campaigns[0]["startDate"], "2025-11-25");
    assert_eq!(campaigns[0]["providers"][0]["type"], "WHATSAPP");
    assert_eq!(
        campaigns[0]["providers"][0]["config"]["fieldMappings"]["credittax"],
        "m_credit_tax"
    );
}
