use chrono::Utc;
use tracing::{debug, info};

use crate::error::Error;
use crate::seed;

use super::db::CampaignRepository;
use super::{Campaign, CampaignId, CampaignPatch, NewCampaign, StatusFilter};

/// Startup step: stores the built-in campaigns if nothing was ever stored.
/// Returns whether it seeded.
#[tracing::instrument(skip(db))]
pub fn initialize_campaigns(db: &dyn CampaignRepository) -> Result<bool, Error> {
    if db.load_campaigns()?.is_some() {
        return Ok(false);
    }

    let campaigns = seed::seed(db)?;
    info!(count = campaigns.len(), "seeded campaign store");

    Ok(true)
}

/// Replaces the stored collection with the built-in campaigns.
#[tracing::instrument(skip(db))]
pub fn reset_campaigns(db: &dyn CampaignRepository) -> Result<Vec<Campaign>, Error> {
    let campaigns = seed::seed(db)?;
    info!(count = campaigns.len(), "reset campaign store");

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub fn get_campaigns(db: &dyn CampaignRepository) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.load_campaigns()?.unwrap_or_default();

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub fn get_campaign_by_id(
    db: &dyn CampaignRepository,
    campaign_id: &CampaignId,
) -> Result<Option<Campaign>, Error> {
    let campaign = get_campaigns(db)?
        .into_iter()
        .find(|campaign| &campaign.id == campaign_id);

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub fn expect_campaign_by_id(
    db: &dyn CampaignRepository,
    campaign_id: &CampaignId,
) -> Result<Campaign, Error> {
    get_campaign_by_id(db, campaign_id)?.ok_or_else(|| Error::CampaignNotFound {
        campaign_id: campaign_id.clone(),
    })
}

#[tracing::instrument(skip(db, new), fields(name = %new.name))]
pub fn create_campaign(db: &dyn CampaignRepository, new: NewCampaign) -> Result<Campaign, Error> {
    let mut campaigns = get_campaigns(db)?;

    let campaign = Campaign::from_new(new, Utc::now());
    campaigns.push(campaign.clone());

    db.store_campaigns(&campaigns)?;
    info!(campaign_id = %campaign.id, "created campaign");

    Ok(campaign)
}

/// Merges `patch` onto the stored campaign. `None` if no campaign has the
/// id, in which case nothing is written.
#[tracing::instrument(skip(db, patch))]
pub fn update_campaign(
    db: &dyn CampaignRepository,
    campaign_id: &CampaignId,
    patch: CampaignPatch,
) -> Result<Option<Campaign>, Error> {
    let mut campaigns = get_campaigns(db)?;

    let campaign = match campaigns.iter_mut().find(|c| &c.id == campaign_id) {
        Some(campaign) => campaign,
        None => {
            debug!("campaign not found");
            return Ok(None);
        }
    };

    campaign.apply(patch, Utc::now());
    let campaign = campaign.clone();

    db.store_campaigns(&campaigns)?;

    Ok(Some(campaign))
}

/// Removes the campaign. Returns whether it existed.
#[tracing::instrument(skip(db))]
pub fn delete_campaign(db: &dyn CampaignRepository, campaign_id: &CampaignId) -> Result<bool, Error> {
    let campaigns = get_campaigns(db)?;
    let count = campaigns.len();

    let remaining: Vec<Campaign> = campaigns
        .into_iter()
        .filter(|campaign| &campaign.id != campaign_id)
        .collect();

    if remaining.len() == count {
        debug!("campaign not found");
        return Ok(false);
    }

    db.store_campaigns(&remaining)?;
    info!("deleted campaign");

    Ok(true)
}

/// Flips an active campaign to paused and back. Scheduled and finished
/// campaigns are left alone and yield `None`, as does an unknown id.
#[tracing::instrument(skip(db))]
pub fn toggle_campaign_status(
    db: &dyn CampaignRepository,
    campaign_id: &CampaignId,
) -> Result<Option<Campaign>, Error> {
    let campaign = match get_campaign_by_id(db, campaign_id)? {
        Some(campaign) => campaign,
        None => return Ok(None),
    };

    let status = match campaign.status.toggled() {
        Some(status) => status,
        None => {
            debug!(status = ?campaign.status, "status cannot be toggled");
            return Ok(None);
        }
    };

    info!(from = ?campaign.status, to = ?status, "toggling campaign status");
    update_campaign(db, campaign_id, CampaignPatch::status(status))
}

#[tracing::instrument(skip(db))]
pub fn search_campaigns(db: &dyn CampaignRepository, query: &str) -> Result<Vec<Campaign>, Error> {
    let campaigns = get_campaigns(db)?
        .into_iter()
        .filter(|campaign| campaign.matches_query(query))
        .collect();

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub fn filter_campaigns_by_status(
    db: &dyn CampaignRepository,
    filter: StatusFilter,
) -> Result<Vec<Campaign>, Error> {
    let campaigns = get_campaigns(db)?
        .into_iter()
        .filter(|campaign| filter.matches(campaign.status))
        .collect();

    Ok(campaigns)
}
