use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

use prism::campaign::manager;
use prism::{CampaignStatus, Config, Error, JsonFileDatabase, StatusFilter};

fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_span_events(FmtSpan::NEW)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("opening campaign store: {}", config.store_path.display());
    let db = JsonFileDatabase::new(&config.store_path);

    if manager::initialize_campaigns(&db)? {
        info!("store was empty, loaded example campaigns");
    }

    for status in CampaignStatus::ALL.iter() {
        let campaigns = manager::filter_campaigns_by_status(&db, StatusFilter::Only(*status))?;
        info!(status = %status, count = campaigns.len(), "campaigns");
    }

    let campaigns = manager::get_campaigns(&db)?;
    println!("{}", serde_json::to_string_pretty(&campaigns)?);

    Ok(())
}
