pub mod campaign;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod seed;
pub mod template;
pub mod typedid;

pub use campaign::db::CampaignRepository;
pub use campaign::{Campaign, CampaignId, CampaignPatch, CampaignStatus, NewCampaign, StatusFilter};
pub use config::Config;
pub use database::{JsonFileDatabase, MemoryDatabase};
pub use error::Error;
