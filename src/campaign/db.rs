use crate::database::{JsonFileDatabase, MemoryDatabase};
use crate::error::Error;

use super::Campaign;

/// Storage seam for the campaign collection. The collection is always read
/// and written as one unit.
pub trait CampaignRepository: Send + Sync {
    /// `None` when the collection has never been stored.
    fn load_campaigns(&self) -> Result<Option<Vec<Campaign>>, Error>;

    fn store_campaigns(&self, campaigns: &[Campaign]) -> Result<(), Error>;
}

impl CampaignRepository for JsonFileDatabase {
    #[tracing::instrument(skip(self), fields(path = %self.path().display()))]
    fn load_campaigns(&self) -> Result<Option<Vec<Campaign>>, Error> {
        match self.read()? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, campaigns), fields(path = %self.path().display(), count = campaigns.len()))]
    fn store_campaigns(&self, campaigns: &[Campaign]) -> Result<(), Error> {
        let contents = serde_json::to_string(campaigns)?;
        self.write(&contents)?;

        Ok(())
    }
}

impl CampaignRepository for MemoryDatabase {
    #[tracing::instrument(skip(self))]
    fn load_campaigns(&self) -> Result<Option<Vec<Campaign>>, Error> {
        match self.read() {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, campaigns), fields(count = campaigns.len()))]
    fn store_campaigns(&self, campaigns: &[Campaign]) -> Result<(), Error> {
        let contents = serde_json::to_string(campaigns)?;
        self.write(contents);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn absent_key_loads_as_none() {
        let db = MemoryDatabase::new();
        assert_eq!(db.load_campaigns().unwrap(), None);
    }

    #[test]
    fn stored_collection_loads_in_order() {
        let db = MemoryDatabase::new();
        let campaigns = seed::seed_campaigns();

        db.store_campaigns(&campaigns).unwrap();

        assert_eq!(db.load_campaigns().unwrap(), Some(campaigns));
    }

    #[test]
    fn corrupt_blob_is_a_codec_error() {
        let db = MemoryDatabase::with_contents("{not json");

        let error = db.load_campaigns().unwrap_err();

        assert_eq!(error.error_code(), "E5001001");
    }

    #[test]
    fn stored_ids_with_spaces_still_load() {
        let mut campaigns = seed::seed_campaigns();
        campaigns[0].id = "camp 001".parse().unwrap();
        let db = MemoryDatabase::new();
        db.store_campaigns(&campaigns).unwrap();

        let loaded = db.load_campaigns().unwrap().unwrap();

        assert_eq!(loaded.len(), 5);
        assert_eq!(loaded[0].id.as_str(), "camp 001");
    }

    #[test]
    fn file_database_round_trips_collection() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonFileDatabase::new(dir.path().join("prism_campaigns.json"));
        let campaigns = seed::seed_campaigns();

        db.store_campaigns(&campaigns).unwrap();

        assert_eq!(db.load_campaigns().unwrap(), Some(campaigns));
    }
}
