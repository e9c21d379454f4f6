use mongodb::{Client, Collection, Database};

use wayfare_core::catalog::{Bus, CatalogEntity, Driver, Flight, Train};
use wayfare_core::user::User;

/// Thin handle over the application database. The driver manages its own
/// connection pool; cloning is cheap.
#[derive(Clone)]
pub struct DbClient {
    db: Database,
}

impl DbClient {
    pub async fn new(url: &str, db_name: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        Ok(Self {
            db: client.database(db_name),
        })
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    /// Untyped view of a catalog collection, used by the admin CRUD paths
    /// which store client-submitted shapes as-is.
    pub fn catalog(&self, entity: CatalogEntity) -> Collection<bson::Document> {
        self.db.collection(entity.collection_name())
    }

    pub fn trains(&self) -> Collection<Train> {
        self.db.collection(CatalogEntity::Train.collection_name())
    }

    pub fn buses(&self) -> Collection<Bus> {
        self.db.collection(CatalogEntity::Bus.collection_name())
    }

    pub fn flights(&self) -> Collection<Flight> {
        self.db.collection(CatalogEntity::Flight.collection_name())
    }

    pub fn drivers(&self) -> Collection<Driver> {
        self.db.collection(CatalogEntity::Driver.collection_name())
    }
}
