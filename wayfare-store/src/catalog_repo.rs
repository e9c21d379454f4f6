use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use tracing::info;

use wayfare_core::catalog::{Bus, CatalogEntity, Driver, Flight, Train};
use wayfare_core::repository::CatalogRepository;
use wayfare_core::search::{class_key, TrainSearchQuery};

use crate::database::DbClient;

pub struct MongoCatalogRepository {
    db: DbClient,
}

impl MongoCatalogRepository {
    pub fn new(db: &DbClient) -> Self {
        Self { db: db.clone() }
    }
}

fn route_filter(from: &str, to: &str) -> Document {
    doc! {
        "from": { "$regex": from, "$options": "i" },
        "to": { "$regex": to, "$options": "i" },
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    async fn list(
        &self,
        entity: CatalogEntity,
    ) -> Result<Vec<Document>, Box<dyn std::error::Error + Send + Sync>> {
        let cursor = self.db.catalog(entity).find(doc! {}).await?;
        let records = cursor.try_collect().await?;
        Ok(records)
    }

    async fn add(
        &self,
        entity: CatalogEntity,
        record: Document,
    ) -> Result<Document, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.db.catalog(entity).insert_one(&record).await?;
        let mut stored = record;
        stored.insert("_id", result.inserted_id);
        info!("{} added to catalog", entity.display_name());
        Ok(stored)
    }

    async fn update(
        &self,
        entity: CatalogEntity,
        id: ObjectId,
        patch: Document,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = self
            .db
            .catalog(entity)
            .update_one(doc! { "_id": id }, doc! { "$set": patch })
            .await?;
        Ok(result.matched_count)
    }

    async fn delete(
        &self,
        entity: CatalogEntity,
        id: ObjectId,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = self
            .db
            .catalog(entity)
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn search_trains(
        &self,
        query: &TrainSearchQuery,
    ) -> Result<Vec<Train>, Box<dyn std::error::Error + Send + Sync>> {
        // Same predicate as wayfare_core::search::train_matches, pushed down
        // to the server: substring regex on the route, key existence on the
        // uppercased class code.
        let mut filter = route_filter(&query.from, &query.to);
        filter.insert(
            format!("classes.{}", class_key(&query.class)),
            doc! { "$exists": true },
        );

        let cursor = self.db.trains().find(filter).await?;
        let trains = cursor.try_collect().await?;
        Ok(trains)
    }

    async fn search_buses(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Bus>, Box<dyn std::error::Error + Send + Sync>> {
        let cursor = self.db.buses().find(route_filter(from, to)).await?;
        let buses = cursor.try_collect().await?;
        Ok(buses)
    }

    async fn search_flights(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>> {
        let cursor = self.db.flights().find(route_filter(from, to)).await?;
        let flights = cursor.try_collect().await?;
        Ok(flights)
    }

    async fn drivers_by_type(
        &self,
        cab_type: &str,
    ) -> Result<Vec<Driver>, Box<dyn std::error::Error + Send + Sync>> {
        let cursor = self.db.drivers().find(doc! { "type": cab_type }).await?;
        let drivers = cursor.try_collect().await?;
        Ok(drivers)
    }
}
