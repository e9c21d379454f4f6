use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use tracing::info;

use wayfare_core::booking::{Booking, BookingStatus, PendingCancellation};
use wayfare_core::repository::UserRepository;
use wayfare_core::user::User;

use crate::database::DbClient;

pub struct MongoUserRepository {
    db: DbClient,
}

impl MongoUserRepository {
    pub fn new(db: &DbClient) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
        let user = self.db.users().find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn insert(&self, user: &User) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.db.users().insert_one(user).await?;
        info!("user registered: {}", user.email);
        Ok(())
    }

    async fn booking_history(
        &self,
        email: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let user = self.db.users().find_one(doc! { "email": email }).await?;
        Ok(user.map(|u| u.booking_history).unwrap_or_default())
    }

    async fn push_booking(
        &self,
        email: &str,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let entry = bson::to_bson(booking)?;
        self.db
            .users()
            .update_one(
                doc! { "email": email },
                doc! { "$push": { "bookingHistory": entry } },
            )
            .await?;
        Ok(())
    }

    async fn request_cancellation(
        &self,
        email: &str,
        booking_id: ObjectId,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let updated = self
            .db
            .users()
            .find_one_and_update(
                doc! { "email": email, "bookingHistory._id": booking_id },
                doc! { "$set": {
                    "bookingHistory.$.status": BookingStatus::CancellationPending.as_str()
                } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.and_then(|user| {
            user.booking_history
                .into_iter()
                .find(|b| b.id == Some(booking_id))
        }))
    }

    async fn resolve_cancellation(
        &self,
        booking_id: ObjectId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let updated = self
            .db
            .users()
            .find_one_and_update(
                doc! { "bookingHistory._id": booking_id },
                doc! { "$set": { "bookingHistory.$.status": status.as_str() } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.and_then(|user| {
            user.booking_history
                .into_iter()
                .find(|b| b.id == Some(booking_id))
        }))
    }

    async fn pending_cancellations(
        &self,
    ) -> Result<Vec<PendingCancellation>, Box<dyn std::error::Error + Send + Sync>> {
        let filter = doc! {
            "bookingHistory.status": BookingStatus::CancellationPending.as_str()
        };
        let mut cursor = self.db.users().find(filter).await?;

        let mut pending = Vec::new();
        while let Some(user) = cursor.try_next().await? {
            for booking in user.booking_history {
                if booking.status != BookingStatus::CancellationPending {
                    continue;
                }
                let Some(id) = booking.id else { continue };
                pending.push(PendingCancellation {
                    booking_id: id,
                    user_email: user.email.clone(),
                    kind: booking.kind,
                    details: booking.details,
                    date_booked: booking.date_booked,
                    status: booking.status,
                });
            }
        }

        Ok(pending)
    }
}
