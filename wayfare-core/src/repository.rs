use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;

use crate::booking::{Booking, BookingStatus, PendingCancellation};
use crate::catalog::{Bus, CatalogEntity, Driver, Flight, Train};
use crate::search::TrainSearchQuery;
use crate::user::User;

type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Data access for the users collection, including the embedded booking
/// history.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn insert(&self, user: &User) -> Result<(), RepoError>;

    async fn booking_history(&self, email: &str) -> Result<Vec<Booking>, RepoError>;

    /// Append-only push onto the user's `bookingHistory`.
    async fn push_booking(&self, email: &str, booking: &Booking) -> Result<(), RepoError>;

    /// Marks the user's booking as `cancellation_pending` and returns the
    /// updated entry, or `None` when no booking matched.
    async fn request_cancellation(
        &self,
        email: &str,
        booking_id: ObjectId,
    ) -> Result<Option<Booking>, RepoError>;

    /// Admin resolution of a pending cancellation, matched across all users
    /// by embedded id; first match wins.
    async fn resolve_cancellation(
        &self,
        booking_id: ObjectId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, RepoError>;

    async fn pending_cancellations(&self) -> Result<Vec<PendingCancellation>, RepoError>;
}

/// Uniform CRUD plus the search queries over the four catalog collections.
/// Admin writes are raw documents: submitted shapes are stored untouched.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list(&self, entity: CatalogEntity) -> Result<Vec<Document>, RepoError>;

    /// Inserts the document and returns it with its assigned `_id`.
    async fn add(&self, entity: CatalogEntity, record: Document) -> Result<Document, RepoError>;

    /// Merge-patches the document; returns the matched count.
    async fn update(
        &self,
        entity: CatalogEntity,
        id: ObjectId,
        patch: Document,
    ) -> Result<u64, RepoError>;

    /// Unconditional delete by id; returns the deleted count.
    async fn delete(&self, entity: CatalogEntity, id: ObjectId) -> Result<u64, RepoError>;

    async fn search_trains(&self, query: &TrainSearchQuery) -> Result<Vec<Train>, RepoError>;

    async fn search_buses(&self, from: &str, to: &str) -> Result<Vec<Bus>, RepoError>;

    async fn search_flights(&self, from: &str, to: &str) -> Result<Vec<Flight>, RepoError>;

    /// All drivers of the given cab category; the caller picks one.
    async fn drivers_by_type(&self, cab_type: &str) -> Result<Vec<Driver>, RepoError>;
}
