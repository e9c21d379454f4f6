use bson::oid::ObjectId;
use bson::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What was reserved; mirrors the public booking pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Train,
    Bus,
    Cab,
    Flight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    CancellationPending,
    Cancelled,
    CancelRejected,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CancellationPending => "cancellation_pending",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::CancelRejected => "cancel_rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::CancelRejected)
    }

    /// Transitions are one-directional: confirmed -> cancellation_pending ->
    /// cancelled | cancel_rejected.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Confirmed, BookingStatus::CancellationPending)
                | (BookingStatus::CancellationPending, BookingStatus::Cancelled)
                | (BookingStatus::CancellationPending, BookingStatus::CancelRejected)
        )
    }
}

/// Admin decision on a pending cancellation. Anything other than "accept"
/// counts as a rejection.
pub fn resolve_cancellation_status(action: &str) -> BookingStatus {
    if action == "accept" {
        BookingStatus::Cancelled
    } else {
        BookingStatus::CancelRejected
    }
}

/// A reservation embedded in the owning user's `bookingHistory` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "type")]
    pub kind: BookingKind,
    #[serde(default)]
    pub details: Document,
    pub status: BookingStatus,
    pub date_booked: DateTime<Utc>,
}

impl Booking {
    /// New bookings always start out confirmed. Embedded documents do not get
    /// a driver-generated id, so one is assigned here.
    pub fn confirmed(kind: BookingKind, details: Document) -> Self {
        Self {
            id: Some(ObjectId::new()),
            kind,
            details,
            status: BookingStatus::Confirmed,
            date_booked: Utc::now(),
        }
    }
}

/// One entry in the admin cancellation queue, flattened out of the owning
/// user record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCancellation {
    pub booking_id: ObjectId,
    pub user_email: String,
    #[serde(rename = "type")]
    pub kind: BookingKind,
    pub details: Document,
    pub date_booked: DateTime<Utc>,
    pub status: BookingStatus,
}
