use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

/// The four record types administered through the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogEntity {
    Train,
    Bus,
    Flight,
    Driver,
}

impl CatalogEntity {
    pub fn collection_name(self) -> &'static str {
        match self {
            CatalogEntity::Train => "trains",
            CatalogEntity::Bus => "buses",
            CatalogEntity::Flight => "flights",
            CatalogEntity::Driver => "drivers",
        }
    }

    /// Singular name used in response messages and payload keys
    /// ("Train added successfully", `{"train": ...}`).
    pub fn display_name(self) -> &'static str {
        match self {
            CatalogEntity::Train => "Train",
            CatalogEntity::Bus => "Bus",
            CatalogEntity::Flight => "Flight",
            CatalogEntity::Driver => "Driver",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            CatalogEntity::Train => "train",
            CatalogEntity::Bus => "bus",
            CatalogEntity::Flight => "flight",
            CatalogEntity::Driver => "driver",
        }
    }
}

// Catalog rows are loosely typed on purpose: admin submissions are stored
// as-is, so reads must tolerate missing fields.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Train {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub train_name: String,
    pub train_number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    /// Free-form map of class code -> fare/availability.
    pub classes: Document,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bus {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub bus_number: String,
    pub operator: String,
    pub from: String,
    pub to: String,
    pub departure_time: String,
    pub arrival_time: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub fare: f64,
    /// Informational only; never decremented server-side.
    pub seats_available: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub flight_number: String,
    pub airline: String,
    pub from: String,
    pub to: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub flight_type: String,
    pub date: String,
    pub classes: Document,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Driver {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: String,
    pub email: String,
    pub phone: String,
    pub license: String,
    pub number_plate: String,
    /// Cab category, stored lowercase.
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn train_tolerates_missing_fields() {
        let doc = doc! { "from": "Delhi", "to": "Mumbai" };
        let train: Train = bson::from_document(doc).unwrap();
        assert_eq!(train.from, "Delhi");
        assert_eq!(train.train_name, "");
        assert!(train.classes.is_empty());
    }

    #[test]
    fn bus_round_trips_camel_case() {
        let bus = Bus {
            bus_number: "KA-01".into(),
            operator: "BlueLine".into(),
            from: "Delhi".into(),
            to: "Agra".into(),
            fare: 450.0,
            seats_available: 32,
            ..Bus::default()
        };
        let json = serde_json::to_value(&bus).unwrap();
        assert_eq!(json["busNumber"], "KA-01");
        assert_eq!(json["seatsAvailable"], 32);
        // id is None and must not appear on the wire
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn driver_type_field_round_trip() {
        let json = serde_json::json!({ "firstName": "Ravi", "type": "sedan" });
        let driver: Driver = serde_json::from_value(json).unwrap();
        assert_eq!(driver.kind, "sedan");
        assert_eq!(driver.first_name, "Ravi");
    }

    #[test]
    fn entity_names() {
        assert_eq!(CatalogEntity::Bus.collection_name(), "buses");
        assert_eq!(CatalogEntity::Driver.display_name(), "Driver");
        assert_eq!(CatalogEntity::Flight.field_name(), "flight");
    }
}
