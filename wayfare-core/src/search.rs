use serde::Deserialize;

use crate::catalog::{Bus, Flight, Train};

#[derive(Debug, Clone, Deserialize)]
pub struct TrainSearchQuery {
    pub from: String,
    pub to: String,
    pub class: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusSearchRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightSearchQuery {
    pub from: String,
    pub to: String,
    #[serde(rename = "userDate")]
    pub user_date: Option<String>,
}

/// Case-insensitive substring match on a route field, the same predicate the
/// store expresses as an `$regex` with the `i` option.
pub fn route_matches(field: &str, query: &str) -> bool {
    field.to_lowercase().contains(&query.to_lowercase())
}

/// Class codes are matched by key existence after uppercasing ("ac1" -> "AC1").
pub fn class_key(class: &str) -> String {
    class.trim().to_uppercase()
}

pub fn train_matches(train: &Train, query: &TrainSearchQuery) -> bool {
    route_matches(&train.from, &query.from)
        && route_matches(&train.to, &query.to)
        && train.classes.contains_key(&class_key(&query.class))
}

pub fn bus_matches(bus: &Bus, from: &str, to: &str) -> bool {
    route_matches(&bus.from, from) && route_matches(&bus.to, to)
}

pub fn flight_matches(flight: &Flight, from: &str, to: &str) -> bool {
    route_matches(&flight.from, from) && route_matches(&flight.to, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn train(from: &str, to: &str, classes: bson::Document) -> Train {
        Train {
            from: from.into(),
            to: to.into(),
            classes,
            ..Train::default()
        }
    }

    #[test]
    fn query_deserialization() {
        let query: TrainSearchQuery =
            serde_json::from_str(r#"{"from":"Delhi","to":"Mumbai","class":"ac1"}"#).unwrap();
        assert_eq!(query.from, "Delhi");
        assert_eq!(query.class, "ac1");

        let flight_query: FlightSearchQuery =
            serde_json::from_str(r#"{"from":"BLR","to":"DEL","userDate":"2025-01-15"}"#).unwrap();
        assert_eq!(flight_query.user_date.as_deref(), Some("2025-01-15"));
    }

    #[test]
    fn route_match_is_case_insensitive_substring() {
        assert!(route_matches("New Delhi", "delhi"));
        assert!(route_matches("Mumbai Central", "MUMBAI"));
        assert!(!route_matches("Chennai", "Delhi"));
    }

    #[test]
    fn train_match_requires_class_key() {
        let query = TrainSearchQuery {
            from: "delhi".into(),
            to: "mumbai".into(),
            class: "ac1".into(),
        };

        let with_class = train("Delhi", "Mumbai", doc! { "AC1": { "fare": 1500 } });
        let without_class = train("Delhi", "Mumbai", doc! { "SL": { "fare": 400 } });
        let wrong_route = train("Delhi", "Pune", doc! { "AC1": { "fare": 1500 } });

        assert!(train_matches(&with_class, &query));
        assert!(!train_matches(&without_class, &query));
        assert!(!train_matches(&wrong_route, &query));
    }

    #[test]
    fn bus_match_has_no_class_filter() {
        let bus = Bus {
            from: "Delhi".into(),
            to: "Agra".into(),
            ..Bus::default()
        };
        assert!(bus_matches(&bus, "del", "agra"));
        assert!(!bus_matches(&bus, "del", "jaipur"));
    }
}
