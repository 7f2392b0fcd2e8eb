use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mean earth radius used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

const POINT_TYPE: &str = "Point";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InvalidPoint {
    #[error("longitude must be within [-180, 180], got {0}")]
    Longitude(f64),
    #[error("latitude must be within [-90, 90], got {0}")]
    Latitude(f64),
    #[error("unsupported geometry type `{0}`, expected `Point`")]
    GeometryType(String),
    #[error("a point needs exactly two coordinates [lng, lat], got {0}")]
    Arity(usize),
}

/// A longitude/latitude pair, serialized as a GeoJSON point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonPoint", into = "GeoJsonPoint")]
pub struct GeoPoint {
    lng: f64,
    lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Result<Self, InvalidPoint> {
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidPoint::Longitude(lng));
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidPoint::Latitude(lat));
        }
        Ok(Self { lng, lat })
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Haversine distance in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (other.lng - self.lng).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lng, self.lat)
    }
}

#[derive(Serialize, Deserialize)]
struct GeoJsonPoint {
    #[serde(rename = "type", default = "default_point_type")]
    kind: String,
    coordinates: Vec<f64>,
}

fn default_point_type() -> String {
    POINT_TYPE.to_string()
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = InvalidPoint;

    fn try_from(value: GeoJsonPoint) -> Result<Self, Self::Error> {
        if value.kind != POINT_TYPE {
            return Err(InvalidPoint::GeometryType(value.kind));
        }
        match value.coordinates.as_slice() {
            [lng, lat] => GeoPoint::new(*lng, *lat),
            other => Err(InvalidPoint::Arity(other.len())),
        }
    }
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(point: GeoPoint) -> Self {
        GeoJsonPoint {
            kind: default_point_type(),
            coordinates: vec![point.lng, point.lat],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub min_group_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: Uuid,
    pub name: Option<String>,
    pub razorpay_account_id: Option<String>,
    pub location: GeoPoint,
    pub offers: Vec<Offer>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a shop; stored as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShop {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub razorpay_account_id: Option<String>,
    pub location: GeoPoint,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl NewShop {
    pub fn into_shop(self, id: Uuid, created_at: DateTime<Utc>) -> Shop {
        Shop {
            id,
            name: self.name,
            razorpay_account_id: self.razorpay_account_id,
            location: self.location,
            offers: self.offers,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn point_serializes_as_geojson() {
        let point = GeoPoint::new(77.5946, 12.9716).unwrap();
        assert_eq!(
            serde_json::to_value(point).unwrap(),
            json!({ "type": "Point", "coordinates": [77.5946, 12.9716] })
        );
    }

    #[test]
    fn point_type_defaults_when_missing() {
        let point: GeoPoint = serde_json::from_value(json!({ "coordinates": [10.0, 20.0] })).unwrap();
        assert_eq!((point.lng(), point.lat()), (10.0, 20.0));
    }

    #[test]
    fn rejects_out_of_range_and_malformed_points() {
        assert_eq!(GeoPoint::new(181.0, 0.0), Err(InvalidPoint::Longitude(181.0)));
        assert_eq!(GeoPoint::new(0.0, -91.0), Err(InvalidPoint::Latitude(-91.0)));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());

        let polygon = serde_json::from_value::<GeoPoint>(json!({ "type": "Polygon", "coordinates": [1.0, 2.0] }));
        assert!(polygon.is_err());
        let short = serde_json::from_value::<GeoPoint>(json!({ "type": "Point", "coordinates": [1.0] }));
        assert!(short.is_err());
    }

    #[test]
    fn haversine_distance_matches_known_values() {
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        assert_eq!(origin.distance_meters(&origin), 0.0);

        // One degree of latitude is ~111.2 km on the mean sphere.
        let north = GeoPoint::new(0.0, 1.0).unwrap();
        let d = origin.distance_meters(&north);
        assert!((d - 111_195.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn new_shop_accepts_partial_documents() {
        let shop: NewShop = serde_json::from_value(json!({
            "name": "Corner Bakery",
            "location": { "type": "Point", "coordinates": [77.6, 12.9] },
            "offers": [{ "title": "Bread x5", "price": 120, "minGroupSize": 3 }, {}]
        }))
        .unwrap();

        assert_eq!(shop.razorpay_account_id, None);
        assert_eq!(shop.offers.len(), 2);
        assert_eq!(shop.offers[0].min_group_size, Some(3.0));
        assert_eq!(shop.offers[1], Offer { title: None, price: None, min_group_size: None });
    }

    #[test]
    fn offers_take_any_number_for_group_size() {
        let offer: Offer = serde_json::from_value(json!({ "title": "Half crate", "minGroupSize": 2.5 })).unwrap();
        assert_eq!(offer.min_group_size, Some(2.5));
    }

    #[test]
    fn shop_uses_camel_case_fields() {
        let shop = NewShop {
            name: Some("Fresh Mart".into()),
            razorpay_account_id: Some("acc_123".into()),
            location: GeoPoint::new(1.0, 2.0).unwrap(),
            offers: vec![],
        }
        .into_shop(Uuid::nil(), Utc::now());

        let value = serde_json::to_value(&shop).unwrap();
        assert_eq!(value["razorpayAccountId"], "acc_123");
        assert_eq!(value["location"]["coordinates"], json!([1.0, 2.0]));
        assert!(value.get("createdAt").is_some());
    }
}
