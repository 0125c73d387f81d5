use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type PropertyId = i64;

/// Authenticated marketplace user as returned by the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub contact_number: String,
    /// Remaining free visit requests
    #[serde(rename = "propertiesLeft")]
    pub remaining_visits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

/// Contact details of the user who listed a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lister {
    pub name: String,
    pub email: String,
    pub contact_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub city_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub area_name: String,
    pub city: City,
}

/// Rental listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub property_id: PropertyId,
    pub address: String,
    #[serde(rename = "areaId")]
    pub area: Area,
    /// Carpet area in square feet
    pub carpet_area: f64,
    pub tenant_type: String,
    pub flat_type: String,
    pub price: f64,
    #[serde(rename = "userId")]
    pub owner: Lister,
}

/// Body of a visit scheduling call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub visit_date: NaiveDate,
}

/// Whether a (user, property) pair already has a recorded visit request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleStatus {
    #[default]
    Unknown,
    NotScheduled,
    Scheduled,
}

impl From<bool> for ScheduleStatus {
    fn from(scheduled: bool) -> Self {
        if scheduled {
            ScheduleStatus::Scheduled
        } else {
            ScheduleStatus::NotScheduled
        }
    }
}

/// Profile photo attached to a registration
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePhoto {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Account creation payload, sent as a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub contact_number: String,
    pub profile_photo: Option<ProfilePhoto>,
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_reads_service_shape() {
        let raw = json!({
            "propertyId": 42,
            "address": "12 MG Road",
            "areaId": { "areaName": "Kothrud", "city": { "cityName": "Pune" } },
            "carpetArea": 850,
            "tenantType": "Family",
            "flatType": "2BHK",
            "price": 18000,
            "userId": {
                "name": "Vikram Shah",
                "email": "vikram@example.com",
                "contactNumber": "9123456780"
            }
        });

        let property: Property = serde_json::from_value(raw).unwrap();
        assert_eq!(property, fixtures::property());
    }

    #[test]
    fn user_quota_maps_properties_left() {
        let raw = json!({ "userId": 7, "name": "Asha", "propertiesLeft": 2 });
        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.remaining_visits, 2);
        assert!(user.email.is_empty());
    }

    #[test]
    fn user_without_quota_is_rejected() {
        let raw = json!({ "userId": 7, "name": "Asha" });
        assert!(serde_json::from_value::<User>(raw).is_err());
    }

    #[test]
    fn visit_request_serializes_iso_date() {
        let request = VisitRequest {
            user_id: 7,
            property_id: 42,
            visit_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "userId": 7, "propertyId": 42, "visitDate": "2024-05-01" })
        );
    }
}
