//! Records returned by the booking API.
//!
//! The API's schema is not under our control, so every field is optional and
//! deserialized leniently: a value of the wrong JSON type becomes "absent"
//! rather than failing the whole list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Room {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Category used by the room filter ("suite", "villa", ...).
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub amenities: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Package {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, alias = "duration", deserialize_with = "lenient_count")]
    pub nights: Option<u32>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub includes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Amenity {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Villa {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub images: Vec<String>,
    #[serde(default)]
    pub contact: Contact,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AdminBooking {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, alias = "guestName", deserialize_with = "lenient_string")]
    pub guest_name: Option<String>,
    #[serde(default, alias = "room_name", deserialize_with = "lenient_string")]
    pub room: Option<String>,
    #[serde(default, alias = "checkIn", deserialize_with = "lenient_string")]
    pub check_in: Option<String>,
    #[serde(default, alias = "checkOut", deserialize_with = "lenient_string")]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: Option<f64>,
}

#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl LoginResponse {
    pub fn into_token(self) -> Option<String> {
        self.token
            .or(self.access_token)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Health {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

/// List endpoints answer either `[...]` or `{ "data": [...] }`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) | ListEnvelope::Wrapped { data: items } => items,
        }
    }
}

/// Single-object endpoints may also wrap their payload in `data`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ObjectEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ObjectEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            ObjectEnvelope::Wrapped { data } | ObjectEnvelope::Bare(data) => data,
        }
    }
}

// ============================================================================
// Lenient field parsers
// ============================================================================

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
