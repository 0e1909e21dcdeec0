use serde::{Deserialize, Serialize};

use super::{FieldSpec, FormSchema};
use crate::entities::cafe;
use crate::utils::text::{flag, title_case, yes_no};

pub const YES_NO: &[&str] = &["Yes", "No"];
pub const SEAT_BUCKETS: &[&str] = &["0-10", "10-20", "20-30", "30-40", "50+"];

/// Submitted add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CafeForm {
    pub cafe: String,
    pub location: String,
    pub map: String,
    pub image: String,
    pub sockets: String,
    pub toilet: String,
    pub wifi: String,
    pub calls: String,
    pub seats: String,
    pub price: String,
    pub csrf_token: String,
}

impl FormSchema for CafeForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("cafe", "Cafe Name", true),
        FieldSpec::text("location", "Cafe Location", true),
        FieldSpec::url("map", "Cafe Location on Google Maps (URL)"),
        FieldSpec::url("image", "Cafe Image (URL)"),
        FieldSpec::choice("sockets", "Are Power Sockets Available?", YES_NO),
        FieldSpec::choice("toilet", "Are Toilets Available?", YES_NO),
        FieldSpec::choice("wifi", "Is WiFi Available?", YES_NO),
        FieldSpec::choice("calls", "Do they have a Call Policy?", YES_NO),
        FieldSpec::choice("seats", "Seats Available", SEAT_BUCKETS),
        FieldSpec::text("price", "Coffee Price", true),
    ];

    fn value(&self, field: &str) -> &str {
        match field {
            "cafe" => &self.cafe,
            "location" => &self.location,
            "map" => &self.map,
            "image" => &self.image,
            "sockets" => &self.sockets,
            "toilet" => &self.toilet,
            "wifi" => &self.wifi,
            "calls" => &self.calls,
            "seats" => &self.seats,
            "price" => &self.price,
            _ => "",
        }
    }

    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

impl CafeForm {
    /// Prefill from a stored row.
    pub fn from_model(model: &cafe::Model) -> Self {
        Self {
            cafe: model.name.clone(),
            location: model.location.clone(),
            map: model.map_url.clone(),
            image: model.img_url.clone(),
            sockets: yes_no(model.has_sockets).to_string(),
            toilet: yes_no(model.has_toilet).to_string(),
            wifi: yes_no(model.has_wifi).to_string(),
            calls: yes_no(model.can_take_calls).to_string(),
            seats: model.seats.clone(),
            price: model.coffee_price.clone().unwrap_or_default(),
            csrf_token: String::new(),
        }
    }

    /// Column values to persist. Call only after a successful `validate`.
    pub fn to_draft(&self) -> CafeDraft {
        CafeDraft {
            name: title_case(&self.cafe),
            map_url: self.map.clone(),
            img_url: self.image.clone(),
            location: title_case(&self.location),
            seats: self.seats.clone(),
            has_toilet: flag(&self.toilet),
            has_wifi: flag(&self.wifi),
            has_sockets: flag(&self.sockets),
            can_take_calls: flag(&self.calls),
            coffee_price: self.price.clone(),
        }
    }
}

/// Every writable column of a café, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct CafeDraft {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: String,
}

#[cfg(test)]
pub(crate) fn sample_form(name: &str) -> CafeForm {
    CafeForm {
        cafe: name.to_string(),
        location: "soho".to_string(),
        map: "https://maps.example.com/blue-bottle".to_string(),
        image: "https://images.example.com/blue-bottle.jpg".to_string(),
        sockets: "Yes".to_string(),
        toilet: "No".to_string(),
        wifi: "Yes".to_string(),
        calls: "No".to_string(),
        seats: "0-10".to_string(),
        price: "$3".to_string(),
        csrf_token: String::new(),
    }
}
