use serde::{Deserialize, Serialize};

/// One auction listing, emitted once per processed page.
///
/// Every field is present in every record; `None` marks fragments the page did
/// not yield. `rooms`, `parking_spots` and `private_area` are not published on
/// the listing page and stay at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: Option<String>,
    pub evaluation: Option<String>,
    pub value: Option<String>,
    pub date: Option<String>,
    pub property_type: Option<String>,
    pub rooms: u32,
    pub parking_spots: u32,
    pub private_area: u32,
    pub land_area: Option<String>,
    pub total_area: Option<String>,
    pub auctioneer: Option<String>,
    pub auctioneer_url: Option<String>,
    pub target_url: Option<String>,
    pub is_vacant: bool,
    pub description: Option<String>,
    pub registry: Option<String>,
    pub registration: Option<String>,
    pub image_url: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub source_id: Option<String>,
    pub source_url: String,
}
