//! Envelope for the item listing.

use crate::models::item::item_row::Item;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}
