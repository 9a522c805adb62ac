use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::images::ImageToken;

/// One row of `products.csv`.
#[derive(Clone, Debug, Deserialize)]
pub struct Listing {
    pub image: String,
    pub name: String,
    pub cost: String,
    pub gender: String,
}

impl Listing {
    pub fn key(&self) -> ProductKey {
        ProductKey {
            name: self.name.clone(),
            price: self.cost.clone(),
            gender: self.gender.clone(),
        }
    }
}

// field order is the output sort order
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProductKey {
    pub name: String,
    pub price: String,
    pub gender: String,
}

pub type Images = IndexMap<ImageToken, String>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaType {
    Image,
}

/// One entry of `media.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: usize,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub url: String,
    pub name: String,
    pub price: String,
    pub gender: String,
    pub images: Images,
}
