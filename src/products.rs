use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    images::{classify, ImageToken},
    model::{Images, Listing, MediaType, Product, ProductKey},
};

/// Group listings into products, one per distinct (name, price, gender).
///
/// Products come out sorted by that key with ids counting up from 1. Within a
/// product, a later listing replaces the image an earlier one gave for the
/// same token.
pub fn transform(listings: impl IntoIterator<Item = Listing>) -> Vec<Product> {
    let mut groups: BTreeMap<ProductKey, Images> = BTreeMap::new();
    for listing in listings {
        let images = groups.entry(listing.key()).or_default();
        match classify(&listing.image) {
            Some(token) => {
                images.insert(token, listing.image);
            }
            None => debug!(name = %listing.name, image = %listing.image, "unclassified image"),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(i, (key, images))| Product {
            id: i + 1,
            media_type: MediaType::Image,
            url: representative(&images),
            name: key.name,
            price: key.price,
            gender: key.gender,
            images,
        })
        .collect()
}

fn representative(images: &Images) -> String {
    images
        .get(&ImageToken::primary())
        .or_else(|| images.values().next())
        .cloned()
        .unwrap_or_default()
}

/// Products the feed will hide because they have no `model1` image.
pub fn missing_primary(products: &[Product]) -> Vec<&Product> {
    let primary = ImageToken::primary();
    products
        .iter()
        .filter(|x| !x.images.contains_key(&primary))
        .collect()
}
