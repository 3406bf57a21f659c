//! Order-line records
//!
//! Plain data for a priced line item and the media it refers to. Both
//! report their fields through [`FieldCollector`], so a line item can be
//! turned into an [`OrderedMap`](crate::OrderedMap) and serialized.

use crate::fields::{FieldCollector, Fields};

/// A sellable media item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    id: u32,
    title: String,
    category: String,
    price: u64,
}

impl Media {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        category: impl Into<String>,
        price: u64,
    ) -> Self {
        Media {
            id,
            title: title.into(),
            category: category.into(),
            price,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> u64 {
        self.price
    }
}

impl FieldCollector for Media {
    fn collect_fields<'a>(&'a self, out: &mut Fields<'a>) {
        out.text("id", self.id)
            .text("title", &self.title)
            .text("category", &self.category)
            .text("price", self.price);
    }
}

/// One line of an order: a media item, a quantity and the unit price
/// charged for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMedia {
    media: Media,
    quantity: u32,
    price: u64,
}

impl OrderMedia {
    pub fn new(media: Media, quantity: u32, price: u64) -> Self {
        OrderMedia {
            media,
            quantity,
            price,
        }
    }

    pub fn media(&self) -> &Media {
        &self.media
    }

    pub fn set_media(&mut self, media: Media) {
        self.media = media;
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn set_price(&mut self, price: u64) {
        self.price = price;
    }

    /// `quantity * price`, or `None` on overflow
    pub fn subtotal(&self) -> Option<u64> {
        self.price.checked_mul(u64::from(self.quantity))
    }
}

impl FieldCollector for OrderMedia {
    fn collect_fields<'a>(&'a self, out: &mut Fields<'a>) {
        out.record("media", &self.media)
            .text("quantity", self.quantity)
            .text("price", self.price);
    }
}
