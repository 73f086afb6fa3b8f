// crates/wilayah-core/src/api.rs

//! Stable external record shape.
//!
//! [`Region`] is what front-ends serialize. It is decoupled from the storage
//! backend so the JSON never changes when the in-memory layout does.

use crate::model::FlatRegion;
use crate::traits::RegionBackend;
use serde::{Deserialize, Serialize};

/// A matched subdistrict with its full administrative context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub subdistrict: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub postal_code: Option<String>,
    pub full_text: String,
}

impl Region {
    pub fn from_flat<B: RegionBackend>(r: &FlatRegion<B>) -> Self {
        Self {
            id: B::str_to_string(&r.id),
            subdistrict: B::str_to_string(&r.subdistrict),
            district: B::str_to_string(&r.district),
            city: B::str_to_string(&r.city),
            province: B::str_to_string(&r.province),
            postal_code: r.postal_code.as_ref().map(B::str_to_string),
            full_text: B::str_to_string(&r.full_text),
        }
    }

    /// One-line human label: `Sarijadi, Sukasari, Kota Bandung, Jawa Barat 40151`.
    pub fn label(&self) -> String {
        let mut s = format!(
            "{}, {}, {}, {}",
            self.subdistrict, self.district, self.city, self.province
        );
        if let Some(p) = &self.postal_code {
            s.push(' ');
            s.push_str(p);
        }
        s
    }
}

impl<B: RegionBackend> From<&FlatRegion<B>> for Region {
    fn from(r: &FlatRegion<B>) -> Self {
        Region::from_flat(r)
    }
}

/// Map matched rows to the external shape, preserving order.
pub fn format_results<'a, B, I>(rows: I) -> Vec<Region>
where
    B: RegionBackend,
    I: IntoIterator<Item = &'a FlatRegion<B>>,
{
    rows.into_iter().map(Region::from_flat).collect()
}
