//! Fine record model shared by the loader, processor and aggregator.

use serde::Serialize;

/// One parsed fine entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FineRecord {
    pub id: String,
    pub facility: String,
    pub company: String,
    pub category: String,
    pub region: String,
    /// Fine amount in whole currency units.
    pub fine: u64,
    /// Amount as it appeared in the source.
    pub fine_formatted: String,
    /// Amount in the alternate unit (UTA), when the source carries one.
    pub fine_alt: Option<f64>,
    pub date: String,
}

impl FineRecord {
    /// Year taken from the leading `YYYY` segment of the date.
    pub fn year(&self) -> &str {
        self.date.split('-').next().unwrap_or_default().trim()
    }
}

/// Categorical keys a record can be grouped or filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Category,
    Region,
    Company,
    Year,
}

impl GroupKey {
    pub fn key_of<'a>(&self, record: &'a FineRecord) -> &'a str {
        match self {
            GroupKey::Category => &record.category,
            GroupKey::Region => &record.region,
            GroupKey::Company => &record.company,
            GroupKey::Year => record.year(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(
    id: &str,
    facility: &str,
    company: &str,
    category: &str,
    region: &str,
    fine: u64,
    date: &str,
) -> FineRecord {
    FineRecord {
        id: id.to_string(),
        facility: facility.to_string(),
        company: company.to_string(),
        category: category.to_string(),
        region: region.to_string(),
        fine,
        fine_formatted: fine.to_string(),
        fine_alt: None,
        date: date.to_string(),
    }
}
