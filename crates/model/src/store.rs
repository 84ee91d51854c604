use foundation::geo::{valid_latitude, valid_longitude};

use crate::record::{FacilityRecord, RecordId};

/// A record whose coordinates fall outside WGS84 range.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "coordinates out of range: lat={} lon={}",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

/// In-memory, insertion-ordered facility collection.
///
/// Ordering contract: iteration order is insertion order. Representative
/// tie-breaks and visible-set ordering both derive from it. The collection is
/// replaced wholesale on reload; records are never mutated in place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordStore {
    records: Vec<FacilityRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FacilityRecord) -> Result<RecordId, InvalidCoordinates> {
        if !valid_latitude(record.latitude) || !valid_longitude(record.longitude) {
            return Err(InvalidCoordinates {
                latitude: record.latitude,
                longitude: record.longitude,
            });
        }
        let id = RecordId(self.records.len() as u32);
        self.records.push(record);
        Ok(id)
    }

    /// Replace the whole collection. Previously issued ids become stale.
    pub fn replace(&mut self, records: Vec<FacilityRecord>) {
        self.records = records;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&FacilityRecord> {
        self.records.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &FacilityRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (RecordId(i as u32), r))
    }
}
