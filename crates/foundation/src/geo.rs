/// Geographic bounding box in WGS84 degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoBounds {
            west,
            south,
            east,
            north,
        }
    }

    pub fn world() -> Self {
        GeoBounds {
            west: -180.0,
            south: -90.0,
            east: 180.0,
            north: 90.0,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }
}

pub fn valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

pub fn valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, valid_latitude, valid_longitude};

    #[test]
    fn world_contains_poles_and_antimeridian() {
        let w = GeoBounds::world();
        assert!(w.contains(90.0, 180.0));
        assert!(w.contains(-90.0, -180.0));
        assert!(!w.contains(90.1, 0.0));
    }

    #[test]
    fn coordinate_validity() {
        assert!(valid_latitude(-90.0));
        assert!(valid_latitude(90.0));
        assert!(!valid_latitude(f64::NAN));
        assert!(!valid_latitude(91.0));
        assert!(valid_longitude(180.0));
        assert!(!valid_longitude(-180.5));
        assert!(!valid_longitude(f64::INFINITY));
    }
}
