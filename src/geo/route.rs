use crate::error::{Error, Result};
use crate::geo::coordinate::Coordinate;

/// A straight highway segment between two fixed endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Route {
    /// Ruta 5 Sur from Los Ángeles to Temuco
    pub const RUTA_5_SUR: Route = Route {
        start: Coordinate { lat: -37.4697, lon: -72.3537 },
        end: Coordinate { lat: -38.7359, lon: -72.5904 },
    };

    /// Map center: halfway between the endpoints
    pub fn center(&self) -> Coordinate {
        self.start.midpoint(&self.end)
    }

    /// Estimates the position of a kilometer marker.
    ///
    /// Markers at `range.min` land on `start` and markers at `range.max` land
    /// on `end`. Markers outside the range extrapolate past the endpoints.
    pub fn interpolate(&self, range: &KmRange, km: f64) -> Coordinate {
        let t = range.fraction(km);
        if t == 1.0 {
            return self.end;
        }

        Coordinate::new(
            self.start.lat + (self.end.lat - self.start.lat) * t,
            self.start.lon + (self.end.lon - self.start.lon) * t,
        )
    }
}

/// Observed kilometer bounds of a pole table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KmRange {
    pub min: f64,
    pub max: f64,
}

impl KmRange {
    /// Computes the bounds of a set of kilometer values.
    ///
    /// Fails on an empty set and when every value is the same, since neither
    /// gives a usable denominator.
    pub fn from_kilometers<I>(kilometers: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bounds: Option<(f64, f64)> = None;

        for km in kilometers {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(km), max.max(km)),
                None => (km, km),
            });
        }

        let (min, max) = bounds.ok_or(Error::EmptyTable("poles"))?;
        if min == max {
            return Err(Error::DegenerateRange { km: min });
        }

        Ok(Self { min, max })
    }

    /// Position of `km` within the range, 0.0 at `min` and 1.0 at `max`
    pub fn fraction(&self, km: f64) -> f64 {
        (km - self.min) / (self.max - self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn range(min: f64, max: f64) -> KmRange {
        KmRange::from_kilometers([min, max]).unwrap()
    }

    #[test]
    fn test_endpoints_are_exact() {
        let route = Route::RUTA_5_SUR;
        let r = range(10.0, 50.0);

        assert_eq!(route.interpolate(&r, 10.0), route.start);
        assert_eq!(route.interpolate(&r, 50.0), route.end);
    }

    #[test]
    fn test_midway_pole() {
        let route = Route::RUTA_5_SUR;
        let coord = route.interpolate(&range(10.0, 50.0), 30.0);

        assert!((coord.lat - -38.1028).abs() < EPS);
        assert!((coord.lon - -72.47205).abs() < EPS);
    }

    #[test]
    fn test_interpolation_is_monotonic() {
        let route = Route::RUTA_5_SUR;
        let r = range(0.0, 100.0);

        let mut previous = route.interpolate(&r, 0.0);
        for km in 1..=100 {
            let coord = route.interpolate(&r, km as f64);
            assert!(coord.lat < previous.lat);
            assert!(coord.lon < previous.lon);
            assert!(coord.lat >= route.end.lat && coord.lat <= route.start.lat);
            previous = coord;
        }
    }

    #[test]
    fn test_proportional_placement() {
        let route = Route::RUTA_5_SUR;
        let coord = route.interpolate(&range(0.0, 200.0), 50.0);
        let expected = route.start.lat + (route.end.lat - route.start.lat) * 0.25;
        assert!((coord.lat - expected).abs() < EPS);
    }

    #[test]
    fn test_extrapolates_outside_range() {
        let route = Route::RUTA_5_SUR;
        let r = range(10.0, 50.0);

        let past_end = route.interpolate(&r, 90.0);
        let expected = route.start.lat + (route.end.lat - route.start.lat) * 2.0;
        assert!((past_end.lat - expected).abs() < EPS);
        assert!(past_end.lat < route.end.lat);

        let before_start = route.interpolate(&r, 0.0);
        assert!(before_start.lat > route.start.lat);
        assert!(before_start.lon > route.start.lon);
    }

    #[test]
    fn test_range_bounds() {
        let r = KmRange::from_kilometers([30.0, 10.0, 50.0, 20.0]).unwrap();
        assert_eq!(r.min, 10.0);
        assert_eq!(r.max, 50.0);
        assert_eq!(r.fraction(30.0), 0.5);
    }

    #[test]
    fn test_degenerate_range() {
        let result = KmRange::from_kilometers([12.5, 12.5]);
        assert!(matches!(result, Err(Error::DegenerateRange { km }) if km == 12.5));
    }

    #[test]
    fn test_empty_range() {
        let result = KmRange::from_kilometers(Vec::new());
        assert!(matches!(result, Err(Error::EmptyTable("poles"))));
    }

    #[test]
    fn test_center() {
        let center = Route::RUTA_5_SUR.center();
        assert!((center.lat - -38.1028).abs() < EPS);
        assert!((center.lon - -72.47205).abs() < EPS);
    }
}
