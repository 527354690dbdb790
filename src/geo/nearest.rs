use crate::geo::coordinate::Coordinate;
use crate::types::SosContact;

/// Returns the SOS contact closest to `point`, or `None` for an empty table.
///
/// Distance is planar over degrees. Ties resolve to the earliest contact in
/// table order.
pub fn nearest_sos<'a>(point: &Coordinate, contacts: &'a [SosContact]) -> Option<&'a SosContact> {
    let mut best: Option<(&SosContact, f64)> = None;

    for contact in contacts {
        let distance = point.planar_distance(&contact.coordinate());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((contact, distance)),
        }
    }

    best.map(|(contact, _)| contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(locality: &str, lat: f64, lon: f64) -> SosContact {
        SosContact {
            locality: locality.to_string(),
            latitude: lat,
            longitude: lon,
            phone: format!("600-{}", locality),
        }
    }

    #[test]
    fn test_nearest() {
        let table = vec![
            contact("Los Angeles", -37.47, -72.35),
            contact("Victoria", -38.23, -72.33),
            contact("Temuco", -38.74, -72.59),
        ];

        let found = nearest_sos(&Coordinate::new(-38.2, -72.4), &table).unwrap();
        assert_eq!(found.locality, "Victoria");

        let found = nearest_sos(&Coordinate::new(-38.7359, -72.5904), &table).unwrap();
        assert_eq!(found.locality, "Temuco");
    }

    #[test]
    fn test_tie_goes_to_first() {
        let table = vec![
            contact("Norte", 1.0, 0.0),
            contact("Sur", -1.0, 0.0),
        ];

        let found = nearest_sos(&Coordinate::new(0.0, 0.0), &table).unwrap();
        assert_eq!(found.locality, "Norte");
    }

    #[test]
    fn test_deterministic() {
        let table = vec![
            contact("A", -37.5, -72.3),
            contact("B", -38.0, -72.5),
        ];
        let point = Coordinate::new(-37.8, -72.4);

        let first = nearest_sos(&point, &table).map(|c| c.locality.clone());
        for _ in 0..10 {
            assert_eq!(nearest_sos(&point, &table).map(|c| c.locality.clone()), first);
        }
    }

    #[test]
    fn test_empty_table() {
        assert!(nearest_sos(&Coordinate::new(0.0, 0.0), &[]).is_none());
    }
}
