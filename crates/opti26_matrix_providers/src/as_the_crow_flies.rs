use crate::distance_matrix::DistanceMatrix;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two `(lng, lat)` points.
pub fn haversine_distance<P>(from: P, to: P) -> f64
where
    P: Into<geo_types::Point>,
{
    let from: geo_types::Point = from.into();
    let to: geo_types::Point = to.into();

    let lat1_rad = from.y().to_radians();
    let lat2_rad = to.y().to_radians();

    let delta_lat = (to.y() - from.y()).to_radians();
    let delta_lon = (to.x() - from.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

pub fn as_the_crow_flies_matrix<P>(points: &[P]) -> DistanceMatrix
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    let num_points = points.len();
    let mut distances: Vec<f64> = vec![0.0; num_points * num_points];

    for (i, from) in points.iter().enumerate() {
        let from: geo_types::Point = from.into();
        for (j, to) in points.iter().enumerate() {
            if i != j {
                let to: geo_types::Point = to.into();
                distances[i * num_points + j] = haversine_distance(from, to);
            }
        }
    }

    DistanceMatrix::geometric(num_points, distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    #[test]
    fn test_haversine_distance() {
        // Paris -> London, roughly 343.5km
        let paris = Location::new(2.3522, 48.8566);
        let london = Location::new(-0.1278, 51.5074);

        let distance = haversine_distance(paris, london);
        assert!((distance - 343_556.0).abs() < 500.0, "{distance}");
        assert_eq!(haversine_distance(paris, paris), 0.0);
    }

    #[test]
    fn test_as_the_crow_flies_matrix() {
        let points = vec![
            Location::new(4.3517, 50.8503),
            Location::new(4.4025, 51.2194),
            Location::new(3.7174, 51.0543),
        ];

        let matrix = as_the_crow_flies_matrix(&points);

        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert_eq!(matrix.distance(i, i), Some(0.0));
            for j in 0..3 {
                assert_eq!(matrix.distance(i, j), matrix.distance(j, i));
            }
        }
        assert!(matrix.distance(0, 1).unwrap() > 40_000.0);
    }
}
