//! Coarse continent outlines for the globe.
//!
//! Each outline is a closed ring of `(latitude, longitude)` vertices in
//! degrees. They are only good enough to make the globe recognisable at
//! terminal resolution.

use globe_weather_core::Location;

pub type Outline = &'static [(f64, f64)];

const NORTH_AMERICA: Outline = &[
    (70.0, -165.0),
    (71.0, -156.0),
    (69.5, -140.0),
    (68.0, -115.0),
    (69.0, -95.0),
    (62.0, -92.0),
    (57.0, -92.0),
    (52.0, -80.0),
    (60.0, -78.0),
    (62.0, -66.0),
    (53.0, -56.0),
    (47.0, -53.0),
    (45.0, -66.0),
    (41.0, -70.0),
    (35.0, -76.0),
    (30.0, -81.0),
    (25.0, -80.0),
    (29.5, -84.0),
    (30.0, -89.0),
    (28.0, -97.0),
    (22.0, -97.5),
    (18.5, -95.0),
    (21.0, -87.0),
    (16.0, -88.0),
    (9.0, -79.0),
    (8.0, -83.0),
    (13.0, -88.0),
    (16.0, -95.0),
    (20.0, -105.5),
    (23.0, -106.0),
    (31.0, -113.0),
    (23.0, -110.0),
    (32.0, -117.0),
    (34.5, -120.5),
    (40.0, -124.0),
    (48.0, -124.5),
    (55.0, -131.0),
    (60.0, -146.0),
    (57.0, -157.0),
    (55.0, -163.0),
    (60.0, -165.0),
    (65.0, -168.0),
];

const GREENLAND: Outline = &[
    (83.0, -35.0),
    (81.0, -15.0),
    (75.0, -18.0),
    (70.0, -22.0),
    (65.0, -40.0),
    (60.0, -44.0),
    (64.0, -51.0),
    (70.0, -54.0),
    (76.0, -66.0),
    (78.0, -72.0),
    (82.0, -60.0),
];

const SOUTH_AMERICA: Outline = &[
    (12.0, -72.0),
    (10.5, -62.0),
    (5.0, -52.0),
    (0.0, -50.0),
    (-5.0, -35.0),
    (-13.0, -38.5),
    (-23.0, -42.0),
    (-28.0, -48.5),
    (-34.5, -54.0),
    (-39.0, -62.0),
    (-42.0, -64.0),
    (-47.0, -66.0),
    (-52.0, -68.5),
    (-55.0, -67.0),
    (-54.0, -72.0),
    (-46.0, -75.5),
    (-37.0, -73.5),
    (-27.0, -71.0),
    (-18.0, -70.5),
    (-14.0, -76.0),
    (-6.0, -81.0),
    (-1.0, -80.5),
    (2.0, -78.5),
    (7.0, -77.5),
    (9.0, -76.0),
];

const EURASIA: Outline = &[
    (36.0, -6.0),
    (37.0, -9.0),
    (43.0, -9.0),
    (43.5, -1.5),
    (48.5, -4.5),
    (49.5, 0.0),
    (51.0, 2.5),
    (53.5, 8.0),
    (57.0, 8.5),
    (54.5, 10.0),
    (54.0, 14.0),
    (55.0, 21.0),
    (59.5, 24.0),
    (60.5, 29.0),
    (61.0, 22.0),
    (65.5, 25.0),
    (63.0, 20.0),
    (59.0, 18.0),
    (56.0, 12.5),
    (59.0, 5.5),
    (63.0, 8.0),
    (70.0, 19.0),
    (71.0, 28.0),
    (69.0, 33.0),
    (66.0, 40.0),
    (68.5, 44.0),
    (68.0, 54.0),
    (70.0, 60.0),
    (73.0, 70.0),
    (72.0, 80.0),
    (75.5, 90.0),
    (77.5, 104.0),
    (73.5, 113.0),
    (72.5, 128.0),
    (71.5, 140.0),
    (70.5, 160.0),
    (69.5, 170.0),
    (66.0, -170.0),
    (64.5, 178.0),
    (62.0, 173.0),
    (60.0, 163.0),
    (56.0, 162.0),
    (51.0, 156.5),
    (59.0, 155.0),
    (59.5, 143.0),
    (54.0, 137.0),
    (48.0, 140.0),
    (43.0, 132.0),
    (39.5, 127.5),
    (37.5, 129.5),
    (34.7, 128.5),
    (34.5, 126.5),
    (37.5, 126.5),
    (39.5, 125.0),
    (41.0, 121.5),
    (38.5, 118.5),
    (37.0, 122.5),
    (35.0, 119.5),
    (31.0, 122.0),
    (25.0, 119.5),
    (22.5, 114.0),
    (21.5, 108.5),
    (18.5, 106.0),
    (12.0, 109.0),
    (8.5, 104.5),
    (13.0, 100.5),
    (7.0, 100.5),
    (1.5, 104.0),
    (4.0, 100.5),
    (10.0, 98.5),
    (16.5, 97.5),
    (22.0, 91.5),
    (21.5, 87.0),
    (15.5, 80.5),
    (8.5, 77.0),
    (13.0, 74.5),
    (21.0, 72.5),
    (25.0, 67.0),
    (25.5, 57.5),
    (22.5, 60.0),
    (16.5, 52.0),
    (12.5, 44.0),
    (20.0, 40.0),
    (28.0, 34.5),
    (31.0, 32.5),
    (31.5, 29.0),
    (36.0, 36.0),
    (36.5, 30.5),
    (40.0, 26.0),
    (41.0, 29.0),
    (41.5, 41.5),
    (45.0, 37.5),
    (46.5, 30.5),
    (44.5, 29.0),
    (41.0, 28.0),
    (40.5, 23.0),
    (38.0, 24.0),
    (36.5, 22.5),
    (39.5, 20.0),
    (42.5, 18.0),
    (45.5, 13.5),
    (44.0, 12.5),
    (40.0, 18.5),
    (38.0, 15.5),
    (40.5, 14.5),
    (44.0, 9.0),
    (43.0, 3.0),
    (41.5, 2.0),
    (38.5, 0.0),
    (36.5, -2.0),
];

const AFRICA: Outline = &[
    (35.8, -6.0),
    (35.0, 0.0),
    (37.0, 10.0),
    (33.0, 11.0),
    (30.5, 19.0),
    (32.5, 23.0),
    (31.5, 29.0),
    (31.0, 32.5),
    (22.0, 37.0),
    (15.5, 39.5),
    (12.0, 43.5),
    (11.5, 51.0),
    (2.0, 46.0),
    (-4.5, 39.5),
    (-10.5, 40.5),
    (-15.0, 40.5),
    (-20.0, 35.0),
    (-25.5, 33.0),
    (-29.0, 32.5),
    (-34.0, 26.0),
    (-34.5, 20.0),
    (-33.5, 18.0),
    (-28.5, 16.5),
    (-17.0, 11.5),
    (-12.0, 13.5),
    (-6.0, 12.0),
    (-1.0, 9.0),
    (4.5, 9.0),
    (6.0, 4.0),
    (4.5, -2.0),
    (4.5, -7.5),
    (7.5, -13.0),
    (11.0, -15.5),
    (14.7, -17.5),
    (21.0, -17.0),
    (27.5, -13.0),
    (31.0, -10.0),
    (34.0, -7.5),
];

const MADAGASCAR: Outline = &[
    (-12.0, 49.3),
    (-15.5, 50.5),
    (-25.0, 47.0),
    (-25.5, 45.0),
    (-21.0, 43.5),
    (-16.0, 44.5),
];

const AUSTRALIA: Outline = &[
    (-11.0, 142.5),
    (-17.5, 146.0),
    (-23.0, 150.5),
    (-28.5, 153.5),
    (-33.0, 152.0),
    (-37.5, 150.0),
    (-39.0, 146.5),
    (-38.0, 141.0),
    (-35.5, 138.0),
    (-32.0, 133.5),
    (-31.5, 128.0),
    (-34.0, 123.5),
    (-35.0, 117.5),
    (-34.0, 115.0),
    (-27.0, 113.5),
    (-22.0, 114.0),
    (-20.0, 119.0),
    (-16.0, 123.0),
    (-14.0, 127.0),
    (-12.0, 131.0),
    (-12.0, 136.5),
    (-15.0, 135.5),
    (-17.5, 140.5),
];

const JAPAN: Outline = &[
    (45.5, 141.7),
    (43.0, 145.5),
    (41.5, 141.0),
    (39.0, 142.0),
    (35.5, 140.8),
    (34.5, 137.0),
    (33.5, 135.5),
    (31.0, 131.0),
    (33.5, 129.5),
    (35.5, 133.0),
    (37.0, 136.5),
    (38.0, 139.5),
    (41.5, 140.0),
    (43.0, 140.5),
];

const BRITAIN: Outline = &[
    (58.6, -3.0),
    (57.5, -1.8),
    (55.5, -1.5),
    (53.5, 0.2),
    (52.8, 1.7),
    (51.2, 1.4),
    (50.7, -1.0),
    (50.0, -5.5),
    (51.6, -5.0),
    (53.4, -3.0),
    (54.7, -5.0),
    (56.5, -6.2),
    (58.5, -5.0),
];

const INDONESIA: Outline = &[
    (5.5, 95.3),
    (-3.5, 102.0),
    (-6.5, 106.0),
    (-8.5, 114.5),
    (-8.7, 119.0),
    (-8.0, 125.0),
    (-4.0, 134.0),
    (-8.0, 139.0),
    (-10.5, 150.5),
    (-5.5, 147.5),
    (-2.5, 141.0),
    (-1.0, 131.0),
    (1.5, 125.0),
    (-2.0, 121.0),
    (1.0, 119.0),
    (7.0, 117.0),
    (1.5, 110.0),
    (-3.0, 110.5),
    (-2.0, 105.5),
    (3.0, 99.0),
];

const ANTARCTICA: Outline = &[
    (-70.0, -60.0),
    (-64.0, -58.0),
    (-73.0, -80.0),
    (-74.0, -100.0),
    (-75.5, -140.0),
    (-78.0, -165.0),
    (-77.5, 165.0),
    (-71.0, 170.0),
    (-67.0, 145.0),
    (-66.0, 120.0),
    (-66.5, 90.0),
    (-67.5, 70.0),
    (-66.0, 50.0),
    (-69.5, 30.0),
    (-70.5, 0.0),
    (-71.5, -10.0),
    (-75.0, -25.0),
    (-78.0, -40.0),
];

/// All outlines.
pub const OUTLINES: &[Outline] = &[
    NORTH_AMERICA,
    GREENLAND,
    SOUTH_AMERICA,
    EURASIA,
    AFRICA,
    MADAGASCAR,
    AUSTRALIA,
    JAPAN,
    BRITAIN,
    INDONESIA,
    ANTARCTICA,
];

/// Points along the closed ring `outline`, at most `step` degrees apart.
///
/// Edges that cross the antimeridian are walked the short way round.
pub fn densify(outline: Outline, step: f64) -> Vec<Location> {
    let step = step.max(0.1);
    let mut points = Vec::new();
    for (i, &(lat0, lng0)) in outline.iter().enumerate() {
        let (lat1, mut lng1) = outline[(i + 1) % outline.len()];
        if lng1 - lng0 > 180.0 {
            lng1 -= 360.0;
        } else if lng0 - lng1 > 180.0 {
            lng1 += 360.0;
        }
        let span = (lat1 - lat0).abs().max((lng1 - lng0).abs());
        let n = (span / step).ceil().max(1.0) as usize;
        for k in 0..n {
            let t = k as f64 / n as f64;
            points.push(Location::clamped(
                lat0 + (lat1 - lat0) * t,
                lng0 + (lng1 - lng0) * t,
            ));
        }
    }
    points
}

/// Every outline densified to `step` degrees.
pub fn coastline(step: f64) -> Vec<Location> {
    OUTLINES
        .iter()
        .flat_map(|outline| densify(outline, step))
        .collect()
}
