//! Fixed hour-of-day solar generation profile.

/// Generation fraction per hour for the daylight hours 6..=20.
///
/// Hours outside the table produce nothing.
pub const GENERATION_TABLE: [(u32, f64); 15] = [
    (6, 0.0),
    (7, 0.1),
    (8, 0.3),
    (9, 0.5),
    (10, 0.7),
    (11, 0.8),
    (12, 0.9),
    (13, 1.0),
    (14, 0.9),
    (15, 0.8),
    (16, 0.7),
    (17, 0.5),
    (18, 0.3),
    (19, 0.1),
    (20, 0.0),
];

/// Returns the fraction (0.0..=1.0) of panel capacity produced during `hour`.
///
/// # Examples
///
/// ```
/// use solar_budget::sim::profile::generation_fraction;
///
/// assert_eq!(generation_fraction(13), 1.0);
/// assert_eq!(generation_fraction(8), 0.3);
/// assert_eq!(generation_fraction(2), 0.0);
/// ```
pub fn generation_fraction(hour: u32) -> f64 {
    GENERATION_TABLE
        .iter()
        .find(|(h, _)| *h == hour)
        .map_or(0.0, |(_, frac)| *frac)
}

/// Energy produced in one hour by a panel rated `panel_capacity` W (Wh).
pub fn hourly_generation(panel_capacity: f64, hour: u32) -> f64 {
    panel_capacity * generation_fraction(hour)
}
