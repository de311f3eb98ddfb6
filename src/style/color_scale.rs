use std::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// CSS hex color, e.g. "#800026".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lower_bound: f64,
    pub color: Color,
}

impl Bucket {
    pub fn new(lower_bound: f64, color: &str) -> Self {
        Self {
            lower_bound,
            color: Color::new(color),
        }
    }
}

/// Threshold table classifying a value into a color. Shared by the style engine and the legend.
///
/// A value belongs to the highest bucket whose lower bound is strictly less than the value.
/// Everything else, including NaN and values at or below the first bound, falls into the
/// first bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    buckets: Vec<Bucket>,
}

impl ColorScale {
    pub fn new(buckets: Vec<Bucket>) -> anyhow::Result<Self> {
        if buckets.is_empty() {
            return Err(anyhow!("A color scale needs at least one bucket"));
        }
        if let Some(bucket) = buckets.iter().find(|bucket| !bucket.lower_bound.is_finite()) {
            return Err(anyhow!(
                "Bucket bounds must be finite, got {}",
                bucket.lower_bound
            ));
        }
        for pair in buckets.windows(2) {
            if pair[0].lower_bound >= pair[1].lower_bound {
                return Err(anyhow!(
                    "Bucket bounds must be strictly ascending, {} is followed by {}",
                    pair[0].lower_bound,
                    pair[1].lower_bound
                ));
            }
        }
        Ok(Self { buckets })
    }

    pub fn color_for(&self, value: f64) -> &Color {
        self.buckets
            .iter()
            .rev()
            .find(|bucket| value > bucket.lower_bound)
            .map(|bucket| &bucket.color)
            .unwrap_or(&self.buckets[0].color)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = f64> + '_ {
        self.buckets.iter().map(|bucket| bucket.lower_bound)
    }
}

impl Default for ColorScale {
    /// Population density scale, lightest to darkest.
    fn default() -> Self {
        Self {
            buckets: vec![
                Bucket::new(0.0, "#FFEDA0"),
                Bucket::new(10.0, "#FED976"),
                Bucket::new(20.0, "#FEB24C"),
                Bucket::new(50.0, "#FD8D3C"),
                Bucket::new(100.0, "#FC4E2A"),
                Bucket::new(200.0, "#E31A1C"),
                Bucket::new(500.0, "#BD0026"),
                Bucket::new(1000.0, "#800026"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Bucket, ColorScale};

    #[rstest]
    #[case(1001.0, "#800026")]
    #[case(1000.0, "#BD0026")]
    #[case(501.0, "#BD0026")]
    #[case(500.0, "#E31A1C")]
    #[case(200.5, "#E31A1C")]
    #[case(150.0, "#FC4E2A")]
    #[case(75.0, "#FD8D3C")]
    #[case(21.0, "#FEB24C")]
    #[case(10.5, "#FED976")]
    #[case(10.0, "#FFEDA0")]
    #[case(0.0, "#FFEDA0")]
    #[case(-5.0, "#FFEDA0")]
    #[case(f64::NAN, "#FFEDA0")]
    #[case(f64::INFINITY, "#800026")]
    #[case(f64::NEG_INFINITY, "#FFEDA0")]
    fn test_color_for(#[case] value: f64, #[case] expected_color: &str) {
        let scale = ColorScale::default();
        assert_eq!(expected_color, scale.color_for(value).as_str());
    }

    #[test]
    fn test_color_for_is_monotonic() {
        let scale = ColorScale::default();
        let bucket_index = |value: f64| {
            let color = scale.color_for(value);
            scale
                .buckets()
                .iter()
                .position(|bucket| &bucket.color == color)
                .unwrap()
        };
        let mut previous = bucket_index(-100.0);
        for step in -100..2500 {
            let current = bucket_index(step as f64 * 0.75);
            assert!(current >= previous, "bucket decreased at {}", step);
            previous = current;
        }
    }

    #[test]
    fn test_default_scale_breakpoints() {
        let breakpoints: Vec<f64> = ColorScale::default().breakpoints().collect();
        assert_eq!(
            vec![0.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0],
            breakpoints
        );
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![Bucket::new(10.0, "#000000"), Bucket::new(10.0, "#FFFFFF")])]
    #[case(vec![Bucket::new(10.0, "#000000"), Bucket::new(5.0, "#FFFFFF")])]
    #[case(vec![Bucket::new(f64::NAN, "#000000")])]
    fn test_new_rejects_invalid_buckets(#[case] buckets: Vec<Bucket>) {
        assert!(ColorScale::new(buckets).is_err());
    }

    #[test]
    fn test_custom_scale() {
        let scale = ColorScale::new(vec![
            Bucket::new(-10.0, "#0000FF"),
            Bucket::new(0.0, "#FFFFFF"),
            Bucket::new(10.0, "#FF0000"),
        ])
        .unwrap();
        assert_eq!("#0000FF", scale.color_for(-20.0).as_str());
        assert_eq!("#0000FF", scale.color_for(0.0).as_str());
        assert_eq!("#FFFFFF", scale.color_for(0.1).as_str());
        assert_eq!("#FF0000", scale.color_for(11.0).as_str());
    }
}
