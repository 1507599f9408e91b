//! Map the single intensity slider onto per-filter parameters.
//!
//! Every filter declares which of the well-known parameter keys it
//! recognizes. [`compute_parameters`] turns the normalized intensity into
//! a concrete value for each recognized key and omits everything else, so
//! a filter that recognizes no keys simply runs with its own defaults.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Multiplier applied to the intensity for [`ParamKey::Radius`].
pub const RADIUS_SCALE: f32 = 200.0;

/// Multiplier applied to the intensity for [`ParamKey::Scale`].
pub const SCALE_SCALE: f32 = 10.0;

/// A filter parameter the intensity slider can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKey {
    /// Effect strength, usually in `[0, 1]`.
    Intensity,
    /// Spatial extent in pixels.
    Radius,
    /// Size multiplier (e.g. pixel block size).
    Scale,
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intensity => f.write_str("intensity"),
            Self::Radius => f.write_str("radius"),
            Self::Scale => f.write_str("scale"),
        }
    }
}

/// Concrete parameter values for one filter application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters(BTreeMap<ParamKey, f32>);

impl Parameters {
    /// An empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Value for `key`, if it was mapped.
    #[must_use]
    pub fn get(&self, key: ParamKey) -> Option<f32> {
        self.0.get(&key).copied()
    }

    /// Returns `true` if no key was mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of mapped keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, f32)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(ParamKey, f32)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (ParamKey, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Compute parameter values for a filter recognizing `recognized`.
///
/// - `intensity` maps to itself,
/// - `radius` maps to `intensity * 200`,
/// - `scale` maps to `intensity * 10`.
///
/// Keys not in `recognized` are omitted. The intensity is not range
/// checked here; callers clamp it first.
#[must_use]
pub fn compute_parameters(recognized: &[ParamKey], intensity: f32) -> Parameters {
    recognized
        .iter()
        .map(|&key| {
            let value = match key {
                ParamKey::Intensity => intensity,
                ParamKey::Radius => intensity * RADIUS_SCALE,
                ParamKey::Scale => intensity * SCALE_SCALE,
            };
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_is_identity() {
        for step in 0..=20_u8 {
            let intensity = f32::from(step) / 20.0;
            let params = compute_parameters(&[ParamKey::Intensity], intensity);
            assert_eq!(params.len(), 1);
            assert_eq!(params.get(ParamKey::Intensity), Some(intensity));
        }
    }

    #[test]
    fn radius_at_half() {
        let params = compute_parameters(&[ParamKey::Radius], 0.5);
        assert_eq!(params.get(ParamKey::Radius), Some(100.0));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn scale_at_half() {
        let params = compute_parameters(&[ParamKey::Scale], 0.5);
        assert_eq!(params.get(ParamKey::Scale), Some(5.0));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn no_keys_gives_empty_mapping() {
        for intensity in [0.0, 0.3, 1.0] {
            assert!(compute_parameters(&[], intensity).is_empty());
        }
    }

    #[test]
    fn multiple_keys_all_mapped() {
        let params = compute_parameters(&[ParamKey::Radius, ParamKey::Intensity], 1.0);
        assert_eq!(params.get(ParamKey::Intensity), Some(1.0));
        assert_eq!(params.get(ParamKey::Radius), Some(200.0));
        assert_eq!(params.get(ParamKey::Scale), None);
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        let params = compute_parameters(&[ParamKey::Scale], 2.0);
        assert_eq!(params.get(ParamKey::Scale), Some(20.0));
    }

    #[test]
    fn iter_is_key_ordered() {
        let params = compute_parameters(
            &[ParamKey::Scale, ParamKey::Intensity, ParamKey::Radius],
            0.1,
        );
        let keys: Vec<ParamKey> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![ParamKey::Intensity, ParamKey::Radius, ParamKey::Scale]
        );
    }

    #[test]
    fn key_display_is_lowercase() {
        assert_eq!(ParamKey::Intensity.to_string(), "intensity");
        assert_eq!(ParamKey::Radius.to_string(), "radius");
        assert_eq!(ParamKey::Scale.to_string(), "scale");
    }
}
