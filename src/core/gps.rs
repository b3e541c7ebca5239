use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{RawValue, Rational, Scalar};

pub const GPS_COORDINATES_KEY: &str = "GPS Coordinates";
pub const LATITUDE_KEY: &str = "GPSLatitude";
pub const LATITUDE_REF_KEY: &str = "GPSLatitudeRef";
pub const LONGITUDE_KEY: &str = "GPSLongitude";
pub const LONGITUDE_REF_KEY: &str = "GPSLongitudeRef";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GpsError {
    #[error("{0} is not a degrees/minutes/seconds triple")]
    NotATriple(&'static str),
    #[error("{0} contains a zero denominator")]
    ZeroDenominator(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DmsTriple {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl DmsTriple {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    pub fn from_pairs(degrees: (u32, u32), minutes: (u32, u32), seconds: (u32, u32)) -> Self {
        Self::new(
            Rational::new(degrees.0, degrees.1),
            Rational::new(minutes.0, minutes.1),
            Rational::new(seconds.0, seconds.1),
        )
    }

    fn from_raw(value: &RawValue, field: &'static str) -> Result<Self, GpsError> {
        let RawValue::Sequence(items) = value else {
            return Err(GpsError::NotATriple(field));
        };

        let parts = items
            .iter()
            .map(|item| match item {
                RawValue::Scalar(Scalar::Rational(r)) => Some(*r),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(GpsError::NotATriple(field))?;

        match parts.as_slice() {
            [d, m, s] => Ok(Self::new(*d, *m, *s)),
            _ => Err(GpsError::NotATriple(field)),
        }
    }
}

impl TryFrom<&RawValue> for DmsTriple {
    type Error = GpsError;

    fn try_from(value: &RawValue) -> Result<Self, Self::Error> {
        Self::from_raw(value, "value")
    }
}

/// Convert DMS components to decimal degrees.
pub fn dms_to_decimal(dms: &DmsTriple) -> Result<f64, GpsError> {
    to_decimal(dms, "value")
}

fn to_decimal(dms: &DmsTriple, field: &'static str) -> Result<f64, GpsError> {
    let degrees = dms.degrees.to_f64().ok_or(GpsError::ZeroDenominator(field))?;
    let minutes = dms.minutes.to_f64().ok_or(GpsError::ZeroDenominator(field))?;
    let seconds = dms.seconds.to_f64().ok_or(GpsError::ZeroDenominator(field))?;
    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}

#[derive(Clone, Debug, PartialEq)]
pub enum GpsDerivation {
    /// Latitude or longitude missing; nothing to report.
    Absent,
    Derived { latitude: f64, longitude: f64 },
    Failed(GpsError),
}

impl GpsDerivation {
    pub fn display_value(&self) -> Option<String> {
        match self {
            Self::Derived {
                latitude,
                longitude,
            } => Some(format!("{latitude:?}, {longitude:?}")),
            _ => None,
        }
    }
}

/// Derive signed decimal coordinates from the merged tag map.
pub fn derive_gps(merged: &BTreeMap<String, RawValue>) -> GpsDerivation {
    let (Some(latitude), Some(longitude)) = (merged.get(LATITUDE_KEY), merged.get(LONGITUDE_KEY))
    else {
        return GpsDerivation::Absent;
    };

    let latitude_ref = reference(merged, LATITUDE_REF_KEY, "N");
    let longitude_ref = reference(merged, LONGITUDE_REF_KEY, "E");

    let converted = DmsTriple::from_raw(latitude, LATITUDE_KEY)
        .and_then(|dms| to_decimal(&dms, LATITUDE_KEY))
        .and_then(|lat| {
            DmsTriple::from_raw(longitude, LONGITUDE_KEY)
                .and_then(|dms| to_decimal(&dms, LONGITUDE_KEY))
                .map(|lon| (lat, lon))
        });

    match converted {
        Ok((mut lat, mut lon)) => {
            if latitude_ref == "S" {
                lat = -lat;
            }
            if longitude_ref == "W" {
                lon = -lon;
            }
            GpsDerivation::Derived {
                latitude: lat,
                longitude: lon,
            }
        }
        Err(err) => GpsDerivation::Failed(err),
    }
}

fn reference(merged: &BTreeMap<String, RawValue>, key: &str, default: &str) -> String {
    merged
        .get(key)
        .and_then(RawValue::as_text)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
