//! Human-readable coordinate text, e.g. `35.6780 S 63.5532 W`. The glyphs used
//! for the cardinal directions come from a [CardinalGlyphs], so the same codec
//! logic serves every locale. For a locale-independent form, see
//! [SphericalCoordinate::to_signed_decimal].

use crate::{
    config::CardinalGlyphs,
    surface::coordinate::SphericalCoordinate,
    util::{range::NumRange, HALF_PI},
};
use std::f64::consts::PI;
use thiserror::Error;

/// Which half of a coordinate some text was supposed to describe
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Reasons that coordinate text can be rejected. Parsing never falls back to
/// a default value, every failure is surfaced as one of these.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FormatError {
    #[error("{axis} is blank")]
    Blank { axis: Axis },

    #[error("{axis} number is invalid: {input:?}")]
    InvalidNumber { axis: Axis, input: String },

    #[error("{axis} value out of range: {value}")]
    OutOfRange { axis: Axis, value: f64 },

    #[error("invalid {axis} direction: {suffix:?}")]
    UnknownDirection { axis: Axis, suffix: String },

    #[error("wrong number of tokens: {count}")]
    TokenCount { count: usize },
}

/// Parses and formats coordinates with a specific set of cardinal glyphs
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateCodec {
    glyphs: CardinalGlyphs,
    precision: usize,
}

/// Sign that a cardinal glyph applies to the number before it
#[derive(Copy, Clone, Debug, PartialEq)]
enum Hemisphere {
    Positive,
    Negative,
}

impl CoordinateCodec {
    const DEFAULT_PRECISION: usize = 4;
    const LATITUDE_LIMITS: NumRange = NumRange::new(-90.0, 90.0);
    const LONGITUDE_LIMITS: NumRange = NumRange::new(-360.0, 360.0);
    const LONGITUDE_RANGE: NumRange = NumRange::new(0.0, 360.0);

    pub fn new(glyphs: CardinalGlyphs) -> Self {
        Self {
            glyphs,
            precision: Self::DEFAULT_PRECISION,
        }
    }

    /// Change the number of fractional digits in formatted output
    pub fn with_precision(self, precision: usize) -> Self {
        Self { precision, ..self }
    }

    pub fn glyphs(&self) -> &CardinalGlyphs {
        &self.glyphs
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Parse a coordinate from separate latitude and longitude strings
    pub fn parse(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<SphericalCoordinate, FormatError> {
        let phi = self.parse_latitude(latitude)?;
        let theta = self.parse_longitude(longitude)?;
        Ok(SphericalCoordinate::new(phi, theta))
    }

    /// Parse a coordinate from one string. Accepts either two tokens, where
    /// any direction glyph is attached to its number (`35.6S 63.5W`), or
    /// four tokens, where it isn't (`35.6 S 63.5 W`).
    pub fn parse_str(
        &self,
        text: &str,
    ) -> Result<SphericalCoordinate, FormatError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        match tokens.as_slice() {
            [latitude, longitude] => self.parse(latitude, longitude),
            [lat_value, lat_dir, lon_value, lon_dir] => self.parse(
                &format!("{lat_value} {lat_dir}"),
                &format!("{lon_value} {lon_dir}"),
            ),
            _ => Err(FormatError::TokenCount {
                count: tokens.len(),
            }),
        }
    }

    /// Parse latitude text into a colatitude (phi), in radians
    pub fn parse_latitude(&self, text: &str) -> Result<f64, FormatError> {
        let axis = Axis::Latitude;
        let (value, hemisphere) = self.parse_axis(
            axis,
            text,
            &self.glyphs.north,
            &self.glyphs.south,
        )?;
        if !Self::LATITUDE_LIMITS.contains(value) {
            return Err(FormatError::OutOfRange { axis, value });
        }

        let latitude = match hemisphere {
            Hemisphere::Positive => value,
            Hemisphere::Negative => -value,
        };
        Ok(HALF_PI - latitude.to_radians())
    }

    /// Parse longitude text into an east-positive theta, in radians
    pub fn parse_longitude(&self, text: &str) -> Result<f64, FormatError> {
        let axis = Axis::Longitude;
        let (value, hemisphere) = self.parse_axis(
            axis,
            text,
            &self.glyphs.east,
            &self.glyphs.west,
        )?;
        if !Self::LONGITUDE_LIMITS.contains(value) {
            return Err(FormatError::OutOfRange { axis, value });
        }

        let longitude = match hemisphere {
            Hemisphere::Positive => value,
            Hemisphere::Negative => -value,
        };
        Ok(Self::LONGITUDE_RANGE.wrap(longitude).to_radians())
    }

    /// Format both halves, e.g. `35.6780 S 63.5532 W`
    pub fn format(&self, coord: SphericalCoordinate) -> String {
        format!(
            "{} {}",
            self.format_latitude(coord),
            self.format_longitude(coord)
        )
    }

    /// Format both halves for display in a sentence, e.g.
    /// `(35.6780 S, 63.5532 W)`
    pub fn format_parenthesized(&self, coord: SphericalCoordinate) -> String {
        format!(
            "({}, {})",
            self.format_latitude(coord),
            self.format_longitude(coord)
        )
    }

    pub fn format_latitude(&self, coord: SphericalCoordinate) -> String {
        let glyph = if coord.phi() <= HALF_PI {
            &self.glyphs.north
        } else {
            &self.glyphs.south
        };
        self.format_value(coord.latitude().abs(), glyph)
    }

    pub fn format_longitude(&self, coord: SphericalCoordinate) -> String {
        let degrees = coord.theta().to_degrees();
        if coord.theta() < PI {
            self.format_value(degrees, &self.glyphs.east)
        } else {
            self.format_value(360.0 - degrees, &self.glyphs.west)
        }
    }

    fn format_value(&self, degrees: f64, glyph: &str) -> String {
        format!("{:.*} {}", self.precision, degrees, glyph)
    }

    /// Split one half of a coordinate into its numeric value and the
    /// hemisphere named by its direction glyph. Bare numbers count as
    /// positive.
    fn parse_axis(
        &self,
        axis: Axis,
        text: &str,
        positive: &str,
        negative: &str,
    ) -> Result<(f64, Hemisphere), FormatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FormatError::Blank { axis });
        }

        let (number, hemisphere) =
            if let Some(rest) = strip_suffix_ignore_case(text, positive) {
                (rest, Hemisphere::Positive)
            } else if let Some(rest) = strip_suffix_ignore_case(text, negative)
            {
                (rest, Hemisphere::Negative)
            } else {
                (text, Hemisphere::Positive)
            };

        let number = number.trim_end();
        let number = strip_suffix_ignore_case(number, &self.glyphs.degree)
            .unwrap_or(number)
            .trim_end();
        match parse_number(number) {
            Some(value) => Ok((value, hemisphere)),
            None => Err(self.diagnose(axis, text)),
        }
    }

    /// Figure out why text that should have been a number + glyph didn't
    /// parse. If the leading part is a valid number, then whatever comes after
    /// it must be a glyph we don't know.
    fn diagnose(&self, axis: Axis, text: &str) -> FormatError {
        let split = text
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == ',')
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let (number, suffix) = text.split_at(split);
        let suffix = suffix.trim();
        let suffix = strip_prefix_ignore_case(suffix, &self.glyphs.degree)
            .unwrap_or(suffix)
            .trim();

        if !suffix.is_empty() && parse_number(number).is_some() {
            FormatError::UnknownDirection {
                axis,
                suffix: suffix.to_owned(),
            }
        } else {
            FormatError::InvalidNumber {
                axis,
                input: text.to_owned(),
            }
        }
    }
}

impl Default for CoordinateCodec {
    fn default() -> Self {
        Self::new(CardinalGlyphs::default())
    }
}

/// Parse the locale-independent signed decimal form, `"<latitude>
/// <longitude>"` in degrees, north- and east-positive. The same limits apply
/// as for glyph text.
pub(crate) fn parse_signed_decimal(
    text: &str,
) -> Result<SphericalCoordinate, FormatError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [latitude, longitude] = tokens.as_slice() else {
        return Err(FormatError::TokenCount {
            count: tokens.len(),
        });
    };

    let latitude = parse_signed(Axis::Latitude, latitude)?;
    if !CoordinateCodec::LATITUDE_LIMITS.contains(latitude) {
        return Err(FormatError::OutOfRange {
            axis: Axis::Latitude,
            value: latitude,
        });
    }
    let longitude = parse_signed(Axis::Longitude, longitude)?;
    if !CoordinateCodec::LONGITUDE_LIMITS.contains(longitude) {
        return Err(FormatError::OutOfRange {
            axis: Axis::Longitude,
            value: longitude,
        });
    }
    Ok(SphericalCoordinate::from_degrees(latitude, longitude))
}

fn parse_signed(axis: Axis, text: &str) -> Result<f64, FormatError> {
    parse_number(text).ok_or_else(|| FormatError::InvalidNumber {
        axis,
        input: text.to_owned(),
    })
}

/// Parse a decimal number, accepting `,` as the decimal separator. Anything
/// that isn't finite is rejected.
fn parse_number(text: &str) -> Option<f64> {
    let value: f64 = text.replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

fn strip_suffix_ignore_case<'a>(
    text: &'a str,
    suffix: &str,
) -> Option<&'a str> {
    let len = suffix.chars().count();
    if len == 0 {
        return None;
    }
    let (start, _) = text.char_indices().rev().nth(len - 1)?;
    let (rest, tail) = text.split_at(start);
    (tail.to_uppercase() == suffix.to_uppercase()).then_some(rest)
}

fn strip_prefix_ignore_case<'a>(
    text: &'a str,
    prefix: &str,
) -> Option<&'a str> {
    let len = prefix.chars().count();
    if len == 0 {
        return None;
    }
    let end = match text.char_indices().nth(len) {
        Some((end, _)) => end,
        None if text.chars().count() == len => text.len(),
        None => return None,
    };
    let (head, rest) = text.split_at(end);
    (head.to_uppercase() == prefix.to_uppercase()).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn codec() -> CoordinateCodec {
        CoordinateCodec::default()
    }

    #[test]
    fn test_parse_cardinal() {
        let coord = codec().parse("35.6780 S", "63.5532 W").unwrap();
        assert_approx_eq!(coord.latitude(), -35.678);
        assert_approx_eq!(coord.longitude(), -63.5532);

        let coord = codec().parse("12.5n", "100e").unwrap();
        assert_approx_eq!(coord.latitude(), 12.5);
        assert_approx_eq!(coord.longitude(), 100.0);
    }

    #[test]
    fn test_parse_degree_glyph() {
        let coord = codec().parse("25.3° N", "10° W").unwrap();
        assert_approx_eq!(coord.latitude(), 25.3);
        assert_approx_eq!(coord.longitude(), -10.0);

        let coord = codec().parse("-25.3°", "190°").unwrap();
        assert_approx_eq!(coord.latitude(), -25.3);
        assert_approx_eq!(coord.longitude(), -170.0);
    }

    #[test]
    fn test_parse_bare_decimal() {
        assert_approx_eq!(codec().parse_latitude("0").unwrap(), HALF_PI);
        assert_approx_eq!(codec().parse_latitude("90").unwrap(), 0.0);
        assert_approx_eq!(codec().parse_latitude("-90").unwrap(), PI);
        assert_approx_eq!(
            codec().parse_latitude("-45").unwrap(),
            0.75 * PI
        );
        assert_approx_eq!(
            codec().parse_longitude("-90").unwrap(),
            1.5 * PI
        );
        assert_eq!(codec().parse_longitude("360").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_comma_separator() {
        let error = codec().parse("35,5 S", "63,25 O").unwrap_err();
        assert_eq!(error, FormatError::UnknownDirection {
            axis: Axis::Longitude,
            suffix: "O".into(),
        });

        let german = CoordinateCodec::new(CardinalGlyphs::german());
        let coord = german.parse("35,5 S", "63,25 O").unwrap();
        assert_approx_eq!(coord.latitude(), -35.5);
        assert_approx_eq!(coord.longitude(), 63.25);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(codec().parse_latitude("   "), Err(FormatError::Blank {
            axis: Axis::Latitude
        }));
        assert_eq!(
            codec().parse_latitude("91 N"),
            Err(FormatError::OutOfRange {
                axis: Axis::Latitude,
                value: 91.0
            })
        );
        assert_eq!(
            codec().parse_longitude("-361"),
            Err(FormatError::OutOfRange {
                axis: Axis::Longitude,
                value: -361.0
            })
        );
        assert_eq!(
            codec().parse_latitude("10 Q"),
            Err(FormatError::UnknownDirection {
                axis: Axis::Latitude,
                suffix: "Q".into()
            })
        );
        assert_eq!(
            codec().parse_latitude("10° X"),
            Err(FormatError::UnknownDirection {
                axis: Axis::Latitude,
                suffix: "X".into()
            })
        );
        // Latitude glyphs don't apply to longitude
        assert_eq!(
            codec().parse_longitude("10 N"),
            Err(FormatError::UnknownDirection {
                axis: Axis::Longitude,
                suffix: "N".into()
            })
        );
        assert_eq!(
            codec().parse_latitude("abc N"),
            Err(FormatError::InvalidNumber {
                axis: Axis::Latitude,
                input: "abc N".into()
            })
        );
        assert_eq!(
            codec().parse_latitude("NaN"),
            Err(FormatError::InvalidNumber {
                axis: Axis::Latitude,
                input: "NaN".into()
            })
        );
        assert_eq!(
            codec().parse_str("1 2 3"),
            Err(FormatError::TokenCount { count: 3 })
        );
    }

    #[test]
    fn test_parse_str() {
        let four = codec().parse_str("35.6780 S 63.5532 W").unwrap();
        let two = codec().parse_str("35.6780S  63.5532W").unwrap();
        let signed = codec().parse_str("-35.678 -63.5532").unwrap();
        assert_approx_eq!(four.phi(), two.phi());
        assert_approx_eq!(four.theta(), two.theta());
        assert_approx_eq!(four.phi(), signed.phi());
        assert_approx_eq!(four.theta(), signed.theta());
    }

    #[test]
    fn test_parse_signed_decimal() {
        let coord = parse_signed_decimal("-35.678 296.4468").unwrap();
        assert_approx_eq!(coord.latitude(), -35.678);
        assert_approx_eq!(coord.longitude(), -63.5532);

        assert_eq!(
            parse_signed_decimal("0 400"),
            Err(FormatError::OutOfRange {
                axis: Axis::Longitude,
                value: 400.0
            })
        );
        assert_eq!(
            parse_signed_decimal("0 -100000"),
            Err(FormatError::OutOfRange {
                axis: Axis::Longitude,
                value: -100000.0
            })
        );
        assert_eq!(
            parse_signed_decimal("-90.5 0"),
            Err(FormatError::OutOfRange {
                axis: Axis::Latitude,
                value: -90.5
            })
        );
        // Glyphs belong to the codec, not the persistence form
        assert_eq!(
            parse_signed_decimal("10 N"),
            Err(FormatError::InvalidNumber {
                axis: Axis::Longitude,
                input: "N".into()
            })
        );
        assert_eq!(
            parse_signed_decimal("35.6 S 63.5 W"),
            Err(FormatError::TokenCount { count: 4 })
        );
    }

    #[test]
    fn test_format() {
        let coord = SphericalCoordinate::from_degrees(-35.678, -63.5532);
        assert_eq!(codec().format(coord), "35.6780 S 63.5532 W");
        assert_eq!(
            codec().format_parenthesized(coord),
            "(35.6780 S, 63.5532 W)"
        );
        assert_eq!(
            codec().with_precision(1).format(coord),
            "35.7 S 63.6 W"
        );

        let origin = SphericalCoordinate::from_degrees(0.0, 0.0);
        assert_eq!(codec().format(origin), "0.0000 N 0.0000 E");

        let french = CoordinateCodec::new(CardinalGlyphs::french());
        assert_eq!(french.format(coord), "35.6780 S 63.5532 O");
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "35.6780 S 63.5532 W",
            "0.0000 N 0.0000 E",
            "90.0000 N 179.9999 E",
            "89.9999 S 180.0000 W",
            "12.3456 N 0.0001 W",
        ] {
            let coord = codec().parse_str(text).unwrap();
            let formatted = codec().format(coord);
            let reparsed = codec().parse_str(&formatted).unwrap();
            assert!(
                coord.angle_to(&reparsed).to_degrees() < 0.0001,
                "{text} formatted as {formatted}"
            );
        }
    }
}
