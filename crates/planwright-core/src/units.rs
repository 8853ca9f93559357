//! Unit conversion utilities
//!
//! All geometry is stored in millimeters; the unit system only affects how
//! dimensions are displayed and parsed. Supports decimal and fractional inch
//! parsing and eighth-inch formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch (exact)
pub const MM_PER_INCH: f64 = 25.4;

/// Millimeters per foot (exact)
pub const MM_PER_FOOT: f64 = 304.8;

/// Square millimeters per square foot
pub const SQ_MM_PER_SQ_FT: f64 = MM_PER_FOOT * MM_PER_FOOT;

/// Display unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Feet and inches, eighth-inch display precision
    #[default]
    Imperial,
    /// Millimeters, whole-millimeter display precision
    Metric,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imperial => write!(f, "Imperial"),
            Self::Metric => write!(f, "Metric"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

/// Inches to millimeters
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Millimeters to inches
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Millimeters to feet
pub fn mm_to_feet(mm: f64) -> f64 {
    mm / MM_PER_FOOT
}

/// Square millimeters to square feet
pub fn sq_mm_to_sq_ft(sq_mm: f64) -> f64 {
    sq_mm / SQ_MM_PER_SQ_FT
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Format a length for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target unit system
///
/// Metric rounds to the nearest whole millimeter (`"762 mm"`). Imperial
/// rounds to the nearest eighth of an inch and reduces the fraction
/// (`"34 1/2\""`); a fraction that rounds up to a full inch carries.
pub fn format_dimension(value_mm: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::Metric => format!("{} mm", value_mm.round() as i64),
        UnitSystem::Imperial => {
            let eighths_total = (mm_to_inches(value_mm) * 8.0).round() as i64;
            let sign = if eighths_total < 0 { "-" } else { "" };
            let eighths_total = eighths_total.unsigned_abs();
            let whole = eighths_total / 8;
            let eighths = eighths_total % 8;

            if eighths == 0 {
                return format!("{}{}\"", sign, whole);
            }

            let divisor = gcd(eighths, 8);
            let fraction = format!("{}/{}", eighths / divisor, 8 / divisor);
            if whole == 0 {
                format!("{}{}\"", sign, fraction)
            } else {
                format!("{}{} {}\"", sign, whole, fraction)
            }
        }
    }
}

/// Parse length string to millimeters
///
/// * `input` - String to parse (`"30"`, `"34 1/2"`, `"3/8"`, `"762"`)
/// * `system` - Assumed unit system
pub fn parse_length(input: &str, system: UnitSystem) -> Result<f64, String> {
    let input = input.trim().trim_end_matches('"').trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match system {
        UnitSystem::Metric => {
            let input = input.trim_end_matches("mm").trim();
            input.parse::<f64>().map_err(|e| e.to_string())
        }
        UnitSystem::Imperial => {
            if !input.contains('/') {
                let inches = input.parse::<f64>().map_err(|e| e.to_string())?;
                return Ok(inches_to_mm(inches));
            }

            let mut total_inches = 0.0;
            let mut negative = false;
            for part in input.split_whitespace() {
                let part = match part.strip_prefix('-') {
                    Some(rest) => {
                        negative = true;
                        rest
                    }
                    None => part,
                };
                if part.contains('/') {
                    let frac_parts: Vec<&str> = part.split('/').collect();
                    if frac_parts.len() != 2 {
                        return Err("Invalid fraction format".to_string());
                    }
                    let num = frac_parts[0]
                        .parse::<f64>()
                        .map_err(|_| "Invalid numerator")?;
                    let den = frac_parts[1]
                        .parse::<f64>()
                        .map_err(|_| "Invalid denominator")?;
                    if den == 0.0 {
                        return Err("Division by zero".to_string());
                    }
                    total_inches += num / den;
                } else {
                    total_inches += part.parse::<f64>().map_err(|_| "Invalid number part")?;
                }
            }
            if negative {
                total_inches = -total_inches;
            }
            Ok(inches_to_mm(total_inches))
        }
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn unit_label(system: UnitSystem) -> &'static str {
    match system {
        UnitSystem::Metric => "mm",
        UnitSystem::Imperial => "in",
    }
}
