use std::fmt;

use serde::{Deserialize, Serialize};

/// 16-point compass rose reported by the PRSA stations.
///
/// Each label maps to a fixed bearing in 22.5-degree steps so that wind
/// direction can participate in numeric correlation analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl WindDirection {
    pub const ALL: [WindDirection; 16] = [
        WindDirection::N,
        WindDirection::NNE,
        WindDirection::NE,
        WindDirection::ENE,
        WindDirection::E,
        WindDirection::ESE,
        WindDirection::SE,
        WindDirection::SSE,
        WindDirection::S,
        WindDirection::SSW,
        WindDirection::SW,
        WindDirection::WSW,
        WindDirection::W,
        WindDirection::WNW,
        WindDirection::NW,
        WindDirection::NNW,
    ];

    /// Parse a compass label. Labels outside the 16-point rose yield `None`,
    /// which the normalizer treats as a missing value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "N" => Some(WindDirection::N),
            "NNE" => Some(WindDirection::NNE),
            "NE" => Some(WindDirection::NE),
            "ENE" => Some(WindDirection::ENE),
            "E" => Some(WindDirection::E),
            "ESE" => Some(WindDirection::ESE),
            "SE" => Some(WindDirection::SE),
            "SSE" => Some(WindDirection::SSE),
            "S" => Some(WindDirection::S),
            "SSW" => Some(WindDirection::SSW),
            "SW" => Some(WindDirection::SW),
            "WSW" => Some(WindDirection::WSW),
            "W" => Some(WindDirection::W),
            "WNW" => Some(WindDirection::WNW),
            "NW" => Some(WindDirection::NW),
            "NNW" => Some(WindDirection::NNW),
            _ => None,
        }
    }

    /// Bearing in degrees, clockwise from north: N=0.0 through NNW=337.5.
    pub fn degrees(&self) -> f64 {
        match self {
            WindDirection::N => 0.0,
            WindDirection::NNE => 22.5,
            WindDirection::NE => 45.0,
            WindDirection::ENE => 67.5,
            WindDirection::E => 90.0,
            WindDirection::ESE => 112.5,
            WindDirection::SE => 135.0,
            WindDirection::SSE => 157.5,
            WindDirection::S => 180.0,
            WindDirection::SSW => 202.5,
            WindDirection::SW => 225.0,
            WindDirection::WSW => 247.5,
            WindDirection::W => 270.0,
            WindDirection::WNW => 292.5,
            WindDirection::NW => 315.0,
            WindDirection::NNW => 337.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NNE => "NNE",
            WindDirection::NE => "NE",
            WindDirection::ENE => "ENE",
            WindDirection::E => "E",
            WindDirection::ESE => "ESE",
            WindDirection::SE => "SE",
            WindDirection::SSE => "SSE",
            WindDirection::S => "S",
            WindDirection::SSW => "SSW",
            WindDirection::SW => "SW",
            WindDirection::WSW => "WSW",
            WindDirection::W => "W",
            WindDirection::WNW => "WNW",
            WindDirection::NW => "NW",
            WindDirection::NNW => "NNW",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for dir in WindDirection::ALL {
            assert_eq!(WindDirection::parse(dir.label()), Some(dir));
        }
    }

    #[test]
    fn test_degrees_are_a_bijection() {
        let mut seen = Vec::new();
        for (i, dir) in WindDirection::ALL.iter().enumerate() {
            let deg = dir.degrees();
            assert_eq!(deg, i as f64 * 22.5);
            assert!(!seen.contains(&deg.to_bits()));
            seen.push(deg.to_bits());
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_unknown_label_is_missing() {
        assert_eq!(WindDirection::parse("NNNW"), None);
        assert_eq!(WindDirection::parse("north"), None);
        assert_eq!(WindDirection::parse(""), None);
    }
}
