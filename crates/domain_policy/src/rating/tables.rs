//! Static rating factor tables
//!
//! Each table maps a coded input to a multiplicative factor. Codes that are
//! not listed decode to the `Other` variant and rate at the table's default
//! factor, so an unlisted value behaves exactly like an absent one.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

macro_rules! factor_table {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:expr, {
            $($(#[$vmeta:meta])* $variant:ident => ($code:literal, $factor:expr)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Any code not listed in the table
            Other(String),
        }

        impl $name {
            /// Factor applied when the code is not listed
            pub const DEFAULT_FACTOR: Decimal = $default;

            /// Returns the input code
            pub fn code(&self) -> &str {
                match self {
                    $($name::$variant => $code,)+
                    $name::Other(code) => code,
                }
            }

            /// Returns the rating factor for this code
            pub fn factor(&self) -> Decimal {
                match self {
                    $($name::$variant => $factor,)+
                    $name::Other(_) => Self::DEFAULT_FACTOR,
                }
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                match code {
                    $($code => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                $name::from(code.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(code) => code,
                    known => known.code().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

factor_table! {
    /// Vehicle body type; the factor scales the product base price
    VehicleType, default = dec!(1.0), {
        Hatchback => ("HATCHBACK", dec!(1.0)),
        Sedan => ("SEDAN", dec!(1.2)),
        Suv => ("SUV", dec!(1.5)),
        Luxury => ("LUXURY", dec!(2.0)),
        Bike => ("BIKE", dec!(0.3)),
    }
}

factor_table! {
    /// City tier where the vehicle is registered
    CityTier, default = dec!(1.0), {
        Metro => ("METRO", dec!(1.2)),
        Tier1 => ("TIER1", dec!(1.1)),
        Tier2 => ("TIER2", dec!(1.0)),
    }
}

factor_table! {
    /// Occupational hazard class of a life applicant
    OccupationRisk, default = dec!(1.0), {
        Low => ("LOW", dec!(1.0)),
        Medium => ("MEDIUM", dec!(1.2)),
        High => ("HIGH", dec!(1.5)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_factors() {
        assert_eq!(VehicleType::Suv.factor(), dec!(1.5));
        assert_eq!(VehicleType::Bike.factor(), dec!(0.3));
        assert_eq!(VehicleType::from("SPACESHIP").factor(), VehicleType::DEFAULT_FACTOR);
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert_eq!(CityTier::from("metro"), CityTier::Other("metro".to_string()));
        assert_eq!(CityTier::from("METRO"), CityTier::Metro);
    }

    #[test]
    fn test_serde_round_trips_unknown_codes() {
        let occupation: OccupationRisk = serde_json::from_str("\"EXTREME\"").unwrap();
        assert_eq!(occupation.factor(), dec!(1.0));
        assert_eq!(serde_json::to_string(&occupation).unwrap(), "\"EXTREME\"");
    }
}
