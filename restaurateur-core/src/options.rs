//! The closed sets of choices a user can pick from.
//!
//! Every selector also accepts the `"None"` sentinel (or an empty string),
//! which parses to "unset" via [`parse_selection`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Text a selector shows when nothing has been picked.
pub const UNSET_SENTINEL: &str = "None";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable label, as shown in selectors.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

option_set! {
    /// Cuisine the restaurant serves.
    Cuisine, "cuisine" {
        Italian => "Italian",
        Indian => "Indian",
        Japanese => "Japanese",
        Chinese => "Chinese",
        Mexican => "Mexican",
        French => "French",
        Mediterranean => "Mediterranean",
        Korean => "Korean",
        American => "American",
        Angolan => "Angolan",
        Cameroonian => "Cameroonian",
        Chadian => "Chadian",
        Congolese => "Congolese",
        CentralAfrican => "Central African",
        EquatorialGuinean => "Equatorial Guinean",
        Gabonese => "Gabonese",
        Santomean => "Santomean",
        Arabic => "Arabic",
    }
}

option_set! {
    /// Which meal the menu is for.
    MealType, "meal type" {
        Appetizer => "Appetizer",
        Breakfast => "Breakfast",
        Lunch => "Lunch",
        Dinner => "Dinner",
    }
}

option_set! {
    Dietary, "dietary preference" {
        Vegan => "Vegan",
        Vegetarian => "Vegetarian",
        Jain => "Jain",
        GlutenFree => "Gluten-Free",
        Keto => "Keto",
    }
}

impl Cuisine {
    pub fn prompt_value(&self) -> &'static str {
        self.label()
    }
}

impl MealType {
    /// Lowercase, so the menu prompt reads "a detailed lunch menu".
    pub fn prompt_value(&self) -> &'static str {
        match self {
            MealType::Appetizer => "appetizer",
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl Dietary {
    pub fn prompt_value(&self) -> &'static str {
        self.label()
    }
}

/// Parse a selector value, mapping the sentinel and blank input to `None`.
pub fn parse_selection<T>(value: &str) -> Result<Option<T>, UnknownOption>
where
    T: FromStr<Err = UnknownOption>,
{
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNSET_SENTINEL) {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}
