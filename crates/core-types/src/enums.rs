use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed set of values offered by a select or radio control.
///
/// The label is both what the user sees and what gets stored, so it must
/// never change once records exist.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    /// All labels, in display order.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::label).collect()
    }
}

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(&self) -> &'static str {
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
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label() == s)
                    .ok_or_else(|| CoreError::InvalidChoice {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

choice_enum! {
    /// The franchises a game can be scheduled between.
    Team, "team" {
        BarcelonaDragons => "Barcelona Dragons",
        BerlinThunder => "Berlin Thunder",
        CologneCenturions => "Cologne Centurions",
        FrankfurtGalaxy => "Frankfurt Galaxy",
        HamburgSeaDevils => "Hamburg Sea Devils",
        LeipzigKings => "Leipzig Kings",
        PanthersWroclaw => "Panthers Wroclaw",
        StuttgartSurge => "Stuttgart Surge",
    }
}

choice_enum! {
    Weather, "weather" {
        Sunny => "Sunny",
        Windy => "Windy",
        Cloudy => "Cloudy",
        Rain => "Rain",
        HeavyRain => "Heavy Rain",
        Snow => "Snow",
    }
}

choice_enum! {
    Stadium, "stadium" {
        Open => "open",
        Closed => "closed",
    }
}

choice_enum! {
    /// How the offense came into possession at the start of a drive.
    BallObtained, "way of obtaining the ball" {
        Downs => "Downs",
        Fumble => "Fumble",
        Interception => "Interception",
        Kickoff => "Kickoff",
        MissedFieldGoal => "Missed FG",
        Punt => "Punt",
    }
}

choice_enum! {
    /// How a drive ended.
    BallGivenUp, "way of giving up the ball" {
        Downs => "Downs",
        EndOfGame => "End of Game",
        FieldGoal => "Field Goal",
        Fumble => "Fumble",
        Interception => "Interception",
        MissedFieldGoal => "Missed FG",
        Punt => "Punt",
        Touchdown => "Touchdown",
    }
}

choice_enum! {
    Quarter, "quarter" {
        First => "1",
        Second => "2",
        Third => "3",
        Fourth => "4",
        Overtime => "OT",
    }
}

choice_enum! {
    Down, "down" {
        First => "1",
        Second => "2",
        Third => "3",
        Fourth => "4",
    }
}

choice_enum! {
    /// Which half of the field the ball is spotted in, from the offense's view.
    FieldHalf, "field half" {
        Own => "own",
        Opponent => "opponent",
    }
}

choice_enum! {
    Shotgun, "shotgun indicator" {
        Yes => "yes",
        No => "no",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_in_display_order() {
        assert_eq!(Team::labels().len(), 8);
        assert_eq!(Team::labels()[0], "Barcelona Dragons");
        assert_eq!(Weather::labels(), vec!["Sunny", "Windy", "Cloudy", "Rain", "Heavy Rain", "Snow"]);
        assert_eq!(BallObtained::ALL.len(), 6);
        assert_eq!(BallGivenUp::ALL.len(), 8);
    }

    #[test]
    fn parses_exact_labels_only() {
        assert_eq!("Heavy Rain".parse::<Weather>(), Ok(Weather::HeavyRain));
        assert_eq!("Missed FG".parse::<BallGivenUp>(), Ok(BallGivenUp::MissedFieldGoal));
        assert!("heavy rain".parse::<Weather>().is_err());
        assert!(" open".parse::<Stadium>().is_err());
    }

    #[test]
    fn invalid_choice_names_the_field() {
        let err = "5".parse::<Down>().unwrap_err();
        assert_eq!(err, CoreError::InvalidChoice { field: "down", value: "5".to_string() });
        assert_eq!(err.to_string(), "'5' is not a valid down");
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Team::HamburgSeaDevils).unwrap();
        assert_eq!(json, "\"Hamburg Sea Devils\"");
        let back: Quarter = serde_json::from_str("\"OT\"").unwrap();
        assert_eq!(back, Quarter::Overtime);
    }
}
