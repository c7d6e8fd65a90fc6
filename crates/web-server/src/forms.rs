//! Field definitions and submission checks for the three data-entry forms.
//!
//! Validation is deliberately coarse: required fields must be non-blank,
//! choice fields must hold one of their values, and date/time fields must
//! parse. There are no range checks and no checks across fields.

use chrono::{NaiveDate, NaiveTime};
use core_types::{
    BallGivenUp, BallObtained, Choice, Down, FieldHalf, NewDrive, NewGame, NewPlay, Quarter, Shotgun,
    Stadium, Team, Weather,
};
use std::collections::{BTreeMap, HashMap};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M";

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const INVALID_DATE: &str = "Not a valid date value.";
pub const INVALID_TIME: &str = "Not a valid time value.";

/// Raw `name -> value` pairs as posted by the browser.
pub type RawInput = HashMap<String, String>;

/// Per-field error messages, keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, with an optional example shown as placeholder.
    Text { hint: Option<&'static str> },
    /// A number input. The bounds only guide the browser control.
    Number { min: u32, max: u32 },
    Select(Vec<&'static str>),
    Radio(Vec<&'static str>),
    /// `dd/mm/yyyy`
    Date,
    /// `HH:MM`
    Time,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true }
    }

    fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }

    fn text(name: &'static str, label: &'static str, hint: &'static str) -> Self {
        Self::required(name, label, FieldKind::Text { hint: Some(hint) })
    }

    fn select<C: Choice>(name: &'static str, label: &'static str) -> Self {
        Self::required(name, label, FieldKind::Select(C::labels()))
    }

    fn radio<C: Choice>(name: &'static str, label: &'static str) -> Self {
        Self::required(name, label, FieldKind::Radio(C::labels()))
    }

    /// Checks one submitted value. `None` means the value is acceptable.
    fn check(&self, value: &str) -> Option<&'static str> {
        match &self.kind {
            FieldKind::Text { .. } | FieldKind::Number { .. } => None,
            FieldKind::Select(choices) | FieldKind::Radio(choices) => {
                (!choices.iter().any(|c| *c == value)).then_some(INVALID_CHOICE)
            }
            FieldKind::Date => NaiveDate::parse_from_str(value, DATE_FORMAT).err().map(|_| INVALID_DATE),
            FieldKind::Time => NaiveTime::parse_from_str(value, TIME_FORMAT).err().map(|_| INVALID_TIME),
        }
    }
}

/// One of the three data-entry forms.
#[derive(Debug, Clone)]
pub struct FormSpec {
    pub title: &'static str,
    /// Path the form is served from and posted back to.
    pub action: &'static str,
    pub fields: Vec<Field>,
}

impl FormSpec {
    pub fn game() -> Self {
        Self {
            title: "Add Game",
            action: "/addgame",
            fields: vec![
                Field::select::<Team>("home", "Home Team"),
                Field::select::<Team>("away", "Away Team"),
                Field::required("date", "Date d/m/y", FieldKind::Date),
                Field::required("time", "Start Time", FieldKind::Time),
                Field::select::<Weather>("weather", "Weather"),
                Field::select::<Stadium>("stadium", "Stadium"),
            ],
        }
    }

    pub fn drive() -> Self {
        Self {
            title: "Add Drive",
            action: "/drive",
            fields: vec![
                Field::optional("quarter", "Quarter", FieldKind::Radio(Quarter::labels())),
                Field::text("time_received", "Game-Time Ball Received", "e.g. 14:20"),
                Field::text("drive_began", "Drive Began", "e.g. HSD 9"),
                Field::select::<BallObtained>("how_ball_obtained", "How Ball Obtained"),
                Field::text("time_lost", "Game-Time Ball Lost", "e.g. 14:00"),
                Field::text("last_snap", "Drive Ended", "e.g. HSD 45"),
                Field::select::<BallGivenUp>("how_given_up", "How Ball Given Up"),
            ],
        }
    }

    pub fn play() -> Self {
        Self {
            title: "Add Play",
            action: "/play",
            fields: vec![
                Field::optional("quarter", "Quarter", FieldKind::Radio(Quarter::labels())),
                Field::radio::<Down>("down", "Down"),
                Field::required("yards_to_go", "Yards to go", FieldKind::Number { min: 1, max: 99 }),
                Field::radio::<FieldHalf>("field_pos_half", "Field Position own or opponent half"),
                Field::required("field_pos_yard", "Field Position Yard", FieldKind::Number { min: 1, max: 50 }),
                Field::text("time", "Gametime", "e.g. 09:12"),
                Field::radio::<Shotgun>("shotgun", "Shotgun Formation"),
                Field::text(
                    "play_description",
                    "Play description",
                    "e.g. S.Darnold pass incomplete deep right to C.Herndon.",
                ),
            ],
        }
    }

    /// Validates a submission against this form's fields.
    ///
    /// Whitespace-only values count as missing. Unknown names in `input` are
    /// ignored. Accepted values are kept exactly as submitted.
    pub fn validate(&self, input: &RawInput) -> Result<Submission, FieldErrors> {
        let mut values = HashMap::new();
        let mut errors = FieldErrors::new();

        for field in &self.fields {
            let value = input.get(field.name).filter(|v| !v.trim().is_empty());
            match value {
                None if field.required => {
                    errors.insert(field.name, REQUIRED);
                }
                None => {}
                Some(value) => match field.check(value) {
                    Some(message) => {
                        errors.insert(field.name, message);
                    }
                    None => {
                        values.insert(field.name, value.clone());
                    }
                },
            }
        }

        if errors.is_empty() { Ok(Submission { values }) } else { Err(errors) }
    }
}

/// A submission that passed [`FormSpec::validate`].
#[derive(Debug, Clone, Default)]
pub struct Submission {
    values: HashMap<&'static str, String>,
}

impl Submission {
    /// Removes a value. Validation guarantees required fields are present.
    fn take(&mut self, name: &str) -> String {
        self.values.remove(name).unwrap_or_default()
    }

    fn take_optional(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn into_new_game(mut self) -> NewGame {
        NewGame {
            home: self.take("home"),
            away: self.take("away"),
            date: self.take("date"),
            time: self.take("time"),
            weather: self.take("weather"),
            stadium: self.take("stadium"),
        }
    }

    pub fn into_new_drive(mut self) -> NewDrive {
        NewDrive {
            quarter: self.take_optional("quarter"),
            time_received: self.take("time_received"),
            drive_began: self.take("drive_began"),
            how_ball_obtained: self.take("how_ball_obtained"),
            time_lost: self.take("time_lost"),
            last_snap: self.take("last_snap"),
            how_given_up: self.take("how_given_up"),
        }
    }

    pub fn into_new_play(mut self) -> NewPlay {
        NewPlay {
            quarter: self.take_optional("quarter"),
            down: self.take("down"),
            yards_to_go: self.take("yards_to_go"),
            field_pos_half: self.take("field_pos_half"),
            field_pos_yard: self.take("field_pos_yard"),
            time: self.take("time"),
            shotgun: self.take("shotgun"),
            play_description: self.take("play_description"),
        }
    }
}
