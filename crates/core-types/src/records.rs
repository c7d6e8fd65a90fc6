use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// A row from the `game_info` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub home: String,
    pub away: String,
    /// `dd/mm/yyyy`, as entered.
    pub date: String,
    /// `HH:MM`, as entered.
    pub time: String,
    pub weather: String,
    pub stadium: String,
}

/// A row from the `overall_drive` table. Drives are not linked to a game.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Drive {
    pub id: i64,
    pub quarter: Option<String>,
    pub time_received: String,
    pub drive_began: String,
    pub how_ball_obtained: String,
    pub time_lost: String,
    pub last_snap: String,
    pub how_given_up: String,
}

/// A row from the `plays` table. Plays are not linked to a drive or a game.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Play {
    pub id: i64,
    pub quarter: Option<String>,
    pub down: String,
    pub yards_to_go: String,
    pub field_pos_half: String,
    pub field_pos_yard: String,
    pub time: String,
    pub shotgun: String,
    pub play_description: String,
}

/// A game that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGame {
    pub home: String,
    pub away: String,
    pub date: String,
    pub time: String,
    pub weather: String,
    pub stadium: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDrive {
    pub quarter: Option<String>,
    pub time_received: String,
    pub drive_began: String,
    pub how_ball_obtained: String,
    pub time_lost: String,
    pub last_snap: String,
    pub how_given_up: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPlay {
    pub quarter: Option<String>,
    pub down: String,
    pub yards_to_go: String,
    pub field_pos_half: String,
    pub field_pos_yard: String,
    pub time: String,
    pub shotgun: String,
    pub play_description: String,
}

impl NewGame {
    pub fn with_id(self, id: i64) -> Game {
        Game {
            id,
            home: self.home,
            away: self.away,
            date: self.date,
            time: self.time,
            weather: self.weather,
            stadium: self.stadium,
        }
    }
}

impl NewDrive {
    pub fn with_id(self, id: i64) -> Drive {
        Drive {
            id,
            quarter: self.quarter,
            time_received: self.time_received,
            drive_began: self.drive_began,
            how_ball_obtained: self.how_ball_obtained,
            time_lost: self.time_lost,
            last_snap: self.last_snap,
            how_given_up: self.how_given_up,
        }
    }
}

impl NewPlay {
    pub fn with_id(self, id: i64) -> Play {
        Play {
            id,
            quarter: self.quarter,
            down: self.down,
            yards_to_go: self.yards_to_go,
            field_pos_half: self.field_pos_half,
            field_pos_yard: self.field_pos_yard,
            time: self.time,
            shotgun: self.shotgun,
            play_description: self.play_description,
        }
    }
}

/// The three kinds of record the application stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Game,
    Drive,
    Play,
}

impl RecordKind {
    /// Listing order on the home page.
    pub const ALL: [RecordKind; 3] = [RecordKind::Game, RecordKind::Drive, RecordKind::Play];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Game => "game",
            RecordKind::Drive => "drive",
            RecordKind::Play => "play",
        }
    }

    /// Heading used when a group of records of this kind is displayed.
    pub fn title(&self) -> &'static str {
        match self {
            RecordKind::Game => "Games",
            RecordKind::Drive => "Drives",
            RecordKind::Play => "Plays",
        }
    }

    /// Column headers, matching the order of [`Record::cells`].
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Game => &["#", "Home", "Away", "Date", "Time", "Weather", "Stadium"],
            RecordKind::Drive => &[
                "#",
                "Quarter",
                "Received",
                "Drive Began",
                "How Obtained",
                "Lost",
                "Drive Ended",
                "How Given Up",
            ],
            RecordKind::Play => &[
                "#",
                "Quarter",
                "Down",
                "To Go",
                "Half",
                "Yard",
                "Time",
                "Shotgun",
                "Description",
            ],
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "game" | "games" => Ok(RecordKind::Game),
            "drive" | "drives" => Ok(RecordKind::Drive),
            "play" | "plays" => Ok(RecordKind::Play),
            _ => Err(CoreError::InvalidChoice {
                field: "record kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Any stored record, tagged with its kind.
///
/// The listing page and the `list` command are written once against this
/// type instead of once per table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Game(Game),
    Drive(Drive),
    Play(Play),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Game(_) => RecordKind::Game,
            Record::Drive(_) => RecordKind::Drive,
            Record::Play(_) => RecordKind::Play,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::Game(g) => g.id,
            Record::Drive(d) => d.id,
            Record::Play(p) => p.id,
        }
    }

    /// Display values, one per entry of [`RecordKind::columns`].
    pub fn cells(&self) -> Vec<String> {
        match self {
            Record::Game(g) => vec![
                g.id.to_string(),
                g.home.clone(),
                g.away.clone(),
                g.date.clone(),
                g.time.clone(),
                g.weather.clone(),
                g.stadium.clone(),
            ],
            Record::Drive(d) => vec![
                d.id.to_string(),
                d.quarter.clone().unwrap_or_default(),
                d.time_received.clone(),
                d.drive_began.clone(),
                d.how_ball_obtained.clone(),
                d.time_lost.clone(),
                d.last_snap.clone(),
                d.how_given_up.clone(),
            ],
            Record::Play(p) => vec![
                p.id.to_string(),
                p.quarter.clone().unwrap_or_default(),
                p.down.clone(),
                p.yards_to_go.clone(),
                p.field_pos_half.clone(),
                p.field_pos_yard.clone(),
                p.time.clone(),
                p.shotgun.clone(),
                p.play_description.clone(),
            ],
        }
    }
}

impl From<Game> for Record {
    fn from(game: Game) -> Self {
        Record::Game(game)
    }
}

impl From<Drive> for Record {
    fn from(drive: Drive) -> Self {
        Record::Drive(drive)
    }
}

impl From<Play> for Record {
    fn from(play: Play) -> Self {
        Record::Play(play)
    }
}
