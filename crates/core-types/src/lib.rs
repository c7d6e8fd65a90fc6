pub mod enums;
pub mod error;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use enums::{BallGivenUp, BallObtained, Choice, Down, FieldHalf, Quarter, Shotgun, Stadium, Team, Weather};
pub use error::CoreError;
pub use records::{Drive, Game, NewDrive, NewGame, NewPlay, Play, Record, RecordKind};
