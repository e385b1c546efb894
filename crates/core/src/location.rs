//! Bordered grid of fields and the occupant's position inside it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::Dice;
use crate::entities::Player;
use crate::error::{GameOver, ValidationError};
use crate::field::{Arrival, Field, GoTo};
use crate::types::Direction;

/// Whether a matrix handed to [`Location::new`] still needs its border ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Borders {
    Add,
    Present,
}

/// Names and descriptions around the occupant, for the location overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surroundings {
    pub north: String,
    pub south: String,
    pub east: String,
    pub west: String,
    pub current: String,
    pub description: String,
    /// `(name, description)` of the resident enemy.
    pub enemy: Option<(String, String)>,
    /// `(name, description)` of the item lying here.
    pub item: Option<(String, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LocationRecord", into = "LocationRecord")]
pub struct Location {
    fields: Vec<Vec<Field>>,
    x: usize,
    y: usize,
    level: u32,
}

impl Location {
    /// Builds a location, placing the occupant at `coordinates` or, when
    /// absent, on the first field whose gate leads to `level`.
    pub fn new(
        fields: Vec<Vec<Field>>,
        borders: Borders,
        coordinates: Option<(usize, usize)>,
        level: u32,
    ) -> Result<Self, ValidationError> {
        let fields = match borders {
            Borders::Add => add_borders(fields)?,
            Borders::Present => {
                ensure_rectangle(&fields)?;
                fields
            }
        };
        let (x, y) = match coordinates {
            Some(coordinates) => coordinates,
            None => starting_point(&fields, level)?,
        };
        let mut location = Self { fields, x: 0, y: 0, level };
        location.set_coordinates(x, y)?;
        Ok(location)
    }

    pub fn fields(&self) -> &[Vec<Field>] {
        &self.fields
    }

    /// Row length, border included.
    pub fn width(&self) -> usize {
        self.fields.first().map_or(0, Vec::len)
    }

    /// Row count, border included.
    pub fn height(&self) -> usize {
        self.fields.len()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn coordinates(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn set_coordinates(&mut self, x: usize, y: usize) -> Result<(), ValidationError> {
        let (width, height) = (self.width(), self.height());
        if x >= width || y >= height {
            return Err(ValidationError::InvalidCoordinates { x, y, width, height });
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    pub fn field(&self, x: usize, y: usize) -> Option<&Field> {
        self.fields.get(y)?.get(x)
    }

    pub fn current_field(&self) -> &Field {
        &self.fields[self.y][self.x]
    }

    pub fn current_field_mut(&mut self) -> &mut Field {
        &mut self.fields[self.y][self.x]
    }

    fn offset(&self, south: i64, east: i64) -> Option<(usize, usize)> {
        let x = usize::try_from(self.x as i64 + east).ok()?;
        let y = usize::try_from(self.y as i64 + south).ok()?;
        self.field(x, y).map(|_| (x, y))
    }

    pub fn neighbour(&self, direction: Direction) -> Option<&Field> {
        let (south, east) = direction.delta();
        let (x, y) = self.offset(south, east)?;
        self.field(x, y)
    }

    /// Whether a step in `direction` would be taken. Off-grid counts as
    /// blocked.
    pub fn is_enterable(&self, direction: Direction) -> bool {
        self.neighbour(direction).is_some_and(Field::enterable)
    }

    /// Steps `south`/`east` cells away. A blocked target leaves everything
    /// unchanged and yields `None`.
    pub fn go(&mut self, player: &mut Player, dice: &mut Dice, south: i64, east: i64) -> Result<Option<Arrival>, GameOver> {
        let Some((x, y)) = self.offset(south, east) else {
            return Ok(None);
        };
        if !self.fields[y][x].enterable() {
            debug!(x, y, "move blocked");
            return Ok(None);
        }
        self.x = x;
        self.y = y;
        debug!(x, y, level = self.level, "moved");
        self.enter_current(player, dice).map(Some)
    }

    pub fn go_direction(
        &mut self,
        player: &mut Player,
        dice: &mut Dice,
        direction: Direction,
    ) -> Result<Option<Arrival>, GameOver> {
        let (south, east) = direction.delta();
        self.go(player, dice, south, east)
    }

    pub fn go_north(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Option<Arrival>, GameOver> {
        self.go(player, dice, -1, 0)
    }

    pub fn go_south(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Option<Arrival>, GameOver> {
        self.go(player, dice, 1, 0)
    }

    pub fn go_east(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Option<Arrival>, GameOver> {
        self.go(player, dice, 0, 1)
    }

    pub fn go_west(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Option<Arrival>, GameOver> {
        self.go(player, dice, 0, -1)
    }

    /// Stays put and lets the current field act on the player again.
    pub fn wait(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Arrival, GameOver> {
        self.enter_current(player, dice)
    }

    fn enter_current(&mut self, player: &mut Player, dice: &mut Dice) -> Result<Arrival, GameOver> {
        let field = self.current_field_mut();
        field.set_seen(true);
        field.entrance(player, dice)
    }

    pub fn surroundings(&self) -> Surroundings {
        let name_of = |direction| self.neighbour(direction).map(|field| field.name().to_string()).unwrap_or_default();
        let field = self.current_field();
        Surroundings {
            north: name_of(Direction::North),
            south: name_of(Direction::South),
            east: name_of(Direction::East),
            west: name_of(Direction::West),
            current: field.name().to_string(),
            description: field.description().to_string(),
            enemy: field.enemy().map(|enemy| (enemy.name().to_string(), enemy.description().to_string())),
            item: field.item().map(|item| (item.name().to_string(), item.description().to_string())),
        }
    }

    /// One glyph per cell with `" P "` over the occupant, one line per row.
    pub fn format_map(&self) -> String {
        let mut map = String::with_capacity(self.height() * (self.width() * 3 + 1));
        for (y, row) in self.fields.iter().enumerate() {
            for (x, field) in row.iter().enumerate() {
                map.push_str(if (x, y) == (self.x, self.y) { " P " } else { field.glyph() });
            }
            map.push('\n');
        }
        map
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_map())
    }
}

/// Width of a non-empty rectangular matrix.
fn ensure_rectangle(fields: &[Vec<Field>]) -> Result<usize, ValidationError> {
    let expected = fields.first().map_or(0, Vec::len);
    if expected == 0 {
        return Err(ValidationError::EmptyLocation);
    }
    if let Some((row, len)) = fields.iter().map(Vec::len).enumerate().find(|&(_, len)| len != expected) {
        return Err(ValidationError::DeformedLocation { row, len, expected });
    }
    Ok(expected)
}

/// Wraps an R×C matrix in a ring of border fields, giving (R+2)×(C+2).
pub fn add_borders(fields: Vec<Vec<Field>>) -> Result<Vec<Vec<Field>>, ValidationError> {
    let width = ensure_rectangle(&fields)? + 2;
    let border_row = || vec![Field::border(); width];
    let mut bordered = Vec::with_capacity(fields.len() + 2);
    bordered.push(border_row());
    for row in fields {
        let mut framed = Vec::with_capacity(width);
        framed.push(Field::border());
        framed.extend(row);
        framed.push(Field::border());
        bordered.push(framed);
    }
    bordered.push(border_row());
    Ok(bordered)
}

/// First field in row-major order whose gate leads to `level`.
fn starting_point(fields: &[Vec<Field>], level: u32) -> Result<(usize, usize), ValidationError> {
    fields
        .iter()
        .enumerate()
        .find_map(|(y, row)| row.iter().position(|field| field.go_to() == GoTo::Level(level)).map(|x| (x, y)))
        .ok_or(ValidationError::StartingPointNotFound(level))
}

fn first_level() -> u32 {
    1
}

/// Persisted form of a [`Location`]; the matrix is stored border included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub location: Vec<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[usize; 2]>,
    #[serde(default = "first_level")]
    pub level: u32,
}

impl TryFrom<LocationRecord> for Location {
    type Error = ValidationError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Self::new(record.location, Borders::Present, record.coordinates.map(|[x, y]| (x, y)), record.level)
    }
}

impl From<Location> for LocationRecord {
    fn from(location: Location) -> Self {
        Self { coordinates: Some([location.x, location.y]), level: location.level, location: location.fields }
    }
}
