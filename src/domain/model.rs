use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DOORS: i32 = 5;
pub const DEFAULT_YEAR: i32 = 2018;

/// 平面座標 (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Euclidean length of a displacement `(dx, dy)`.
pub fn displacement_norm(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

/// A single car and its mutable state.
///
/// Fields are only readable from the outside. After construction the only
/// ways to change a car are [`Car::drive`] (position and mileage) and
/// [`Car::sell`] (owner), so mileage never decreases once the car is in use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    make: String,
    model: String,
    doors: i32,
    year: i32,
    owner: Option<String>,
    mileage: f64,
    position: Position,
}

impl Car {
    /// 建立新車，其餘欄位使用預設值 (5 門、2018 年、無車主、里程 0、原點)
    pub fn new(make: impl ToString, model: impl ToString) -> Self {
        Self {
            make: make.to_string(),
            model: model.to_string(),
            doors: DEFAULT_DOORS,
            year: DEFAULT_YEAR,
            owner: None,
            mileage: 0.0,
            position: Position::ORIGIN,
        }
    }

    pub fn with_doors(mut self, doors: i32) -> Self {
        self.doors = doors;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_owner(mut self, owner: impl ToString) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    /// Starting odometer reading. Not range-checked.
    pub fn with_mileage(mut self, mileage: f64) -> Self {
        self.mileage = mileage;
        self
    }

    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn doors(&self) -> i32 {
        self.doors
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn mileage(&self) -> f64 {
        self.mileage
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the car by `(dx, dy)` and add the straight-line distance to the
    /// mileage. Returns the distance added.
    ///
    /// The distance is always non-negative, whatever the direction.
    pub fn drive(&mut self, dx: f64, dy: f64) -> f64 {
        let distance = displacement_norm(dx, dy);
        self.position = self.position.translate(dx, dy);
        self.mileage += distance;
        tracing::debug!(
            make = %self.make,
            model = %self.model,
            distance,
            mileage = self.mileage,
            "drove car"
        );
        distance
    }

    /// Hand the car to `buyer`, returning the previous owner.
    pub fn sell(&mut self, buyer: impl ToString) -> Option<String> {
        let previous = self.owner.replace(buyer.to_string());
        tracing::debug!(
            make = %self.make,
            model = %self.model,
            from = ?previous,
            to = ?self.owner,
            "sold car"
        );
        previous
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Car {
    // f64 的 Display 輸出最短可還原的十進位表示，0.0 會印成 "0"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {} miles)",
            self.make, self.model, self.year, self.mileage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_new_car_uses_defaults() {
        let car = Car::new("Mercedes", "E-Klasse");

        assert_eq!(car.make(), "Mercedes");
        assert_eq!(car.model(), "E-Klasse");
        assert_eq!(car.doors(), 5);
        assert_eq!(car.year(), 2018);
        assert_eq!(car.owner(), None);
        assert_eq!(car.mileage(), 0.0);
        assert_eq!(car.position(), Position::ORIGIN);
    }

    #[test]
    fn test_make_and_model_are_coerced_to_text() {
        let car = Car::new(911, 3.5).with_owner(42);
        assert_eq!(car.make(), "911");
        assert_eq!(car.model(), "3.5");
        assert_eq!(car.owner(), Some("42"));
    }

    #[test]
    fn test_drive_updates_position_and_mileage() {
        let mut car = Car::new("Audi", "A8");
        let distance = car.drive(10.0, 5.0);

        assert!((distance - 125f64.sqrt()).abs() < EPSILON);
        assert!((car.mileage() - 11.180339887498949).abs() < EPSILON);
        assert_eq!(car.position(), Position::new(10.0, 5.0));
    }

    #[test]
    fn test_negative_displacement_still_adds_mileage() {
        let mut car = Car::new("Audi", "A8").with_position((1.0, 1.0));
        car.drive(-3.0, -4.0);

        assert_eq!(car.position(), Position::new(-2.0, -3.0));
        assert!((car.mileage() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_drive_accumulates() {
        let mut car = Car::new("Audi", "A8").with_mileage(100.0);
        car.drive(3.0, 4.0);
        car.drive(0.0, -2.0);

        assert!((car.mileage() - 107.0).abs() < EPSILON);
        assert_eq!(car.position(), Position::new(3.0, 2.0));
    }

    #[test]
    fn test_zero_drive_is_noop() {
        let mut car = Car::new("Audi", "A8").with_position((2.5, -1.0));
        let before = car.clone();
        assert_eq!(car.drive(0.0, 0.0), 0.0);
        assert_eq!(car, before);
    }

    #[test]
    fn test_sell_only_changes_owner() {
        let mut car = Car::new("Audi", "A8").with_owner("Anna");
        car.drive(1.0, 1.0);
        let before = car.clone();

        let previous = car.sell("Ben");

        assert_eq!(previous.as_deref(), Some("Anna"));
        assert_eq!(car.owner(), Some("Ben"));
        assert_eq!(car.make(), before.make());
        assert_eq!(car.model(), before.model());
        assert_eq!(car.doors(), before.doors());
        assert_eq!(car.year(), before.year());
        assert_eq!(car.mileage(), before.mileage());
        assert_eq!(car.position(), before.position());
    }

    #[test]
    fn test_sell_coerces_buyer_to_text() {
        let mut car = Car::new("Audi", "A8");

        assert_eq!(car.sell(42), None);
        assert_eq!(car.owner(), Some("42"));

        assert_eq!(car.sell(true).as_deref(), Some("42"));
        assert_eq!(car.owner(), Some("true"));
    }

    #[test]
    fn test_describe_format() {
        let mut audi = Car::new("Audi", "A8");
        audi.drive(10.0, 5.0);
        assert_eq!(audi.describe(), "Audi A8 (2018, 11.180339887498949 miles)");

        let mercedes = Car::new("Mercedes", "E-Klasse");
        assert_eq!(mercedes.describe(), "Mercedes E-Klasse (2018, 0 miles)");
        assert_eq!(mercedes.to_string(), mercedes.describe());
    }

    #[test]
    fn test_serialize_car() {
        let car = Car::new("Audi", "A8").with_doors(4);
        let json = serde_json::to_value(&car).unwrap();

        assert_eq!(json["make"], "Audi");
        assert_eq!(json["doors"], 4);
        assert!(json["owner"].is_null());
        assert_eq!(json["position"]["x"], 0.0);
    }
}
