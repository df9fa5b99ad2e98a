use crate::domain::model::Car;
use crate::utils::error::{CarError, Result};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_required_field, validate_unique_ids,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfo,
    pub cars: Vec<CarConfig>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ScenarioInfo {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

/// Scalar value that is accepted wherever text is expected.
///
/// `make = 911` and `make = "911"` both end up as the text `911`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextValue::Text(s) => f.write_str(s),
            TextValue::Integer(i) => write!(f, "{}", i),
            TextValue::Float(x) => write!(f, "{}", x),
            TextValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for TextValue {
    fn from(s: &str) -> Self {
        TextValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarConfig {
    pub id: String,
    pub make: TextValue,
    pub model: TextValue,
    pub doors: Option<i32>,
    pub year: Option<i32>,
    pub owner: Option<TextValue>,
    pub mileage: Option<f64>,
    pub position: Option<(f64, f64)>,
}

impl CarConfig {
    pub fn new(id: &str, make: &str, model: &str) -> Self {
        Self {
            id: id.to_string(),
            make: make.into(),
            model: model.into(),
            doors: None,
            year: None,
            owner: None,
            mileage: None,
            position: None,
        }
    }

    pub fn build(&self) -> Car {
        let mut car = Car::new(&self.make, &self.model);
        if let Some(doors) = self.doors {
            car = car.with_doors(doors);
        }
        if let Some(year) = self.year {
            car = car.with_year(year);
        }
        if let Some(owner) = &self.owner {
            car = car.with_owner(owner);
        }
        if let Some(mileage) = self.mileage {
            car = car.with_mileage(mileage);
        }
        if let Some(position) = self.position {
            car = car.with_position(position);
        }
        car
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepConfig {
    Drive { car: String, dx: f64, dy: f64 },
    Sell { car: String, buyer: TextValue },
    Describe { car: String },
}

impl StepConfig {
    pub fn car(&self) -> &str {
        match self {
            StepConfig::Drive { car, .. }
            | StepConfig::Sell { car, .. }
            | StepConfig::Describe { car } => car,
        }
    }
}

impl fmt::Display for StepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepConfig::Drive { car, dx, dy } => write!(f, "drive {} by ({}, {})", car, dx, dy),
            StepConfig::Sell { car, buyer } => write!(f, "sell {} to {}", car, buyer),
            StepConfig::Describe { car } => write!(f, "describe {}", car),
        }
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析情境
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${OWNER_NAME})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// The two-car showroom: an Audi A8 that drives (10, 5) and a Mercedes
    /// E-Klasse that stays parked, both described afterwards.
    pub fn showroom() -> Self {
        Self {
            scenario: ScenarioInfo {
                name: Some("showroom".to_string()),
                description: Some("Two cars, one short drive".to_string()),
            },
            cars: vec![
                CarConfig::new("c1", "Audi", "A8"),
                CarConfig::new("c2", "Mercedes", "E-Klasse"),
            ],
            steps: vec![
                StepConfig::Drive {
                    car: "c1".to_string(),
                    dx: 10.0,
                    dy: 5.0,
                },
                StepConfig::Describe {
                    car: "c1".to_string(),
                },
                StepConfig::Describe {
                    car: "c2".to_string(),
                },
            ],
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        let name = validate_required_field("scenario.name", &self.scenario.name)?;
        validate_non_empty_string("scenario.name", name)?;

        if self.cars.is_empty() {
            return Err(CarError::ConfigValidationError {
                field: "cars".to_string(),
                message: "At least one car is required".to_string(),
            });
        }

        for (i, car) in self.cars.iter().enumerate() {
            validate_non_empty_string(&format!("cars[{}].id", i), &car.id)?;
            validate_non_empty_string(&format!("cars[{}].make", i), &car.make.to_string())?;
            validate_non_empty_string(&format!("cars[{}].model", i), &car.model.to_string())?;
            if let Some(mileage) = car.mileage {
                validate_finite(&format!("cars[{}].mileage", i), mileage)?;
            }
            if let Some((x, y)) = car.position {
                validate_finite(&format!("cars[{}].position.x", i), x)?;
                validate_finite(&format!("cars[{}].position.y", i), y)?;
            }
        }

        validate_unique_ids(self.cars.iter().map(|car| car.id.as_str()))?;

        let known: HashSet<&str> = self.cars.iter().map(|car| car.id.as_str()).collect();
        for (i, step) in self.steps.iter().enumerate() {
            if !known.contains(step.car()) {
                return Err(CarError::UnknownCarError {
                    id: step.car().to_string(),
                });
            }
            match step {
                StepConfig::Drive { dx, dy, .. } => {
                    validate_finite(&format!("steps[{}].dx", i), *dx)?;
                    validate_finite(&format!("steps[{}].dy", i), *dy)?;
                }
                StepConfig::Sell { buyer, .. } => {
                    validate_non_empty_string(&format!("steps[{}].buyer", i), &buyer.to_string())?;
                }
                StepConfig::Describe { .. } => {}
            }
        }

        Ok(())
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
