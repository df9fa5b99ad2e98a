use crate::config::toml_config::{ScenarioConfig, StepConfig};
use crate::domain::model::Car;
use crate::domain::ports::Reporter;
use crate::utils::error::{CarError, Result};
use crate::utils::validation::Validate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct CarReport<'a> {
    id: &'a str,
    #[serde(flatten)]
    car: &'a Car,
    description: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Final state of every car, in declaration order.
    pub cars: Vec<(String, Car)>,
    pub drives: usize,
    pub sales: usize,
    pub descriptions: usize,
}

impl RunSummary {
    pub fn car(&self, id: &str) -> Option<&Car> {
        self.cars
            .iter()
            .find(|(car_id, _)| car_id == id)
            .map(|(_, car)| car)
    }
}

pub struct ScenarioRunner<R: Reporter> {
    reporter: R,
    format: OutputFormat,
}

impl<R: Reporter> ScenarioRunner<R> {
    pub fn new(reporter: R, format: OutputFormat) -> Self {
        Self { reporter, format }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Steps that `run` would execute, one line each.
    pub fn plan(scenario: &ScenarioConfig) -> Vec<String> {
        scenario
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{:>3}. {}", i + 1, step))
            .collect()
    }

    pub fn run(&mut self, scenario: &ScenarioConfig) -> Result<RunSummary> {
        scenario.validate()?;

        tracing::info!(
            "🚗 Running scenario '{}' ({} cars, {} steps)",
            scenario.scenario.display_name(),
            scenario.cars.len(),
            scenario.steps.len()
        );

        let mut summary = RunSummary {
            cars: scenario
                .cars
                .iter()
                .map(|config| (config.id.clone(), config.build()))
                .collect(),
            ..RunSummary::default()
        };
        let index: HashMap<String, usize> = summary
            .cars
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (id.clone(), i))
            .collect();

        for step in &scenario.steps {
            let slot = *index
                .get(step.car())
                .ok_or_else(|| CarError::UnknownCarError {
                    id: step.car().to_string(),
                })?;
            let (id, car) = &mut summary.cars[slot];

            match step {
                StepConfig::Drive { dx, dy, .. } => {
                    car.drive(*dx, *dy);
                    summary.drives += 1;
                }
                StepConfig::Sell { buyer, .. } => {
                    car.sell(buyer);
                    summary.sales += 1;
                }
                StepConfig::Describe { .. } => {
                    let line = self.render(id, car)?;
                    self.reporter.report(&line)?;
                    summary.descriptions += 1;
                }
            }
        }

        tracing::info!(
            "✅ Scenario finished: {} drives, {} sales, {} descriptions",
            summary.drives,
            summary.sales,
            summary.descriptions
        );

        Ok(summary)
    }

    fn render(&self, id: &str, car: &Car) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(car.describe()),
            OutputFormat::Json => {
                let report = CarReport {
                    id,
                    car,
                    description: car.describe(),
                };
                Ok(serde_json::to_string(&report)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryReporter;
    use crate::config::toml_config::CarConfig;

    #[test]
    fn test_showroom_output() {
        let mut runner = ScenarioRunner::new(MemoryReporter::new(), OutputFormat::Text);
        let summary = runner.run(&ScenarioConfig::showroom()).unwrap();

        assert_eq!(
            runner.reporter().lines(),
            [
                "Audi A8 (2018, 11.180339887498949 miles)",
                "Mercedes E-Klasse (2018, 0 miles)"
            ]
        );
        assert_eq!(summary.drives, 1);
        assert_eq!(summary.descriptions, 2);
        assert_eq!(summary.car("c1").unwrap().position().x, 10.0);
    }

    #[test]
    fn test_json_output() {
        let mut runner = ScenarioRunner::new(MemoryReporter::new(), OutputFormat::Json);
        runner.run(&ScenarioConfig::showroom()).unwrap();

        let lines = runner.into_reporter().into_lines();
        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();

        assert_eq!(first["id"], "c1");
        assert_eq!(first["make"], "Audi");
        assert_eq!(first["position"]["x"], 10.0);
        assert_eq!(first["description"], "Audi A8 (2018, 11.180339887498949 miles)");
        assert!(first["owner"].is_null());
    }

    #[test]
    fn test_sell_then_describe() {
        let mut scenario = ScenarioConfig::showroom();
        scenario.steps = vec![StepConfig::Sell {
            car: "c2".to_string(),
            buyer: "Dora".into(),
        }];

        let mut runner = ScenarioRunner::new(MemoryReporter::new(), OutputFormat::Text);
        let summary = runner.run(&scenario).unwrap();

        assert!(runner.reporter().lines().is_empty());
        assert_eq!(summary.sales, 1);
        assert_eq!(summary.car("c2").unwrap().owner(), Some("Dora"));
        assert_eq!(summary.car("c1").unwrap().owner(), None);
    }

    #[test]
    fn test_non_text_buyer_is_stored_as_text() {
        let scenario = ScenarioConfig::from_toml_str(
            r#"
[scenario]
name = "scalar-buyers"

[[cars]]
id = "c1"
make = "Audi"
model = "A8"

[[cars]]
id = "c2"
make = "Mercedes"
model = "E-Klasse"

[[steps]]
action = "sell"
car = "c1"
buyer = true

[[steps]]
action = "sell"
car = "c2"
buyer = 42
"#,
        )
        .unwrap();

        let mut runner = ScenarioRunner::new(MemoryReporter::new(), OutputFormat::Text);
        let summary = runner.run(&scenario).unwrap();

        assert_eq!(summary.sales, 2);
        assert_eq!(summary.car("c1").unwrap().owner(), Some("true"));
        assert_eq!(summary.car("c2").unwrap().owner(), Some("42"));
    }

    #[test]
    fn test_invalid_scenario_is_not_run() {
        let mut scenario = ScenarioConfig::showroom();
        scenario.cars.push(CarConfig::new("", "VW", "Golf"));

        let mut runner = ScenarioRunner::new(MemoryReporter::new(), OutputFormat::Text);
        assert!(runner.run(&scenario).is_err());
        assert!(runner.reporter().lines().is_empty());
    }

    #[test]
    fn test_plan_lists_steps() {
        let plan = ScenarioRunner::<MemoryReporter>::plan(&ScenarioConfig::showroom());
        assert_eq!(
            plan,
            vec![
                "  1. drive c1 by (10, 5)".to_string(),
                "  2. describe c1".to_string(),
                "  3. describe c2".to_string(),
            ]
        );
    }
}
