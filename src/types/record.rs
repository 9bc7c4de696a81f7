use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use std::{fmt, io};

use crate::error::{ReportError, Result};

/// Identity of one problem instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId {
    pub dataset: i64,
    pub instance: i64,
    pub case: i64,
}

impl ProblemId {
    #[must_use]
    pub fn new(dataset: i64, instance: i64, case: i64) -> Self {
        Self {
            dataset,
            instance,
            case,
        }
    }

    /// JSON form with `", "` and `": "` separators,
    /// e.g. `{"dataset": 1, "instance": 2, "case": 3}`.
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Single-line JSON with a space after every `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.dataset, self.instance, self.case)
    }
}

/// One improvement event: `[timestamp, applications, score]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImprovementGeneration(pub f64, pub u64, pub f64);

impl ImprovementGeneration {
    #[must_use]
    pub fn timestamp(&self) -> f64 {
        self.0
    }

    /// Number of operator applications when the improvement was found.
    #[must_use]
    pub fn applications(&self) -> u64 {
        self.1
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.2
    }
}

/// A population member: `[score, encoding]` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate(pub f64, pub Value);

impl Candidate {
    #[must_use]
    pub fn score(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn encoding(&self) -> &Value {
        &self.1
    }
}

/// One step of a tolerance-relaxation trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceStep {
    pub tolerance: f64,
    #[serde(default)]
    pub objective: Value,
    #[serde(default)]
    pub solution_status: Value,
    #[serde(default)]
    pub termination_status: Value,
}

/// Payload of a summary-style record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPayload {
    /// Chronological improvement events.
    #[serde(rename = "imp_gens", alias = "improvement_generations")]
    pub improvement_generations: Vec<ImprovementGeneration>,
    /// Final population, unordered.
    #[serde(rename = "pop", alias = "population")]
    pub population: Vec<Candidate>,
    #[serde(rename = "optimizer", alias = "optimizer_params")]
    pub optimizer_params: Map<String, Value>,
}

/// Payload of a tolerance-matrix record: one step sequence per trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TolerancePayload {
    #[serde(rename = "tolsteps", alias = "tolerance_trials")]
    pub tolerance_trials: Vec<Vec<ToleranceStep>>,
}

impl TolerancePayload {
    /// Number of steps summed over all trials.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.tolerance_trials.iter().map(Vec::len).sum()
    }
}

/// Record payload; the shape is inferred from the keys present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Summary(SummaryPayload),
    Tolerance(TolerancePayload),
}

/// Wire keys of each payload shape, with their long-form aliases.
const SUMMARY_KEYS: [(&str, &str); 3] = [
    ("imp_gens", "improvement_generations"),
    ("pop", "population"),
    ("optimizer", "optimizer_params"),
];
const TOLERANCE_KEYS: [(&str, &str); 1] = [("tolsteps", "tolerance_trials")];
const PROBLEM_KEYS: [(&str, &str); 3] = [
    ("dataset", "dataset"),
    ("instance", "instance"),
    ("case", "case"),
];

fn has_any(map: &Map<String, Value>, keys: &[(&str, &str)]) -> bool {
    keys.iter()
        .any(|(key, alias)| map.contains_key(*key) || map.contains_key(*alias))
}

/// `MissingField` for the first key with neither its name nor its alias present.
fn require(map: &Map<String, Value>, keys: &[(&'static str, &'static str)]) -> Result<()> {
    match keys
        .iter()
        .find(|(key, alias)| !map.contains_key(*key) && !map.contains_key(*alias))
    {
        Some(&(field, _)) => Err(ReportError::MissingField { field }),
        None => Ok(()),
    }
}

/// One experiment outcome, rendered as one report region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub problem: ProblemId,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Record {
    /// Decode one record from a JSON object.
    ///
    /// A `tolsteps` key selects the tolerance shape, anything else is read as
    /// a summary. An absent required key is reported as `MissingField`.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map: Map<String, Value> = serde_json::from_value(value)?;

        let problem = map
            .remove("problem")
            .ok_or(ReportError::MissingField { field: "problem" })?;
        if let Value::Object(fields) = &problem {
            require(fields, &PROBLEM_KEYS)?;
        }
        let problem: ProblemId = serde_json::from_value(problem)?;

        let payload = if has_any(&map, &TOLERANCE_KEYS) {
            Payload::Tolerance(serde_json::from_value(Value::Object(map))?)
        } else {
            require(&map, &SUMMARY_KEYS)?;
            Payload::Summary(serde_json::from_value(Value::Object(map))?)
        };
        Ok(Self { problem, payload })
    }

    #[must_use]
    pub fn summary(
        problem: ProblemId,
        improvement_generations: Vec<ImprovementGeneration>,
        population: Vec<Candidate>,
        optimizer_params: Map<String, Value>,
    ) -> Self {
        Self {
            problem,
            payload: Payload::Summary(SummaryPayload {
                improvement_generations,
                population,
                optimizer_params,
            }),
        }
    }

    #[must_use]
    pub fn tolerance(problem: ProblemId, tolerance_trials: Vec<Vec<ToleranceStep>>) -> Self {
        Self {
            problem,
            payload: Payload::Tolerance(TolerancePayload { tolerance_trials }),
        }
    }

    /// Summary payload, or `MissingField` naming the first absent key.
    pub fn summary_payload(&self, field: &'static str) -> Result<&SummaryPayload> {
        match &self.payload {
            Payload::Summary(p) => Ok(p),
            Payload::Tolerance(_) => Err(ReportError::MissingField { field }),
        }
    }

    pub fn tolerance_payload(&self) -> Result<&TolerancePayload> {
        match &self.payload {
            Payload::Tolerance(p) => Ok(p),
            Payload::Summary(_) => Err(ReportError::MissingField { field: "tolsteps" }),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Record::from_value(value).map_err(de::Error::custom)
    }
}
