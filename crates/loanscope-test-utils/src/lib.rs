//! Shared fixtures: a ten-applicant population and a matching logistic model.
//!
//! Applicant 100001 is the reference client: born 14600 days before the
//! application (40 years), gender code 0.

use std::path::PathBuf;

use tempfile::TempDir;

pub use pretty_assertions;

pub const REFERENCE_APPLICANT: i64 = 100001;

/// Session key for store tests that only need one session.
pub const SESSION: &str = "default";

pub const POPULATION_CSV: &str = "\
SK_ID_CURR,CODE_GENDER,DAYS_BIRTH,DAYS_EMPLOYED,DAYS_ID_PUBLISH,DAYS_LAST_PHONE_CHANGE,AMT_INCOME_TOTAL,AMT_GOODS_PRICE,AMT_ANNUITY,PAYMENT_RATE,EXT_SOURCE_1,EXT_SOURCE_2,EXT_SOURCE_3
100001,0,-14600,-3650,-2000,-500,202500,351000,24700.5,0.0608,0.083,0.263,
100002,1,-16765,-1188,-291,-828,270000,1129500,35698.5,0.0276,0.311,0.622,0.534
100003,0,-19046,-225,-2531,-815,67500,135000,6750,0.05,,0.556,0.730
100004,1,-19005,-3039,-2437,-617,135000,297000,29686.5,0.0945,,0.650,0.412
100005,0,-19932,-3038,-3458,-1106,121500,513000,21865.5,0.0426,,0.322,0.511
100006,1,-16941,-1588,-477,-2536,99000,454500,27517.5,0.0559,,0.354,0.621
100007,1,-13778,-3130,-619,-1562,171000,1395000,41301,0.0296,0.775,0.724,0.492
100008,0,-18850,-449,-2379,-1070,360000,1530000,42075,0.0275,,0.714,0.540
100009,1,-20099,365243,-3514,0,112500,1019610,33826.5,0.0331,0.587,0.205,0.751
100010,0,-14469,-2019,-3992,-1673,38419.155,247500,20250,0.0818,0.252,0.555,0.330
";

pub const MODEL_JSON: &str = r#"{
  "intercept": -0.1,
  "features": [
    { "name": "EXT_SOURCE_1",     "impute": 0.5,     "mean": 0.5,     "scale": 0.2,    "coef": -0.9 },
    { "name": "EXT_SOURCE_2",     "impute": 0.55,    "mean": 0.51,    "scale": 0.19,   "coef": -1.1 },
    { "name": "EXT_SOURCE_3",     "impute": 0.53,    "mean": 0.51,    "scale": 0.19,   "coef": -1.2 },
    { "name": "AMT_ANNUITY",      "impute": 24900.0, "mean": 27100.0, "scale": 14500.0, "coef": 0.15 },
    { "name": "PAYMENT_RATE",     "impute": 0.05,    "mean": 0.054,   "scale": 0.022,  "coef": 0.35 },
    { "name": "DAYS_BIRTH",       "impute": -15750.0, "mean": -16040.0, "scale": 4360.0, "coef": 0.3 },
    { "name": "CODE_GENDER",      "impute": 0.0,     "mean": 0.34,    "scale": 0.47,   "coef": -0.2 },
    { "name": "AMT_INCOME_TOTAL", "impute": 147150.0, "mean": 168800.0, "scale": 237100.0, "coef": -0.05 }
  ]
}"#;

/// Population, model and record paths inside a temporary directory.
/// The directory is removed when the fixture is dropped.
pub struct Fixture {
    pub dir: TempDir,
    pub population: PathBuf,
    pub model: PathBuf,
    pub records: PathBuf,
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let population = dir.path().join("population.csv");
    let model = dir.path().join("model.json");
    let records = dir.path().join("results.csv");

    std::fs::write(&population, POPULATION_CSV).expect("write population fixture");
    std::fs::write(&model, MODEL_JSON).expect("write model fixture");

    Fixture { dir, population, model, records }
}
