//! On-disk document shape
//!
//! All records live in one JSON document: `{ "calculators": [ ... ] }`.

use serde::{Deserialize, Serialize};

use crate::calculator::Calculator;

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Document {
    #[serde(default)]
    pub calculators: Vec<Calculator>,
}
