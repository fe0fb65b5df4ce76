use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::{Entity, EntitySchema, FieldSpec};

pub static DEAL_SCHEMA: EntitySchema = EntitySchema {
    name: "Deal",
    collection: "deal",
    description: "A sales opportunity moving through the pipeline",
    fields: &[
        FieldSpec::text("name", "Deal name").required(),
        FieldSpec::number("amount", "Deal amount").required().at_least(0.0),
        FieldSpec::choice("stage", "Sales stage", DealStage::CHOICES).default_text("new"),
        FieldSpec::date("close_date", "Expected close date"),
        FieldSpec::text("company", "Associated company"),
        FieldSpec::text("contact", "Primary contact"),
        FieldSpec::text("owner", "Deal owner"),
    ],
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    #[default]
    New,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl DealStage {
    pub const CHOICES: &'static [&'static str] = &["new", "qualified", "proposal", "won", "lost"];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub stage: DealStage,
    pub close_date: Option<NaiveDate>,
    pub company: Option<String>,
    pub contact: Option<String>,
    pub owner: Option<String>,
}

impl Entity for Deal {
    fn schema() -> &'static EntitySchema {
        &DEAL_SCHEMA
    }
}
