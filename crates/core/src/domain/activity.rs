use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::{Entity, EntitySchema, FieldSpec};

pub static ACTIVITY_SCHEMA: EntitySchema = EntitySchema {
    name: "Activity",
    collection: "activity",
    description: "A logged touchpoint or follow-up task",
    fields: &[
        FieldSpec::choice("type", "Activity type", ActivityType::CHOICES).required(),
        FieldSpec::text("subject", "Short subject").required(),
        FieldSpec::text("notes", "Detailed notes"),
        FieldSpec::date("due_date", "Due date for tasks/meetings"),
        FieldSpec::text("company", "Related company"),
        FieldSpec::text("contact", "Related contact"),
        FieldSpec::text("deal", "Related deal"),
        FieldSpec::text("owner", "Activity owner"),
    ],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Call,
    Email,
    Meeting,
    Note,
    Task,
}

impl ActivityType {
    pub const CHOICES: &'static [&'static str] = &["call", "email", "meeting", "note", "task"];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub subject: String,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub company: Option<String>,
    pub contact: Option<String>,
    pub deal: Option<String>,
    pub owner: Option<String>,
}

impl Entity for Activity {
    fn schema() -> &'static EntitySchema {
        &ACTIVITY_SCHEMA
    }
}
