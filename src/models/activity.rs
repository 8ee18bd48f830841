use serde::{Deserialize, Serialize};

use super::Resource;

/// A logged workout. Distance is whole meters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Distance")]
    pub distance: i32,
}

impl Activity {
    pub fn new(id: impl Into<String>, title: impl Into<String>, distance: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            distance,
        }
    }
}

impl Resource for Activity {
    const KIND: &'static str = "activity";
    const LABEL: &'static str = "Activity";
    const LISTING_STUB: Option<&'static str> = Some("Listing Activities is not Implemented.");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
