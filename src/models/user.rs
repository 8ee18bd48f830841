use serde::{Deserialize, Serialize};

use super::Resource;

/// A person keeping a training log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Resource for User {
    const KIND: &'static str = "user";
    const LABEL: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let user: User = serde_json::from_str(r#"{"name":"Melissa"}"#).unwrap();
        assert_eq!(user, User::new("", "Melissa"));
    }

    #[test]
    fn test_accepts_capitalized_fields() {
        let user: User = serde_json::from_str(r#"{"Id":"1","Name":"Melissa Raspberry"}"#).unwrap();
        assert_eq!(user, User::new("1", "Melissa Raspberry"));
    }

    #[test]
    fn test_reconcile_prefers_body_id() {
        let mut blank = User::new("", "Melissa");
        blank.reconcile_id("1");
        assert_eq!(blank.id, "1");

        let mut explicit = User::new("7", "Melissa");
        explicit.reconcile_id("1");
        assert_eq!(explicit.id, "7");
    }
}
