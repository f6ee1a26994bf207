use serde::{Deserialize, Deserializer, Serialize};

/// Display data for the player being bid on, as served by `/api/player`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub position: String,
    pub team: String,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl PlayerSummary {
    /// Secondary line shown under the player's name, e.g. `"NYY | SS"`.
    pub fn subtitle(&self) -> String {
        format!("{} | {}", self.team, self.position)
    }
}

/// Player ids are stored as strings but some payloads carry them as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        let player: PlayerSummary = serde_json::from_str(
            r#"{"name":"A","position":"F","team":"X","id":7,"image":"u"}"#,
        )
        .unwrap();
        assert_eq!(
            player,
            PlayerSummary {
                id: "7".into(),
                name: "A".into(),
                position: "F".into(),
                team: "X".into(),
                image_url: "u".into(),
            }
        );
        assert_eq!(player.subtitle(), "X | F");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let player: PlayerSummary = serde_json::from_str(r#"{"id":"p-1","name":"B"}"#).unwrap();
        assert_eq!(player.id, "p-1");
        assert_eq!(player.name, "B");
        assert!(player.team.is_empty());
        assert!(player.image_url.is_empty());
    }
}
