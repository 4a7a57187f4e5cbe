use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// What a pointer press on the canvas does.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, EnumIter, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Draw,
    Erase,
}

/// Decides the color of points that have not been clustered yet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, EnumIter, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_names_match_serde() {
        for mode in InteractionMode::iter() {
            let yaml = serde_yaml::to_string(&mode).unwrap();
            assert_eq!(yaml.trim(), mode.as_ref());
        }
        for theme in Theme::iter() {
            let yaml = serde_yaml::to_string(&theme).unwrap();
            assert_eq!(yaml.trim(), theme.as_ref());
        }
    }
}
