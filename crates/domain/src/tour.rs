//! Tour data model — the structured facts the viewer front-end supplies
//! about the visitor's current scene.
//!
//! Every field is optional: the front-end only sends what it knows about a
//! scene, and the prompt compiler degrades each absent field to an explicit
//! placeholder. Map-backed fields use `BTreeMap` so the compiled prompt is
//! byte-identical for identical input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Location context
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationContext {
    /// Identity of the place the visitor is standing in.
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub location_full_desc: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub anecdotes: Option<Vec<String>>,
    #[serde(default)]
    pub related_people: Option<Vec<String>>,
    /// Topic key → free-text content. Keys are humanized by the compiler.
    #[serde(default)]
    pub deep_knowledge: Option<BTreeMap<String, String>>,
    /// What is visible in each direction from the viewpoint.
    #[serde(default)]
    pub objets_visibles: Option<BTreeMap<Direction, String>>,
    #[serde(default)]
    pub general_knowledge: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub tour_creator: Option<TourCreator>,
    /// Opaque scene identifier of the current panorama.
    #[serde(default)]
    pub current_scene_id: Option<String>,
}

impl LocationContext {
    /// The location identity, treating an empty string as absent.
    pub fn location(&self) -> Option<&str> {
        self.current_location.as_deref().filter(|s| !s.is_empty())
    }
}

/// Viewing direction from a panorama viewpoint.
///
/// Declaration order is the stable emission order of the compiled prompt
/// (`Ord` derives from it, and `objets_visibles` is a `BTreeMap`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Front,
    Left,
    Back,
    Right,
    Up,
    Down,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tour creator attribution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourCreator {
    pub name: String,
    pub title: String,
    pub company: String,
    pub website: String,
    pub expertise: String,
}

impl Default for TourCreator {
    fn default() -> Self {
        Self {
            name: "Gabriela Coca".into(),
            title: "Photographe et créatrice de visites virtuelles".into(),
            company: "Gabriela Coca Photographie".into(),
            website: "www.gabrielacoca.fr".into(),
            expertise: "Visites virtuelles 360° de lieux patrimoniaux".into(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Conversation history
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One prior turn as supplied by the front-end.
///
/// `role` is kept as a raw string here; the history window normalizes it
/// to exactly {user, assistant} before anything reaches a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_order_is_front_left_back_right_up_down() {
        let mut map = BTreeMap::new();
        map.insert(Direction::Down, "sol".to_string());
        map.insert(Direction::Front, "scène".to_string());
        map.insert(Direction::Up, "plafond".to_string());
        map.insert(Direction::Left, "loges".to_string());
        let order: Vec<Direction> = map.keys().copied().collect();
        assert_eq!(
            order,
            vec![Direction::Front, Direction::Left, Direction::Up, Direction::Down]
        );
    }

    #[test]
    fn direction_deserializes_lowercase() {
        let d: Direction = serde_json::from_str(r#""front""#).unwrap();
        assert_eq!(d, Direction::Front);
    }

    #[test]
    fn location_treats_empty_string_as_absent() {
        let ctx = LocationContext {
            current_location: Some(String::new()),
            ..Default::default()
        };
        assert!(ctx.location().is_none());
        let ctx = LocationContext {
            current_location: Some("Grand Foyer".into()),
            ..Default::default()
        };
        assert_eq!(ctx.location(), Some("Grand Foyer"));
    }

    #[test]
    fn context_deserializes_from_partial_json() {
        let json = r#"{
            "current_location": "Loge n°5",
            "highlights": ["le rideau", "la balustrade"],
            "objets_visibles": {"front": "la scène", "up": "le lustre"},
            "current_scene_id": "scene_loge_5"
        }"#;
        let ctx: LocationContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.location(), Some("Loge n°5"));
        assert_eq!(ctx.highlights.as_ref().unwrap().len(), 2);
        assert!(ctx.anecdotes.is_none());
        let dirs: Vec<Direction> =
            ctx.objets_visibles.as_ref().unwrap().keys().copied().collect();
        assert_eq!(dirs, vec![Direction::Front, Direction::Up]);
    }

    #[test]
    fn default_creator_attribution_is_stable() {
        let creator = TourCreator::default();
        assert_eq!(creator.name, "Gabriela Coca");
        assert_eq!(creator.website, "www.gabrielacoca.fr");
    }
}
