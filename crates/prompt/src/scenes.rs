//! Next-scene suggestion extraction.
//!
//! Deterministic keyword scan over the generated reply.  Table order is the
//! tie-break: the first entry whose keyword appears in the reply wins, so
//! reordering entries changes visible behaviour.

/// Topical keyword → target scene id, in priority order.
const SCENE_KEYWORDS: &[(&str, &str)] = &[
    ("chagall", "scene_plafond_chagall"),
    ("plafond", "scene_plafond_chagall"),
    ("grand escalier", "scene_grand_escalier"),
    ("grand foyer", "scene_grand_foyer"),
    ("salle de spectacle", "scene_salle_spectacle"),
    ("loge", "scene_loge_fantome"),
    ("fantôme", "scene_loge_fantome"),
    ("rotonde", "scene_rotonde_abonnes"),
    ("bassin", "scene_bassin_pythie"),
    ("façade", "scene_facade"),
];

/// Suggest the next scene to visit based on the reply text.
///
/// A keyword already contained in `current_location` never produces a
/// suggestion: the guide must not send the visitor to the place they are
/// standing in.
pub fn suggest(reply: &str, current_location: &str) -> Option<&'static str> {
    let reply = reply.to_lowercase();
    let location = current_location.to_lowercase();

    SCENE_KEYWORDS
        .iter()
        .find(|(keyword, _)| reply.contains(keyword) && !location.contains(keyword))
        .map(|(_, scene)| *scene)
}
