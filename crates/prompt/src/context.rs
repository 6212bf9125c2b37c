//! Location-context assembly.
//!
//! Turns the partially-populated [`LocationContext`] record into the ordered
//! block of facts the system instructions embed.  Absent scalar fields
//! degrade to explicit placeholders ("Non spécifié", "Aucune") so the model
//! can tell "nothing known" from "section missing"; absent map fields are
//! omitted silently.

use std::fmt::Write;

use cicerone_domain::tour::{Direction, LocationContext, TourCreator};

/// Fallback paragraph when no location identity is supplied.
const GENERIC_FALLBACK: &str = "Le visiteur explore l'Opéra Garnier à Paris en visite virtuelle 360°, \
sans localisation précise communiquée. Parle du monument dans son ensemble : \
l'architecture de Charles Garnier, son inauguration en 1875 et ses espaces \
emblématiques.";

/// Assemble the location-context block.
pub fn assemble(ctx: Option<&LocationContext>) -> String {
    let Some(ctx) = ctx else {
        return GENERIC_FALLBACK.to_string();
    };
    let Some(location) = ctx.location() else {
        return GENERIC_FALLBACK.to_string();
    };

    let mut out = String::new();

    let _ = writeln!(out, "LOCALISATION ACTUELLE DU VISITEUR : {location}");
    if let Some(desc) = ctx.location_full_desc.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "{desc}");
    }

    let _ = writeln!(out, "\nÉLÉMENTS VISIBLES ICI :");
    match &ctx.highlights {
        Some(items) => {
            let _ = writeln!(out, "{}", items.join(", "));
        }
        None => {
            let _ = writeln!(out, "Non spécifié");
        }
    }

    let _ = writeln!(out, "\nANECDOTES SUR CE LIEU :");
    match &ctx.anecdotes {
        Some(items) => {
            for (i, anecdote) in items.iter().enumerate() {
                let _ = writeln!(out, "{}. {anecdote}", i + 1);
            }
        }
        None => {
            let _ = writeln!(out, "Aucune");
        }
    }

    let _ = writeln!(out, "\nPERSONNAGES LIÉS :");
    match &ctx.related_people {
        Some(items) => {
            let _ = writeln!(out, "{}", items.join(", "));
        }
        None => {
            let _ = writeln!(out, "Non spécifié");
        }
    }

    if let Some(topics) = ctx.deep_knowledge.as_ref().filter(|m| !m.is_empty()) {
        let _ = writeln!(out, "\nCONNAISSANCES APPROFONDIES :");
        for (key, content) in topics {
            let _ = writeln!(out, "- {} : {content}", humanize_topic(key));
        }
    }

    if let Some(directions) = ctx.objets_visibles.as_ref().filter(|m| !m.is_empty()) {
        let _ = writeln!(out, "\nOBJETS VISIBLES PAR DIRECTION :");
        for (direction, desc) in directions {
            let _ = writeln!(out, "- {} : {desc}", direction_label(*direction));
        }
    }

    if let Some(topics) = ctx.general_knowledge.as_ref().filter(|m| !m.is_empty()) {
        let _ = writeln!(out, "\nCULTURE GÉNÉRALE :");
        for (key, content) in topics {
            let _ = writeln!(out, "- {} : {content}", humanize_topic(key));
        }
    }

    let default_creator = TourCreator::default();
    let creator = ctx.tour_creator.as_ref().unwrap_or(&default_creator);
    let _ = write!(
        out,
        "\nVISITE CRÉÉE PAR : {}, {} ({}), {}. Spécialité : {}",
        creator.name, creator.title, creator.company, creator.website, creator.expertise
    );

    out
}

/// Humanize a topic key: underscores to spaces, upper-cased.
fn humanize_topic(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

/// Fixed French label for each viewing direction.
fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Front => "DEVANT (face au visiteur)",
        Direction::Left => "À GAUCHE",
        Direction::Back => "DERRIÈRE",
        Direction::Right => "À DROITE",
        Direction::Up => "AU-DESSUS (plafond)",
        Direction::Down => "EN DESSOUS (sol)",
    }
}
