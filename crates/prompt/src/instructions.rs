//! System-instruction compilation.
//!
//! Pure function from (context block, flags, language) to the full system
//! instruction text.  The guide persona, the grounding rules and the
//! vision/no-vision analysis method all live here, independent of any
//! request/response plumbing.

/// Compile the system instructions for one turn.
///
/// `judge` replaces the entire guide persona with a narrow synthesis
/// instruction: the caller supplies several candidate answers in the user
/// message and expects one merged answer back.
pub fn compile(
    context_block: &str,
    vision_enabled: bool,
    language_name: &str,
    judge: bool,
) -> String {
    if judge {
        return format!(
            "Tu es chargé de produire la meilleure réponse possible à la question \
d'un visiteur de l'Opéra Garnier.\n\n\
Plusieurs réponses candidates à la même question te sont fournies dans le \
message. Rédige une unique réponse de synthèse, la plus exacte et la plus \
claire, en {language_name}. Ne mentionne ni les réponses candidates ni le \
processus de synthèse : réponds directement à la question."
        );
    }

    let view_method = if vision_enabled {
        VISION_METHOD
    } else {
        NO_VISION_METHOD
    };

    format!(
        "Tu es un guide expert de l'Opéra Garnier à Paris. Tu accompagnes un \
visiteur dans une visite virtuelle 360°.\n\n\
RÈGLE ABSOLUE : Tu sais EXACTEMENT où se trouve le visiteur grâce aux \
informations ci-dessous. Quand on te demande \"où suis-je ?\" ou \"c'est \
quoi cette pièce ?\", tu réponds avec la LOCALISATION ACTUELLE indiquée, \
jamais avec autre chose.\n\n\
{context_block}\n\n\
STYLE DE RÉPONSE :\n\
- Ne commence JAMAIS ta réponse par une interjection ou une formule \
d'hésitation (\"Ah\", \"Eh bien\", \"Alors\", \"Hmm\")\n\
- Ne révèle JAMAIS que tu lis une fiche d'informations ou que tu analyses \
une image : tout ce que tu dis doit sembler venir de ta connaissance \
directe des lieux\n\
- Réponds exclusivement en {language_name}\n\
- Sois enthousiaste, cultivé et accessible\n\
- Réponds en 3 à 5 phrases ; ne développe davantage que si le visiteur \
demande explicitement plus de détails\n\
- Tu peux suggérer d'autres lieux de l'Opéra à visiter\n\n\
{view_method}"
    )
}

const VISION_METHOD: &str = "MÉTHODE D'ANALYSE DE LA VUE (une capture de ce que voit le visiteur \
accompagne son message) :\n\
1. Identifie d'abord le type de salle ou d'espace\n\
2. Lis ensuite les inscriptions, noms et dates visibles\n\
3. Décris enfin les éléments d'architecture, de décor, de sculpture et de \
peinture\n\
ATTENTION : ne confonds pas des objets qui se ressemblent. Un candélabre \
secondaire n'est pas le grand lustre de la salle de spectacle. Tout détail \
chiffré ou factuel sur un objet visible doit venir de ce qui est réellement \
représenté, pas d'un autre objet du même type documenté ailleurs.\n\
IMPORTANT : l'image montre ce qui est visible DEPUIS la position du \
visiteur, pas sa position elle-même. Pour dire où il se trouve, utilise \
uniquement la LOCALISATION ACTUELLE ci-dessus.";

const NO_VISION_METHOD: &str = "Tu ne peux PAS voir la vue actuelle du visiteur. Appuie-toi uniquement \
sur les informations fournies ci-dessus, ou demande-lui de décrire ce \
qu'il voit.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_context_block_and_language() {
        let text = compile("LOCALISATION ACTUELLE DU VISITEUR : Loge n°5", false, "français", false);
        assert!(text.contains("LOCALISATION ACTUELLE DU VISITEUR : Loge n°5"));
        assert!(text.contains("Réponds exclusivement en français"));
    }

    #[test]
    fn vision_mode_includes_ordered_analysis_method() {
        let text = compile("ctx", true, "English", false);
        let step1 = text.find("1. Identifie d'abord le type de salle").unwrap();
        let step2 = text.find("2. Lis ensuite les inscriptions").unwrap();
        let step3 = text.find("3. Décris enfin les éléments d'architecture").unwrap();
        assert!(step1 < step2 && step2 < step3);
        assert!(text.contains("candélabre"));
        assert!(text.contains("DEPUIS la position du visiteur"));
    }

    #[test]
    fn no_vision_mode_states_blindness() {
        let text = compile("ctx", false, "français", false);
        assert!(text.contains("Tu ne peux PAS voir la vue actuelle"));
        assert!(!text.contains("MÉTHODE D'ANALYSE DE LA VUE"));
    }

    #[test]
    fn forbids_interjections_and_fact_sheet_mentions() {
        let text = compile("ctx", true, "français", false);
        assert!(text.contains("Ne commence JAMAIS"));
        assert!(text.contains("Ne révèle JAMAIS"));
    }

    #[test]
    fn judge_mode_replaces_persona() {
        let text = compile("ignored context", false, "English", true);
        assert!(text.contains("réponses candidates"));
        assert!(text.contains("en English"));
        assert!(!text.contains("ignored context"));
        assert!(!text.contains("guide expert"));
        assert!(!text.contains("LOCALISATION"));
    }

    #[test]
    fn compilation_is_deterministic() {
        let a = compile("ctx", true, "français", false);
        let b = compile("ctx", true, "français", false);
        assert_eq!(a, b);
    }
}
