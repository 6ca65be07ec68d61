//! Static topic table and canned general responses

use std::collections::HashSet;

use ahash::RandomState;

/// A topic the assistant can always answer offline
#[derive(Debug)]
pub struct Topic {
    /// Short identifier shown as the reply source
    pub name: &'static str,
    /// Normalized keywords; multi-word entries match as substrings
    pub keywords: &'static [&'static str],
    /// The canned answer
    pub answer: &'static str,
}

/// Checked in order; specific topics come before the generic party topic
pub const TOPICS: &[Topic] = &[
    Topic {
        name: "president",
        keywords: &["kamto", "président", "president", "leader", "dirigeant"],
        answer: "Maurice Kamto est le président national du MRC (Mouvement pour la \
                 Renaissance du Cameroun). Juriste et universitaire, il a été candidat \
                 à l'élection présidentielle de 2018.",
    },
    Topic {
        name: "adhesion",
        keywords: &[
            "adhérer", "adherer", "adhésion", "adhesion", "membre", "militant", "rejoindre",
        ],
        answer: "Pour adhérer au MRC, rapprochez-vous de la représentation locale du parti \
                 ou remplissez le formulaire d'adhésion en ligne. Une carte de membre vous \
                 sera remise après validation.",
    },
    Topic {
        name: "elections",
        keywords: &[
            "élection",
            "élections",
            "election",
            "elections",
            "vote",
            "voter",
            "électeur",
            "électeurs",
            "listes électorales",
        ],
        answer: "Pour voter, vous devez être inscrit sur les listes électorales auprès \
                 d'ELECAM. Vérifiez votre inscription avant la clôture de la période de \
                 révision des listes.",
    },
    Topic {
        name: "programme",
        keywords: &["programme", "projet", "propositions", "vision", "priorités"],
        answer: "Le programme du MRC s'articule autour de la bonne gouvernance, de la \
                 décentralisation, de l'emploi des jeunes et de la relance économique. \
                 Demandez-moi un thème précis pour en savoir plus.",
    },
    Topic {
        name: "soutien",
        keywords: &["don", "dons", "donner", "cotisation", "soutenir", "financer"],
        answer: "Vous pouvez soutenir le MRC par une cotisation de membre ou par un don. \
                 Chaque contribution est enregistrée et donne lieu à un reçu.",
    },
    Topic {
        name: "contact",
        keywords: &["contact", "contacter", "joindre", "adresse", "téléphone", "email", "siège"],
        answer: "Vous pouvez contacter le MRC par l'intermédiaire de ses représentations \
                 régionales ou des canaux officiels publiés sur les pages du parti.",
    },
    Topic {
        name: "parti",
        keywords: &["mrc", "parti", "mouvement", "renaissance"],
        answer: "Le MRC (Mouvement pour la Renaissance du Cameroun) est un parti politique \
                 camerounais créé en 2012. Il porte un projet de renouveau démocratique, \
                 économique et social.",
    },
];

/// Answers used when neither the cache nor a topic matches
pub const GENERAL_RESPONSES: &[&str] = &[
    "Je n'ai pas encore de réponse précise à cette question. Essayez de la reformuler, \
     ou interrogez-moi sur le programme, l'adhésion ou les élections.",
    "Bonne question ! Je ne dispose pas de cette information hors ligne. Réessayez \
     lorsque la connexion sera rétablie.",
    "Je n'ai pas trouvé de réponse dans mes données. Vous pouvez me demander qui est \
     Maurice Kamto, comment adhérer au MRC ou comment voter.",
    "Cette question mérite une réponse détaillée que je ne peux pas fournir hors ligne \
     pour le moment.",
];

/// Reply to a question with no word characters
pub const EMPTY_QUESTION_REPLY: &str =
    "Posez-moi une question sur le MRC, son programme ou ses activités.";

/// Find the first topic with a keyword in the normalized question
pub fn match_topic(normalized: &str) -> Option<&'static Topic> {
    let words: HashSet<&str, RandomState> = normalized.split_whitespace().collect();

    TOPICS.iter().find(|topic| {
        topic.keywords.iter().any(|keyword| {
            if keyword.contains(' ') {
                normalized.contains(keyword)
            } else {
                words.contains(keyword)
            }
        })
    })
}

/// Pick a general response, stable for a given question
pub fn general_response(normalized: &str) -> &'static str {
    let sum: u64 = normalized.bytes().map(u64::from).sum();
    GENERAL_RESPONSES[(sum % GENERAL_RESPONSES.len() as u64) as usize]
}
