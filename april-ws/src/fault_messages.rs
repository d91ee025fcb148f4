//! Localized replacements for known service faults

use std::collections::HashMap;
use std::sync::LazyLock;

/// Fault message returned by the service, and its French wording
pub const FAULT_MESSAGES: &[(&str, &str)] = &[
    ("User.unknown", "Utilisateur invalide (login, mot de passe incorrect)"),
    ("error.nombreDePax", "aucun assuré"),
    ("assurIndividuel.error.paxMinGarantie", "Pas assez d’assurés pour cette garantie"),
    ("assurIndividuel.error.paxMaxGarantie", "Trop d’assurés pour cette garantie"),
    ("infoVoyage.error.dureeMaxGarantie", "Durée trop importante pour cette garantie"),
    ("infoVoyage.error.dureeMinGarantie", "Durée trop courte pour cette garantie"),
    ("error.departTooLateForProduct", "Départ trop tardif pour cette garantie"),
    ("error.departSupRetour", "Départ > Retour"),
    ("error.departTooEarly", "Départ < date du jour"),
    ("pays inconnu", "Pays inconnu"),
    ("late subscription without comment", "Souscription tardive effectué sans commentaire"),
    (
        "QuoteError",
        "Erreur de tarification (getDevis ou getTarifs) indépendantes des prix passées en paramètres",
    ),
    ("OutOfLimitsError", "Erreur de tarification car les prix proposés sont hors tranches"),
    ("wrongUser", "L’utilisateur n’est pas autorisé à modifier ce contrat"),
    ("notSellingProduct", "Le client n’est pas autorisé à vendre ce produit"),
    ("ProblemGeneratingFile", "Probleme de génération du fichier"),
    ("NoAssistanceForVouche", "Pas d’assistance pour ce contrat"),
];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| FAULT_MESSAGES.iter().copied().collect());

/// Localized message for an exact fault text, if known
pub fn localize(fault: &str) -> Option<&'static str> {
    TABLE.get(fault).copied()
}
