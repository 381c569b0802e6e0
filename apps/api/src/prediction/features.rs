use std::collections::HashMap;

use serde::Serialize;

use crate::models::candidatura::Competencia;

/// Competencies scored by the classifier, in model column order.
pub const COMPETENCIAS: [&str; 8] = [
    "Profesionalidad",
    "Dominio",
    "Resiliencia",
    "HabilidadesSociales",
    "Liderazgo",
    "Colaboracion",
    "Compromiso",
    "Iniciativa",
];

/// Class label the model uses for an admitted candidate.
const ADMITTED_CLASS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Admitido,
    Rechazado,
}

impl Verdict {
    pub fn from_class(class: f64) -> Self {
        if class == ADMITTED_CLASS {
            Verdict::Admitido
        } else {
            Verdict::Rechazado
        }
    }
}

/// Orders the scores of one application into the model's feature vector.
/// Missing or null scores count as 0; names outside [`COMPETENCIAS`] are
/// ignored; for repeated names the last row wins.
pub fn feature_vector(competencias: &[Competencia]) -> [f64; 8] {
    let scores: HashMap<&str, f64> = competencias
        .iter()
        .map(|c| (c.nombre_competencia.as_str(), c.nota.unwrap_or(0.0)))
        .collect();

    COMPETENCIAS.map(|name| scores.get(name).copied().unwrap_or(0.0))
}
