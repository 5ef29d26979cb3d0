//! # Detector de Menções a Apelidos
//!
//! Dado o conjunto de apelidos conhecidos da conversa, encontra ocorrências
//! exatas de cada apelido em fronteiras de palavra, sem diferenciar
//! maiúsculas de minúsculas. As "palavras" seguem o alfabeto de apelidos do
//! IRC, que inclui `[]\`^{|}-` além de letras, dígitos e `_`.
//!
//! Um conjunto de apelidos vazio não encontra nada — a lista vem de fora
//! (estado da conversa) e é um parâmetro, não um recurso global.

use std::collections::HashSet;

use regex::Regex;

use crate::entity::EntityRange;

/// Detector de menções com conjunto de apelidos configurável.
pub struct NameFinder {
    nicks: HashSet<String>,
    word_regex: Regex,
}

impl NameFinder {
    /// Constrói o detector normalizando os apelidos para minúsculas.
    pub fn new(nicknames: &[String]) -> Self {
        Self {
            nicks: nicknames.iter().map(|n| n.to_lowercase()).collect(),
            word_regex: Regex::new(r"[\w\[\]\\`^{}|-]+")
                .expect("padrão de apelido inválido"),
        }
    }

    /// Encontra todas as menções a apelidos conhecidos no texto plano.
    pub fn find(&self, text: &str) -> Vec<EntityRange> {
        if self.nicks.is_empty() {
            return Vec::new();
        }

        let mut ranges = Vec::new();
        for m in self.word_regex.find_iter(text) {
            if self.nicks.contains(&m.as_str().to_lowercase()) {
                ranges.push(EntityRange::name(m.start(), m.end(), m.as_str().to_string()));
            }
        }
        ranges
    }
}
