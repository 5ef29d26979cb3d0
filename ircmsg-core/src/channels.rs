//! # Detector de Referências a Canais
//!
//! Varre o texto plano procurando tokens que começam com um dos caracteres
//! de prefixo de canal configurados (por padrão `#` e `&`), seguidos de uma
//! corrida de caracteres sem espaço e sem vírgula.
//!
//! Sigilos de modo de usuário (`@`, `+`, ...) imediatamente antes do prefixo
//! são pulados e excluídos da captura — isso evita capturar errado listas de
//! apelidos prefixados como `@#ops` em saídas de NAMES. Os conjuntos de
//! prefixos e de sigilos são **parâmetros**, nunca suposições sobre uma rede
//! específica.

use regex::Regex;

use crate::entity::EntityRange;

/// Detector de canais configurável por prefixos e modos de usuário.
pub struct ChannelFinder {
    prefixes: Vec<char>,
    regex: Regex,
}

impl ChannelFinder {
    /// Compila o padrão de busca a partir dos conjuntos configurados.
    ///
    /// O padrão segue o cliente original: início de texto ou espaço em
    /// branco, zero ou mais sigilos de modo, e a captura do canal em si.
    pub fn new(prefixes: &[char], user_modes: &[char]) -> Self {
        let prefix_class = regex::escape(&prefixes.iter().collect::<String>());
        let mode_class = regex::escape(&user_modes.iter().collect::<String>());
        let pattern = format!(r"(?:^|\s)[{mode_class}]*([{prefix_class}][^\s,\x07]+)");
        Self {
            prefixes: prefixes.to_vec(),
            regex: Regex::new(&pattern).expect("padrão de canal inválido"),
        }
    }

    /// Encontra todas as referências a canais no texto plano.
    ///
    /// Capturas cujo corpo (depois da corrida de prefixos) é pura pontuação
    /// ASCII são descartadas.
    pub fn find(&self, text: &str) -> Vec<EntityRange> {
        let mut ranges = Vec::new();

        for caps in self.regex.captures_iter(text) {
            let m = match caps.get(1) {
                Some(m) => m,
                None => continue,
            };

            let channel = m.as_str();
            let body = channel.trim_start_matches(|c| self.prefixes.contains(&c));
            if body.is_empty() || body.chars().all(|c| c.is_ascii_punctuation()) {
                continue;
            }

            ranges.push(EntityRange::channel(m.start(), m.end(), channel.to_string()));
        }

        ranges
    }
}
