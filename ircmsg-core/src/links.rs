//! # Detector de URLs
//!
//! Reconhece URLs com esquema qualificado (`esquema://...`) a partir de uma
//! lista fixa de esquemas permitidos. A detecção é puramente **léxica** — o
//! motor não valida se a URL existe ou é bem-formada além do casamento.
//!
//! Pontuação final "solta" é aparada do casamento: um `.` ou `,` no fim de
//! frase não faz parte do link. Fechos como `)` e `]` só são aparados quando
//! não estão balanceados por um abridor anterior **dentro** do próprio
//! casamento, preservando URLs como `.../Rust_(linguagem)`.

use regex::Regex;

use crate::entity::EntityRange;

/// Esquemas aceitos pelo detector
const SCHEMES: &[&str] = &["http", "https", "ftp", "sftp", "irc", "ircs"];

/// Detector de links com esquema qualificado.
pub struct LinkFinder {
    regex: Regex,
}

impl LinkFinder {
    pub fn new() -> Self {
        // \b impede casar no meio de uma palavra (ex: "xhttp://...")
        Self {
            regex: Regex::new(r"(?i)\b(?:https?|s?ftp|ircs?)://\S+")
                .expect("padrão de link inválido"),
        }
    }

    /// Encontra todas as URLs no texto plano.
    pub fn find(&self, text: &str) -> Vec<EntityRange> {
        let mut ranges = Vec::new();

        for m in self.regex.find_iter(text) {
            let trimmed = trim_trailing_punctuation(m.as_str());
            if !has_body(trimmed) {
                continue;
            }
            let end = m.start() + trimmed.len();
            ranges.push(EntityRange::link(m.start(), end, trimmed.to_string()));
        }

        ranges
    }
}

impl Default for LinkFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Apara pontuação final que não pertence ao link.
///
/// Fechos (`)`, `]`, `}`, `>`) só são aparados quando o casamento contém
/// mais fechos do que abridores correspondentes.
fn trim_trailing_punctuation(mut url: &str) -> &str {
    loop {
        let last = match url.chars().last() {
            Some(c) => c,
            None => break,
        };

        let trim = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' => true,
            ')' => url.matches('(').count() < url.matches(')').count(),
            ']' => url.matches('[').count() < url.matches(']').count(),
            '}' => url.matches('{').count() < url.matches('}').count(),
            '>' => url.matches('<').count() < url.matches('>').count(),
            _ => false,
        };

        if !trim {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    url
}

/// Verifica se resta algo depois de `esquema://`
fn has_body(url: &str) -> bool {
    match url.find("://") {
        Some(idx) => url.len() > idx + 3,
        None => false,
    }
}
