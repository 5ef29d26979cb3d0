//! # Detector de Emoji
//!
//! Reconhece duas formas de emoji no texto plano:
//!
//! 1. **Literais**: pontos de código emoji já presentes no texto (ex: `🔥`).
//!    A varredura é feita por *grapheme clusters* via `unicode-segmentation`,
//!    de modo que sequências multi-codepoint (bandeiras, tons de pele,
//!    junções ZWJ) formam um único intervalo.
//! 2. **Shortcodes**: tokens `:nome:` resolvidos contra uma tabela estática
//!    compilada no binário. Shortcodes desconhecidos não casam.
//!
//! O valor carregado pelo intervalo é sempre o símbolo emoji — para um
//! shortcode, o símbolo mapeado pela tabela.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::entity::EntityRange;

/// Tabela estática de shortcodes (subconjunto da tabela do cliente original)
const SHORTCODES: &[(&str, &str)] = &[
    ("100", "💯"),
    ("angry", "😠"),
    ("beer", "🍺"),
    ("bug", "🐛"),
    ("cat", "🐱"),
    ("check", "✔️"),
    ("clap", "👏"),
    ("coffee", "☕"),
    ("cry", "😢"),
    ("dog", "🐶"),
    ("eyes", "👀"),
    ("fire", "🔥"),
    ("ghost", "👻"),
    ("grin", "😁"),
    ("heart", "❤️"),
    ("hug", "🤗"),
    ("joy", "😂"),
    ("laughing", "😆"),
    ("lol", "😂"),
    ("muscle", "💪"),
    ("neutral_face", "😐"),
    ("ok_hand", "👌"),
    ("party", "🥳"),
    ("pizza", "🍕"),
    ("point_up", "☝️"),
    ("poop", "💩"),
    ("pray", "🙏"),
    ("rocket", "🚀"),
    ("rofl", "🤣"),
    ("sad", "😞"),
    ("scream", "😱"),
    ("skull", "💀"),
    ("sleeping", "😴"),
    ("smile", "😄"),
    ("smiley", "😃"),
    ("smirk", "😏"),
    ("sob", "😭"),
    ("sparkles", "✨"),
    ("star", "⭐"),
    ("sunglasses", "😎"),
    ("tada", "🎉"),
    ("thinking", "🤔"),
    ("thumbsdown", "👎"),
    ("thumbsup", "👍"),
    ("wave", "👋"),
    ("wink", "😉"),
    ("x", "❌"),
    ("zzz", "💤"),
];

/// Detector de emoji literais e shortcodes.
pub struct EmojiFinder {
    shortcode_regex: Regex,
}

impl EmojiFinder {
    pub fn new() -> Self {
        Self {
            shortcode_regex: Regex::new(r":([a-z0-9_+-]+):")
                .expect("padrão de shortcode inválido"),
        }
    }

    /// Encontra todos os emoji no texto plano, ordenados por posição.
    pub fn find(&self, text: &str) -> Vec<EntityRange> {
        let mut ranges = Vec::new();

        // Shortcodes :nome: presentes na tabela
        for caps in self.shortcode_regex.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let name = &caps[1];
            if let Some(symbol) = lookup_shortcode(name) {
                ranges.push(EntityRange::emoji(
                    whole.start(),
                    whole.end(),
                    symbol.to_string(),
                ));
            }
        }

        // Emoji literais, um intervalo por grapheme cluster
        for (offset, grapheme) in text.grapheme_indices(true) {
            if is_emoji_grapheme(grapheme) {
                ranges.push(EntityRange::emoji(
                    offset,
                    offset + grapheme.len(),
                    grapheme.to_string(),
                ));
            }
        }

        ranges.sort_by_key(|r| r.start);
        ranges
    }
}

impl Default for EmojiFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Busca um shortcode na tabela estática
fn lookup_shortcode(name: &str) -> Option<&'static str> {
    SHORTCODES
        .iter()
        .find(|(code, _)| *code == name)
        .map(|(_, symbol)| *symbol)
}

/// Classifica um grapheme cluster como emoji.
///
/// Aproximação documentada: o cluster é emoji quando seu primeiro escalar
/// está em um dos blocos Unicode de emoji, ou quando é multi-escalar e
/// contém o seletor de variação emoji (U+FE0F) — o que cobre keycaps e
/// símbolos apresentados como emoji (ex: `™️`).
fn is_emoji_grapheme(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if is_emoji_char(first) {
        return true;
    }
    grapheme.chars().count() > 1 && grapheme.chars().any(|c| c == '\u{fe0f}')
}

/// Blocos Unicode tratados como emoji
fn is_emoji_char(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1F0FF   // Mahjong, dominós, cartas
        | 0x1F300..=0x1F5FF // Símbolos e pictogramas diversos
        | 0x1F600..=0x1F64F // Emoticons
        | 0x1F680..=0x1F6FF // Transporte e mapas
        | 0x1F900..=0x1F9FF // Símbolos e pictogramas suplementares
        | 0x1FA70..=0x1FAFF // Símbolos e pictogramas estendidos-A
        | 0x1F1E6..=0x1F1FF // Indicadores regionais (bandeiras)
        | 0x2600..=0x26FF   // Símbolos diversos
        | 0x2700..=0x27BF   // Dingbats
        | 0x2B00..=0x2BFF   // Símbolos e setas diversos (⭐, ⬛)
    )
}
