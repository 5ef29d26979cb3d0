//! # Decodificador de Códigos de Estilo mIRC
//!
//! Mensagens IRC podem conter códigos de controle embutidos que ligam e
//! desligam atributos de formatação (negrito, cores, itálico...). Este módulo
//! varre o texto bruto e o converte em uma sequência ordenada de
//! [`StyleFragment`], onde cada fragmento é uma corrida máxima de texto com o
//! mesmo estado de estilo.
//!
//! ## Códigos Reconhecidos
//!
//! | Código | Efeito                                                    |
//! |--------|-----------------------------------------------------------|
//! | `0x02` | Alterna **negrito**                                       |
//! | `0x1D` | Alterna *itálico*                                         |
//! | `0x1F` | Alterna sublinhado                                        |
//! | `0x1E` | Alterna tachado                                           |
//! | `0x11` | Alterna monoespaçado                                      |
//! | `0x03` | Cor da paleta: 1–2 dígitos, opcional `,` + 1–2 dígitos    |
//! | `0x04` | Cor hexadecimal: 6 dígitos hex, opcional `,` + 6 dígitos  |
//! | `0x16` | Inverte cor de frente e de fundo (reverse video)          |
//! | `0x0F` | Limpa todos os atributos ativos                           |
//!
//! Os códigos são consumidos e nunca aparecem no texto de saída. Qualquer
//! outro caractere (inclusive códigos de controle não reconhecidos) passa
//! adiante como texto literal. Um `0x03` sem dígitos limpa as cores da
//! paleta; um `0x04` sem hex válido limpa as cores hexadecimais — o mesmo
//! comportamento do cliente original.
//!
//! Todos os offsets são **offsets de byte** no texto plano derivado
//! (a concatenação dos campos `text` de todos os fragmentos).

use serde::{Deserialize, Serialize};

const BOLD: char = '\u{02}';
const COLOR: char = '\u{03}';
const HEX_COLOR: char = '\u{04}';
const RESET: char = '\u{0f}';
const MONOSPACE: char = '\u{11}';
const REVERSE: char = '\u{16}';
const ITALIC: char = '\u{1d}';
const STRIKETHROUGH: char = '\u{1e}';
const UNDERLINE: char = '\u{1f}';

/// Uma corrida máxima de texto compartilhando os mesmos atributos de estilo.
///
/// Invariante: a concatenação de `text` ao longo da sequência completa
/// reproduz o texto plano exatamente; os fragmentos são contíguos e não se
/// sobrepõem por construção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleFragment {
    /// O trecho de texto plano coberto por este fragmento.
    pub text: String,
    /// Offset de byte inicial no texto plano (inclusivo).
    pub start: usize,
    /// Offset de byte final no texto plano (exclusivo).
    pub end: usize,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub monospace: bool,
    /// Cor de frente da paleta IRC (0–15).
    pub text_color: Option<u8>,
    /// Cor de fundo da paleta IRC (0–15).
    pub bg_color: Option<u8>,
    /// Cor de frente em hexadecimal (6 dígitos, minúsculos).
    pub hex_color: Option<String>,
    /// Cor de fundo em hexadecimal (6 dígitos, minúsculos).
    pub hex_bg_color: Option<String>,
}

impl StyleFragment {
    /// Verifica se algum atributo de estilo está ativo neste fragmento.
    pub fn has_attributes(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.strikethrough
            || self.monospace
            || self.text_color.is_some()
            || self.bg_color.is_some()
            || self.hex_color.is_some()
            || self.hex_bg_color.is_some()
    }
}

/// Estado de estilo acumulado durante a varredura.
///
/// O decodificador é um fold sobre os códigos de controle: cada código produz
/// um novo estado, e cada fragmento emitido carrega uma cópia imutável do
/// estado vigente — nunca uma referência compartilhada mutável.
#[derive(Debug, Clone, Default, PartialEq)]
struct StyleState {
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
    monospace: bool,
    text_color: Option<u8>,
    bg_color: Option<u8>,
    hex_color: Option<String>,
    hex_bg_color: Option<String>,
}

impl StyleState {
    fn fragment(&self, text: String, start: usize, end: usize) -> StyleFragment {
        StyleFragment {
            text,
            start,
            end,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: self.strikethrough,
            monospace: self.monospace,
            text_color: self.text_color,
            bg_color: self.bg_color,
            hex_color: self.hex_color.clone(),
            hex_bg_color: self.hex_bg_color.clone(),
        }
    }

    fn swap_colors(&mut self) {
        std::mem::swap(&mut self.text_color, &mut self.bg_color);
        std::mem::swap(&mut self.hex_color, &mut self.hex_bg_color);
    }
}

/// Decodifica o texto bruto em fragmentos de estilo.
///
/// Corridas de comprimento zero entre códigos adjacentes são omitidas, então
/// a saída nunca contém fragmentos vazios. Texto vazio produz lista vazia.
pub fn parse_style(text: &str) -> Vec<StyleFragment> {
    let chars: Vec<char> = text.chars().collect();
    let mut fragments = Vec::new();
    let mut state = StyleState::default();
    let mut current = String::new();
    let mut frag_start = 0usize;
    let mut plain_pos = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            BOLD | ITALIC | UNDERLINE | STRIKETHROUGH | MONOSPACE => {
                flush(&mut fragments, &mut current, &state, frag_start, plain_pos);
                frag_start = plain_pos;
                match ch {
                    BOLD => state.bold = !state.bold,
                    ITALIC => state.italic = !state.italic,
                    UNDERLINE => state.underline = !state.underline,
                    STRIKETHROUGH => state.strikethrough = !state.strikethrough,
                    _ => state.monospace = !state.monospace,
                }
                i += 1;
            }
            RESET => {
                flush(&mut fragments, &mut current, &state, frag_start, plain_pos);
                frag_start = plain_pos;
                state = StyleState::default();
                i += 1;
            }
            REVERSE => {
                flush(&mut fragments, &mut current, &state, frag_start, plain_pos);
                frag_start = plain_pos;
                state.swap_colors();
                i += 1;
            }
            COLOR => {
                flush(&mut fragments, &mut current, &state, frag_start, plain_pos);
                frag_start = plain_pos;
                i += 1;

                // Até 2 dígitos de cor de frente
                let mut fg = String::new();
                while i < chars.len() && fg.len() < 2 && chars[i].is_ascii_digit() {
                    fg.push(chars[i]);
                    i += 1;
                }

                if fg.is_empty() {
                    // Código de cor "nu" limpa as cores da paleta
                    state.text_color = None;
                    state.bg_color = None;
                } else {
                    // Valores fora da paleta são enrolados em 0–15
                    state.text_color = Some(fg.parse::<u8>().unwrap_or(0) % 16);

                    // Fundo opcional: vírgula seguida imediatamente de dígito
                    if i + 1 < chars.len() && chars[i] == ',' && chars[i + 1].is_ascii_digit() {
                        i += 1;
                        let mut bg = String::new();
                        while i < chars.len() && bg.len() < 2 && chars[i].is_ascii_digit() {
                            bg.push(chars[i]);
                            i += 1;
                        }
                        state.bg_color = Some(bg.parse::<u8>().unwrap_or(0) % 16);
                    }
                }
            }
            HEX_COLOR => {
                flush(&mut fragments, &mut current, &state, frag_start, plain_pos);
                frag_start = plain_pos;
                i += 1;

                match read_hex(&chars, i) {
                    Some(hex) => {
                        state.hex_color = Some(hex);
                        i += 6;
                        // Fundo opcional
                        if i < chars.len() && chars[i] == ',' {
                            if let Some(hex_bg) = read_hex(&chars, i + 1) {
                                state.hex_bg_color = Some(hex_bg);
                                i += 7;
                            }
                        }
                    }
                    None => {
                        // Código hex malformado limpa as cores hexadecimais;
                        // os caracteres seguintes permanecem literais
                        state.hex_color = None;
                        state.hex_bg_color = None;
                    }
                }
            }
            _ => {
                current.push(ch);
                plain_pos += ch.len_utf8();
                i += 1;
            }
        }
    }

    flush(&mut fragments, &mut current, &state, frag_start, plain_pos);
    fragments
}

/// Reconstrói o texto plano a partir dos fragmentos decodificados.
pub fn plain_text(fragments: &[StyleFragment]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}

/// Fecha a corrida acumulada e adiciona à lista (se não vazia)
fn flush(
    fragments: &mut Vec<StyleFragment>,
    current: &mut String,
    state: &StyleState,
    start: usize,
    end: usize,
) {
    if !current.is_empty() {
        fragments.push(state.fragment(std::mem::take(current), start, end));
    }
}

/// Lê 6 dígitos hexadecimais a partir de `pos`, se presentes
fn read_hex(chars: &[char], pos: usize) -> Option<String> {
    if pos + 6 > chars.len() {
        return None;
    }
    let slice = &chars[pos..pos + 6];
    if slice.iter().all(|c| c.is_ascii_hexdigit()) {
        Some(slice.iter().collect::<String>().to_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texto_puro_sem_codigos() {
        let frags = parse_style("olá mundo");
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "olá mundo");
        assert!(!frags[0].has_attributes());
        assert_eq!(frags[0].start, 0);
        assert_eq!(frags[0].end, "olá mundo".len());
    }

    #[test]
    fn test_texto_vazio() {
        assert!(parse_style("").is_empty());
    }

    #[test]
    fn test_negrito_alterna() {
        let frags = parse_style("a\u{2}b\u{2}c");
        assert_eq!(frags.len(), 3);
        assert!(!frags[0].bold);
        assert!(frags[1].bold);
        assert!(!frags[2].bold);
        assert_eq!(frags[1].text, "b");
        assert_eq!((frags[1].start, frags[1].end), (1, 2));
    }

    #[test]
    fn test_corridas_vazias_omitidas() {
        // Dois toggles adjacentes não produzem fragmento de comprimento zero
        let frags = parse_style("\u{2}\u{2}abc");
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "abc");
        assert!(!frags[0].bold);
    }

    #[test]
    fn test_cor_simples() {
        let frags = parse_style("\u{3}4vermelho");
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "vermelho");
        assert_eq!(frags[0].text_color, Some(4));
        assert_eq!(frags[0].bg_color, None);
    }

    #[test]
    fn test_cor_com_fundo() {
        let frags = parse_style("\u{3}4,12texto");
        assert_eq!(frags[0].text, "texto");
        assert_eq!(frags[0].text_color, Some(4));
        assert_eq!(frags[0].bg_color, Some(12));
    }

    #[test]
    fn test_cor_enrolada_na_paleta() {
        // 99 % 16 == 3
        let frags = parse_style("\u{3}99x");
        assert_eq!(frags[0].text_color, Some(3));
    }

    #[test]
    fn test_virgula_sem_digito_permanece_literal() {
        let frags = parse_style("\u{3}4,abc");
        assert_eq!(frags[0].text, ",abc");
        assert_eq!(frags[0].text_color, Some(4));
        assert_eq!(frags[0].bg_color, None);
    }

    #[test]
    fn test_cor_nua_limpa_paleta() {
        let frags = parse_style("\u{3}4a\u{3}b");
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].text_color, Some(4));
        assert_eq!(frags[1].text_color, None);
    }

    #[test]
    fn test_cor_hex() {
        let frags = parse_style("\u{4}FF0000texto");
        assert_eq!(frags[0].text, "texto");
        assert_eq!(frags[0].hex_color.as_deref(), Some("ff0000"));
    }

    #[test]
    fn test_cor_hex_com_fundo() {
        let frags = parse_style("\u{4}ff0000,00ff00x");
        assert_eq!(frags[0].hex_color.as_deref(), Some("ff0000"));
        assert_eq!(frags[0].hex_bg_color.as_deref(), Some("00ff00"));
    }

    #[test]
    fn test_hex_malformado_vira_literal() {
        let frags = parse_style("\u{4}zzz");
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "zzz");
        assert_eq!(frags[0].hex_color, None);
    }

    #[test]
    fn test_reset_limpa_tudo() {
        let frags = parse_style("\u{2}\u{3}5a\u{f}b");
        assert_eq!(frags.len(), 2);
        assert!(frags[0].bold);
        assert_eq!(frags[0].text_color, Some(5));
        assert!(!frags[1].has_attributes());
    }

    #[test]
    fn test_reverse_inverte_cores() {
        let frags = parse_style("\u{3}4,8a\u{16}b");
        assert_eq!(frags.len(), 2);
        assert_eq!((frags[0].text_color, frags[0].bg_color), (Some(4), Some(8)));
        assert_eq!((frags[1].text_color, frags[1].bg_color), (Some(8), Some(4)));
    }

    #[test]
    fn test_controle_desconhecido_permanece_literal() {
        // 0x07 (bell) não é um código de estilo — passa adiante
        let frags = parse_style("a\u{7}b");
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "a\u{7}b");
    }

    #[test]
    fn test_concatenacao_reproduz_texto_plano() {
        let input = "\u{2}oi\u{2} \u{3}3,13todos\u{f} até \u{1d}logo\u{1d}!";
        let frags = parse_style(input);
        assert_eq!(plain_text(&frags), "oi todos até logo!");
        // Fragmentos contíguos, sem lacunas
        let mut pos = 0;
        for f in &frags {
            assert_eq!(f.start, pos);
            assert_eq!(f.end - f.start, f.text.len());
            pos = f.end;
        }
    }

    #[test]
    fn test_idempotencia_em_texto_plano() {
        // Redecodificar o texto plano (sem códigos) produz um único
        // fragmento sem atributos
        let frags = parse_style("\u{2}negrito\u{2} normal");
        let plain = plain_text(&frags);
        let again = parse_style(&plain);
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].text, plain);
        assert!(!again[0].has_attributes());
    }

    #[test]
    fn test_offsets_sao_bytes_utf8() {
        // "ã" ocupa 2 bytes; os offsets devem refletir isso
        let frags = parse_style("ã\u{2}é");
        assert_eq!(frags.len(), 2);
        assert_eq!((frags[0].start, frags[0].end), (0, 2));
        assert_eq!((frags[1].start, frags[1].end), (2, 4));
    }
}
