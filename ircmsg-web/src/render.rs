//! # Renderização HTML das Partes Anotadas
//!
//! Colaborador externo do motor: consome a sequência de [`TextPart`] e
//! produz a string de marcação exibida no cliente. Todo texto literal e todo
//! valor de entidade passa por escape antes de entrar no HTML.
//!
//! Cada fragmento de estilo vira um `<span>` com classes `irc-*`; cores
//! hexadecimais têm precedência sobre os índices da paleta e entram como
//! estilo inline. As partes de entidade são embrulhadas conforme o tipo:
//! links em âncoras (nova aba, sem referrer/opener), canais em controles
//! interativos focáveis, emoji em um contêiner visual, menções em um
//! controle com a classe de cor determinística do apelido.

use ircmsg_core::{EntityData, StyleFragment, TextPart};

/// Escapa os metacaracteres HTML de um texto
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Classe de cor determinística para um apelido (`color-1` a `color-32`).
///
/// Função pura: o mesmo apelido produz sempre a mesma classe, igual ao
/// cliente original.
pub fn color_class(nick: &str) -> String {
    let hash: u32 = nick.chars().map(|c| c as u32).sum();
    format!("color-{}", 1 + hash % 32)
}

/// Cria um `<span>` com as classes de estilo de um fragmento
fn render_fragment(fragment: &StyleFragment) -> String {
    let mut classes: Vec<String> = Vec::new();

    if fragment.bold {
        classes.push("irc-bold".to_string());
    }
    if let Some(color) = fragment.text_color {
        classes.push(format!("irc-fg{color}"));
    }
    if let Some(color) = fragment.bg_color {
        classes.push(format!("irc-bg{color}"));
    }
    if fragment.italic {
        classes.push("irc-italic".to_string());
    }
    if fragment.underline {
        classes.push("irc-underline".to_string());
    }
    if fragment.strikethrough {
        classes.push("irc-strikethrough".to_string());
    }
    if fragment.monospace {
        classes.push("irc-monospace".to_string());
    }

    let mut attributes = if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    };

    // Cores hexadecimais têm precedência sobre a paleta
    if let Some(hex) = &fragment.hex_color {
        let mut style = format!("color:#{hex}");
        if let Some(hex_bg) = &fragment.hex_bg_color {
            style.push_str(&format!(";background-color:#{hex_bg}"));
        }
        attributes.push_str(&format!(" style=\"{style}\""));
    }

    let escaped = escape_html(&fragment.text);
    if attributes.is_empty() {
        escaped
    } else {
        format!("<span{attributes}>{escaped}</span>")
    }
}

/// Renderiza a sequência completa de partes em HTML
pub fn render_message(parts: &[TextPart]) -> String {
    parts
        .iter()
        .map(|part| {
            let fragments: String = part.fragments.iter().map(render_fragment).collect();

            match &part.entity {
                Some(EntityData::Link { link }) => {
                    let href = escape_html(link);
                    format!(
                        "<a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{fragments}</a>"
                    )
                }
                Some(EntityData::Channel { channel }) => {
                    let chan = escape_html(channel);
                    format!(
                        "<span class=\"inline-channel\" role=\"button\" tabindex=\"0\" data-chan=\"{chan}\">{fragments}</span>"
                    )
                }
                Some(EntityData::Emoji { .. }) => {
                    format!("<span class=\"emoji\">{fragments}</span>")
                }
                Some(EntityData::Name { nick }) => {
                    let name = escape_html(nick);
                    let color = color_class(nick);
                    format!(
                        "<span role=\"button\" class=\"user {color}\" data-name=\"{name}\">{fragments}</span>"
                    )
                }
                None => fragments,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircmsg_core::{MessageParser, ParserConfig};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>&\"x\"</b>"),
            "&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_color_class_deterministica() {
        assert_eq!(color_class("alice"), color_class("alice"));
        let class = color_class("alice");
        assert!(class.starts_with("color-"));
    }

    #[test]
    fn test_texto_simples_sem_span() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("texto comum");
        assert_eq!(render_message(&parts), "texto comum");
    }

    #[test]
    fn test_negrito_vira_classe() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("\u{2}forte\u{2}");
        assert_eq!(
            render_message(&parts),
            "<span class=\"irc-bold\">forte</span>"
        );
    }

    #[test]
    fn test_link_embrulhado_em_ancora() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("https://a.com");
        let html = render_message(&parts);
        assert!(html.starts_with("<a href=\"https://a.com\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(html.contains("target=\"_blank\""));
    }

    #[test]
    fn test_canal_vira_controle_focavel() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("#rust");
        let html = render_message(&parts);
        assert!(html.contains("class=\"inline-channel\""));
        assert!(html.contains("role=\"button\""));
        assert!(html.contains("tabindex=\"0\""));
        assert!(html.contains("data-chan=\"#rust\""));
    }

    #[test]
    fn test_mencao_carrega_classe_de_cor() {
        let parser = MessageParser::with_config(ParserConfig {
            nicknames: vec!["alice".to_string()],
            ..ParserConfig::default()
        });
        let (_, parts) = parser.parse("alice");
        let html = render_message(&parts);
        let expected_class = color_class("alice");
        assert!(html.contains(&expected_class));
        assert!(html.contains("data-name=\"alice\""));
    }

    #[test]
    fn test_emoji_em_container() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("🔥");
        assert_eq!(render_message(&parts), "<span class=\"emoji\">🔥</span>");
    }

    #[test]
    fn test_hex_tem_precedencia_inline() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("\u{4}ff0000vermelho");
        let html = render_message(&parts);
        assert!(html.contains("style=\"color:#ff0000\""));
    }

    #[test]
    fn test_texto_malicioso_escapado() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("<script>alert(1)</script>");
        let html = render_message(&parts);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
