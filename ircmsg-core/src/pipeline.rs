//! # Pipeline de Anotação — Orquestrador com Eventos Observáveis
//!
//! O pipeline coordena todos os estágios do motor (decodificação de estilo,
//! os quatro detectores, resolução de sobreposições e fusão final) e emite
//! eventos em cada passo via um canal Rust (`mpsc`), permitindo que o
//! servidor WebSocket transmita o progresso em tempo real para o cliente.
//!
//! ## Fluxo de Dados
//!
//! ```text
//! texto bruto → estilo → (fragmentos, texto plano)
//!             → detectores (canal | link | emoji | nome, em paralelo)
//!             → resolvedor → fusão → partes ordenadas
//! ```
//!
//! Os detectores são mutuamente independentes e executam em paralelo via
//! `rayon`; a ordem de término não importa porque o resolvedor impõe uma
//! ordem canônica determinística depois. Todo o pipeline é **total**: não há
//! modos de falha que escapem ao chamador, e nenhum estado persiste entre
//! chamadas.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::channels::ChannelFinder;
use crate::emoji::EmojiFinder;
use crate::entity::{EntityKind, EntityRange};
use crate::links::LinkFinder;
use crate::merge::{merge_parts, TextPart};
use crate::names::NameFinder;
use crate::resolver::resolve_with_rejections;
use crate::style::{parse_style, plain_text, StyleFragment};

/// Configuração do motor de anotação.
///
/// Os conjuntos de prefixos e sigilos são parâmetros da rede em uso
/// (`RPL_ISUPPORT`), nunca suposições fixas; os apelidos vêm do estado da
/// conversa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Caracteres que iniciam um nome de canal.
    pub channel_prefixes: Vec<char>,
    /// Sigilos de modo de usuário que podem preceder um canal.
    pub user_modes: Vec<char>,
    /// Apelidos conhecidos para o detector de menções.
    pub nicknames: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            channel_prefixes: vec!['#', '&'],
            user_modes: vec!['!', '@', '%', '+'],
            nicknames: Vec::new(),
        }
    }
}

/// Eventos emitidos pelo pipeline durante o processamento.
///
/// Estes eventos permitem que a UI visualize o caminho de cada trecho do
/// texto passo a passo. Cada variante carrega os dados necessários para
/// renderizar uma etapa da visualização.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ParseEvent {
    /// **Passo 1**: códigos de estilo decodificados.
    StyleDecoded {
        fragments: Vec<StyleFragment>,
        plain_text: String,
        total_fragments: usize,
    },
    /// **Passo 2** (um por detector): candidatos encontrados no texto plano.
    FinderDone {
        kind: EntityKind,
        ranges: Vec<EntityRange>,
        total: usize,
    },
    /// **Passo 3**: sobreposições resolvidas — quem ficou e quem caiu.
    Resolved {
        kept: Vec<EntityRange>,
        dropped: Vec<EntityRange>,
    },
    /// **Conclusão**: a sequência final de partes, pronta para renderizar.
    Done {
        parts: Vec<TextPart>,
        total_parts: usize,
        processing_ms: u64,
    },
}

/// O motor de anotação de mensagens.
///
/// Constrói os quatro detectores uma única vez a partir da configuração e
/// os reutiliza a cada chamada. Todos os métodos recebem `&self`: o parser
/// é livre de estado mutável e seguro para compartilhar entre threads.
pub struct MessageParser {
    config: ParserConfig,
    channels: ChannelFinder,
    links: LinkFinder,
    emoji: EmojiFinder,
    names: NameFinder,
}

impl MessageParser {
    /// Cria o parser com a configuração padrão (prefixos `#` e `&`,
    /// sigilos `!@%+`, nenhum apelido conhecido).
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Cria o parser com a configuração fornecida.
    pub fn with_config(config: ParserConfig) -> Self {
        let channels = ChannelFinder::new(&config.channel_prefixes, &config.user_modes);
        let links = LinkFinder::new();
        let emoji = EmojiFinder::new();
        let names = NameFinder::new(&config.nicknames);
        Self {
            config,
            channels,
            links,
            emoji,
            names,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Processa a mensagem de forma síncrona.
    ///
    /// Retorna o texto plano derivado e a sequência ordenada de partes.
    /// Ideal para uso direto; internamente consome o fluxo de eventos.
    pub fn parse(&self, text: &str) -> (String, Vec<TextPart>) {
        let (tx, rx) = mpsc::channel();
        self.parse_streaming(text, tx);

        let mut plain = String::new();
        let mut parts = Vec::new();
        while let Ok(event) = rx.recv() {
            match event {
                ParseEvent::StyleDecoded { plain_text, .. } => plain = plain_text,
                ParseEvent::Done { parts: p, .. } => parts = p,
                _ => {}
            }
        }
        (plain, parts)
    }

    /// Executa o pipeline enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `StyleDecoded`: fragmentos de estilo e texto plano.
    /// 2. `FinderDone` (x4): candidatos de cada detector, na ordem de
    ///    prioridade (canal, link, emoji, nome).
    /// 3. `Resolved`: intervalos mantidos e descartados.
    /// 4. `Done`: partes finais e estatísticas.
    pub fn parse_streaming(&self, text: &str, tx: mpsc::Sender<ParseEvent>) {
        let start = std::time::Instant::now();

        // === Passo 1: Decodificação de Estilo ===
        let fragments = parse_style(text);
        let plain = plain_text(&fragments);
        let _ = tx.send(ParseEvent::StyleDecoded {
            fragments: fragments.clone(),
            plain_text: plain.clone(),
            total_fragments: fragments.len(),
        });

        // === Passo 2: Detectores, em paralelo ===
        // Independentes entre si; o resolvedor impõe a ordem canônica depois
        let ((channel_ranges, link_ranges), (emoji_ranges, name_ranges)) = rayon::join(
            || {
                rayon::join(
                    || self.channels.find(&plain),
                    || self.links.find(&plain),
                )
            },
            || rayon::join(|| self.emoji.find(&plain), || self.names.find(&plain)),
        );

        for (kind, ranges) in [
            (EntityKind::Channel, &channel_ranges),
            (EntityKind::Link, &link_ranges),
            (EntityKind::Emoji, &emoji_ranges),
            (EntityKind::Name, &name_ranges),
        ] {
            let _ = tx.send(ParseEvent::FinderDone {
                kind,
                ranges: ranges.clone(),
                total: ranges.len(),
            });
        }

        // === Passo 3: Resolução de Sobreposições ===
        let mut candidates = channel_ranges;
        candidates.extend(link_ranges);
        candidates.extend(emoji_ranges);
        candidates.extend(name_ranges);

        let (kept, dropped) = resolve_with_rejections(candidates);
        let _ = tx.send(ParseEvent::Resolved {
            kept: kept.clone(),
            dropped,
        });

        // === Passo 4: Fusão Final ===
        let parts = merge_parts(&kept, &fragments, &plain);
        let _ = tx.send(ParseEvent::Done {
            total_parts: parts.len(),
            parts,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityData;

    #[test]
    fn test_cenario_canal_simples() {
        let parser = MessageParser::new();
        let (plain, parts) = parser.parse("hello #lounge world");

        assert_eq!(plain, "hello #lounge world");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].text(), "hello ");
        assert_eq!(
            parts[1].entity,
            Some(EntityData::Channel {
                channel: "#lounge".to_string()
            })
        );
        assert_eq!((parts[1].start, parts[1].end), (6, 13));
        assert_eq!(parts[2].text(), " world");
    }

    #[test]
    fn test_cenario_link_exclui_espaco() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("check https://example.com now");

        let link = parts
            .iter()
            .find(|p| p.kind() == Some(EntityKind::Link))
            .expect("deveria haver um link");
        assert_eq!(link.text(), "https://example.com");
        assert_eq!(
            link.entity,
            Some(EntityData::Link {
                link: "https://example.com".to_string()
            })
        );
    }

    #[test]
    fn test_cenario_negrito_envolvendo_link() {
        let parser = MessageParser::new();
        let (plain, parts) = parser.parse("\u{2}link http://x.com end\u{2}");

        assert_eq!(plain, "link http://x.com end");
        assert_eq!(parts.len(), 3);

        let link = &parts[1];
        assert_eq!(link.kind(), Some(EntityKind::Link));
        assert_eq!(link.fragments.len(), 1);
        assert!(link.fragments[0].bold);
        assert_eq!(link.fragments[0].text, "http://x.com");

        // As partes vizinhas carregam o complemento do estado de estilo
        assert!(parts[0].fragments[0].bold);
        assert!(parts[2].fragments[0].bold);
    }

    #[test]
    fn test_cenario_conflito_link_vence_mencao() {
        // "alice" dentro da URL: o link começa antes e vence; a menção é
        // descartada inteira, não truncada
        let config = ParserConfig {
            nicknames: vec!["alice".to_string()],
            ..ParserConfig::default()
        };
        let parser = MessageParser::with_config(config);
        let (_, parts) = parser.parse("check http://x.com/alice now");

        assert!(parts.iter().any(|p| p.kind() == Some(EntityKind::Link)));
        assert!(parts.iter().all(|p| p.kind() != Some(EntityKind::Name)));
    }

    #[test]
    fn test_cenario_lista_de_apelidos_vazia() {
        let parser = MessageParser::new();
        let (_, parts) = parser.parse("alice bob carol");
        assert_eq!(parts.len(), 1);
        assert!(parts[0].is_plain());
    }

    #[test]
    fn test_texto_vazio() {
        let parser = MessageParser::new();
        let (plain, parts) = parser.parse("");
        assert!(plain.is_empty());
        assert!(parts.is_empty());
    }

    #[test]
    fn test_mencao_com_apelido_conhecido() {
        let config = ParserConfig {
            nicknames: vec!["Alice".to_string()],
            ..ParserConfig::default()
        };
        let parser = MessageParser::with_config(config);
        let (_, parts) = parser.parse("oi alice!");

        let mention = parts
            .iter()
            .find(|p| p.kind() == Some(EntityKind::Name))
            .expect("deveria haver uma menção");
        assert_eq!(
            mention.entity,
            Some(EntityData::Name {
                nick: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_cobertura_reconstroi_texto_plano() {
        let parser = MessageParser::with_config(ParserConfig {
            nicknames: vec!["bob".to_string()],
            ..ParserConfig::default()
        });
        let raw = "\u{3}3oi\u{f} bob, veja #rust e https://a.com :tada: 🔥 fim";
        let (plain, parts) = parser.parse(raw);

        let rebuilt: String = parts.iter().map(|p| p.text()).collect();
        assert_eq!(rebuilt, plain);

        // Partes contíguas e ordenadas
        let mut pos = 0;
        for part in &parts {
            assert_eq!(part.start, pos);
            pos = part.end;
        }
        assert_eq!(pos, plain.len());
    }

    #[test]
    fn test_fluxo_de_eventos() {
        let parser = MessageParser::new();
        let (tx, rx) = mpsc::channel();
        parser.parse_streaming("veja #rust agora", tx);

        let events: Vec<ParseEvent> = rx.try_iter().collect();
        assert!(
            matches!(&events[0], ParseEvent::StyleDecoded { .. }),
            "primeiro evento deve ser StyleDecoded"
        );

        // Um FinderDone por detector, na ordem de prioridade
        let finder_kinds: Vec<EntityKind> = events
            .iter()
            .filter_map(|e| match e {
                ParseEvent::FinderDone { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            finder_kinds,
            vec![
                EntityKind::Channel,
                EntityKind::Link,
                EntityKind::Emoji,
                EntityKind::Name
            ]
        );

        let last = events.last().unwrap();
        assert!(
            matches!(last, ParseEvent::Done { .. }),
            "último evento deve ser Done"
        );
    }

    #[test]
    fn test_eventos_serializam_para_json() {
        // Os eventos viajam como JSON pelo WebSocket da visualização
        let parser = MessageParser::new();
        let (tx, rx) = mpsc::channel();
        parser.parse_streaming("#rust", tx);

        for event in rx.try_iter() {
            let json = serde_json::to_string(&event).expect("evento serializável");
            assert!(json.contains("\"type\""));
        }
    }

    #[test]
    fn test_prefixo_de_canal_configuravel() {
        let config = ParserConfig {
            channel_prefixes: vec!['!'],
            ..ParserConfig::default()
        };
        let parser = MessageParser::with_config(config);
        let (_, parts) = parser.parse("entre em !ajuda");
        assert!(parts.iter().any(|p| p.kind() == Some(EntityKind::Channel)));

        // '#' deixou de ser prefixo
        let (_, parts) = parser.parse("entre em #ajuda");
        assert!(parts.iter().all(|p| p.kind() != Some(EntityKind::Channel)));
    }
}
