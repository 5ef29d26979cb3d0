//! # ircmsg-core — Motor de Anotação de Texto para Mensagens IRC
//!
//! Este crate transforma uma mensagem de chat bruta — possivelmente cheia de
//! códigos de estilo embutidos, URLs, referências a canais, emoji e menções —
//! em uma única sequência ordenada de fragmentos de texto sem sobreposições,
//! cada um ciente do seu estilo, pronta para renderização. Ele foi projetado
//! para ser didático, modular e extensível.
//!
//! ## Arquitetura do Sistema
//!
//! O sistema segue uma arquitetura de pipeline linear, onde o dado flui e é
//! transformado passo a passo:
//!
//! 1.  **Entrada**: Texto bruto da mensagem (String).
//! 2.  **Decodificação de Estilo** ([`style`]): Os códigos de controle mIRC
//!     (negrito, cores, itálico...) viram fragmentos com atributos, e o
//!     texto plano é derivado.
//! 3.  **Detecção de Entidades** ([`channels`], [`links`], [`emoji`],
//!     [`names`]): Quatro detectores independentes e sem estado varrem o
//!     texto plano em paralelo, cada um produzindo seus candidatos.
//! 4.  **Resolução** ([`resolver`]): Os candidatos concorrentes são
//!     reduzidos a um conjunto sem sobreposições por prioridade fixa —
//!     o primeiro na ordenação vence.
//! 5.  **Fusão** ([`merge`]): Os intervalos resolvidos e os fragmentos de
//!     estilo são combinados nas [`TextPart`] finais.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use ircmsg_core::{EntityKind, MessageParser, ParserConfig};
//!
//! // 1. Configura o motor com os apelidos conhecidos da conversa
//! let config = ParserConfig {
//!     nicknames: vec!["alice".to_string()],
//!     ..ParserConfig::default()
//! };
//! let parser = MessageParser::with_config(config);
//!
//! // 2. Mensagem com negrito em volta da menção e um canal no fim
//! let (plain, parts) = parser.parse("oi \u{2}alice\u{2}, veja #rust");
//!
//! // 3. O texto plano não contém códigos de controle
//! assert_eq!(plain, "oi alice, veja #rust");
//!
//! // 4. As partes particionam o texto, cada uma com sua classificação
//! assert_eq!(parts.len(), 4);
//! assert_eq!(parts[1].kind(), Some(EntityKind::Name));
//! assert_eq!(parts[3].kind(), Some(EntityKind::Channel));
//! assert!(parts[1].fragments[0].bold);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta todos os estágios e emite
//!   eventos observáveis para a visualização.
//! - [`style`]: Decodificador dos códigos de estilo mIRC.
//! - [`resolver`]: Política determinística de resolução de conflitos.
//! - [`merge`]: Fusão final de entidades e estilos.
//!
//! Todos os offsets, em todos os módulos, são offsets de **byte** no texto
//! plano derivado — uma única convenção de indexação do decodificador à
//! fusão.

pub mod channels;
pub mod demo;
pub mod emoji;
pub mod entity;
pub mod links;
pub mod merge;
pub mod names;
pub mod pipeline;
pub mod resolver;
pub mod style;

pub use entity::{EntityData, EntityKind, EntityRange};
pub use merge::TextPart;
pub use pipeline::{MessageParser, ParseEvent, ParserConfig};
pub use style::StyleFragment;
